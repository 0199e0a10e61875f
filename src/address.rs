//! Memory addresses and the `start:end` memory window exported after a run.

use std::fmt::{Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

use nom::{
  character::complete::{char as one_char, digit1},
  combinator::{all_consuming, map_res},
  sequence::separated_pair,
  IResult
};

use crate::error::UvmError;

// `AddressType` is `usize`, as it is naturally an index into a memory store.
pub type AddressType = usize;

/// A half-open window `[start, end)` of memory.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemoryRange {
  pub start : AddressType,
  pub end   : AddressType
}

impl MemoryRange {
  pub fn new(start: AddressType, end: AddressType) -> MemoryRange {
    MemoryRange{ start, end }
  }

  /**
    Clamps the window to a memory of `len` cells the way slicing does in dynamic languages:
    an `end` past the memory is cut back to `len`, and a `start` past `end` gives an empty
    range. Never fails.
  */
  pub fn clamp(&self, len: usize) -> Range<usize> {
    let end   = self.end.min(len);
    let start = self.start.min(end);
    start..end
  }
}

fn address(input: &str) -> IResult<&str, AddressType> {
  map_res(digit1, |text: &str| text.parse::<AddressType>())(input)
}

fn memory_range(input: &str) -> IResult<&str, (AddressType, AddressType)> {
  all_consuming(separated_pair(address, one_char(':'), address))(input)
}

impl FromStr for MemoryRange {
  type Err = UvmError;

  fn from_str(text: &str) -> Result<MemoryRange, UvmError> {
    match memory_range(text.trim()) {
      Ok((_rest, (start, end))) => Ok(MemoryRange::new(start, end)),
      Err(_e)                   => Err(UvmError::InvalidRange(text.to_string()))
    }
  }
}

impl Display for MemoryRange {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}", self.start, self.end)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_range(){
    assert_eq!("0:10".parse::<MemoryRange>().ok(), Some(MemoryRange::new(0, 10)));
    assert_eq!(" 5:2 ".parse::<MemoryRange>().ok(), Some(MemoryRange::new(5, 2)));
    assert_eq!(MemoryRange::new(3, 7).to_string(), "3:7");
  }

  #[test]
  fn reject_malformed_range(){
    for text in ["", "10", "1:", ":1", "-1:4", "1:2:3", "a:b", "1 : 2"].iter() {
      assert!(
        matches!(text.parse::<MemoryRange>(), Err(UvmError::InvalidRange(_))),
        "accepted `{}`", text
      );
    }
  }

  #[test]
  fn clamp_like_a_slice(){
    assert_eq!(MemoryRange::new(0, 2).clamp(1024), 0..2);
    assert_eq!(MemoryRange::new(1000, 2000).clamp(1024), 1000..1024);
    assert_eq!(MemoryRange::new(2000, 3000).clamp(1024), 1024..1024);
    assert_eq!(MemoryRange::new(8, 4).clamp(1024), 4..4);
  }
}
