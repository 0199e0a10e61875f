//! Errors raised while assembling, decoding or running a program. Every error aborts the run
//! it occurs in; none of them are retried.

use thiserror::Error;

use crate::address::AddressType;

pub type Result<T> = std::result::Result<T, UvmError>;

#[derive(Debug, Error)]
pub enum UvmError {
  /// A non-blank, non-comment source line that is not `<mnemonic> <integer>`.
  #[error("syntax error on line {line}: {reason}: `{text}`")]
  Syntax {
    line   : usize,
    text   : String,
    reason : String
  },

  #[error("unknown mnemonic `{mnemonic}`{}", on_line(.line))]
  UnknownMnemonic {
    line     : Option<usize>,
    mnemonic : String
  },

  /// Fewer than four bytes were left where an instruction was expected.
  #[error("malformed input at byte {offset}: expected 4 bytes, found {length}")]
  MalformedInput {
    offset : usize,
    length : usize
  },

  #[error("unknown instruction: opcode {opcode} at position {position}")]
  UnknownInstruction {
    opcode   : u8,
    position : usize
  },

  /// Memory access outside the memory array. Fatal to the running program.
  #[error("index fault: address {index} is outside memory of size {memory_size} (position {position})")]
  IndexFault {
    index       : AddressType,
    memory_size : usize,
    position    : usize
  },

  #[error("invalid memory range `{0}`: expected `start:end`")]
  InvalidRange(String),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  Serialization(#[from] serde_yaml::Error),
}

fn on_line(line: &Option<usize>) -> String {
  match line {
    Some(line) => format!(" on line {}", line),
    None       => String::new()
  }
}
