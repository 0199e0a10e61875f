use std::borrow::Cow;

use bimap::BiMap;
use strum::IntoEnumIterator;

use crate::bytecode::Operation;
use crate::error::{Result, UvmError};

/**
  The mnemonic table maps assembly mnemonics to opcodes and back. A mnemonic table is really
  just a convenience wrapper around a BiMap. There is exactly one, `MNEMONICS`, built on first
  use from the `Operation` enum and never modified afterward.
*/
pub struct MnemonicTable {
  table: BiMap<&'static str, u8>
}

lazy_static! {
  pub static ref MNEMONICS: MnemonicTable = MnemonicTable::new();
}

impl MnemonicTable {

  fn new() -> MnemonicTable {
    let mut table = BiMap::new();
    for operation in Operation::iter() {
      table.insert(operation.mnemonic(), operation.code());
    }
    MnemonicTable{ table }
  }

  pub fn get_opcode(&self, mnemonic: &str) -> Option<u8> {
    self.table.get_by_left(mnemonic).copied()
  }

  pub fn get_mnemonic(&self, opcode: u8) -> Option<&'static str> {
    self.table.get_by_right(&opcode).copied()
  }

  pub fn len(&self) -> usize {
    self.table.len()
  }

  pub fn is_empty(&self) -> bool {
    self.table.is_empty()
  }
}

pub fn mnemonic_to_opcode(mnemonic: &str) -> Result<u8> {
  MNEMONICS.get_opcode(mnemonic).ok_or_else(|| {
    UvmError::UnknownMnemonic {
      line     : None,
      mnemonic : mnemonic.to_string()
    }
  })
}

/// Never fails: opcodes without a mnemonic render as `unknown(<opcode>)`.
pub fn opcode_to_mnemonic(opcode: u8) -> Cow<'static, str> {
  match MNEMONICS.get_mnemonic(opcode) {
    Some(mnemonic) => Cow::Borrowed(mnemonic),
    None           => Cow::Owned(format!("unknown({})", opcode))
  }
}
