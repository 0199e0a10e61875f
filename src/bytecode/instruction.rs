use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};
use num_enum::{TryFromPrimitive, IntoPrimitive};

use crate::bytecode::Word;
use crate::symboltable::opcode_to_mnemonic;

/// Width of the opcode field, which occupies the low bits of the word.
pub const OPCODE_BITS: u32 = 4;
pub const OPCODE_MASK: Word = 0xF;
/// The operand fills the remaining 28 bits.
pub const OPERAND_MASK: Word = 0x0FFF_FFFF;

/**
  Opcodes of the virtual machine with defined execution semantics.

  The discriminants are the wire values, so unlike a dense enum the codes are sparse. An opcode
  field may hold any of the sixteen 4-bit values; only these four can be executed. The strum
  serialization of each variant is its assembly mnemonic.
*/
#[derive(
StrumDisplay, IntoStaticStr, EnumString, EnumIter, TryFromPrimitive, IntoPrimitive,
Clone,        Copy,          Eq, PartialEq,  Debug,    Hash
)]
#[repr(u8)]
pub enum Operation {
  #[strum(serialize = "ldc")]
  LoadConstant = 2,   // ldc  m : acc := m
  #[strum(serialize = "eq")]
  Equal        = 7,   // eq   m : acc := (acc == mem[m])
  #[strum(serialize = "st")]
  Store        = 11,  // st   m : mem[m] := acc
  #[strum(serialize = "ldr")]
  LoadMemory   = 12,  // ldr  m : acc := mem[m]
}

impl Operation {
  pub fn code(&self) -> u8 {
    Into::<u8>::into(*self)
  }

  pub fn mnemonic(&self) -> &'static str {
    (*self).into()
  }
}

/**
  An unencoded instruction: a 4-bit opcode and a 28-bit operand. Both fields are masked on
  construction, never rejected, so every `Instruction` encodes to exactly one word and decodes
  back to itself.

  The opcode is kept as a raw number rather than an `Operation` because decoding accepts every
  opcode value; whether the opcode means anything is only decided at execution time.
*/
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Instruction {
  opcode  : u8,
  operand : Word
}

impl Instruction {
  pub fn new(opcode: u8, operand: Word) -> Instruction {
    Instruction {
      opcode  : (opcode as Word & OPCODE_MASK) as u8,
      operand : operand & OPERAND_MASK
    }
  }

  pub fn from_operation(operation: Operation, operand: Word) -> Instruction {
    Instruction::new(operation.code(), operand)
  }

  pub fn opcode(&self) -> u8 {
    self.opcode
  }

  pub fn operand(&self) -> Word {
    self.operand
  }

  /// The executable operation, or `None` if the opcode has no defined semantics.
  pub fn operation(&self) -> Option<Operation> {
    Operation::try_from(self.opcode).ok()
  }
}

/// Renders in assembly form, e.g. `ldc 42`.
impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", opcode_to_mnemonic(self.opcode), self.operand)
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;

  #[test]
  fn fields_are_masked(){
    let instruction = Instruction::new(0x12, 0xFFFF_FFFF);
    assert_eq!(instruction.opcode(), 0x2);
    assert_eq!(instruction.operand(), 0x0FFF_FFFF);

    let instruction = Instruction::new(15, 1 << 28);
    assert_eq!(instruction.opcode(), 15);
    assert_eq!(instruction.operand(), 0);
  }

  #[test]
  fn operation_codes(){
    assert_eq!(Operation::LoadConstant.code(), 2);
    assert_eq!(Operation::Equal.code(), 7);
    assert_eq!(Operation::Store.code(), 11);
    assert_eq!(Operation::LoadMemory.code(), 12);

    assert_eq!(Instruction::new(11, 0).operation(), Some(Operation::Store));
    assert_eq!(Instruction::new(3, 0).operation(), None);
  }

  #[test]
  fn operation_text(){
    assert_eq!(Operation::from_str("ldr").ok(), Some(Operation::LoadMemory));
    assert!(Operation::from_str("LDR").is_err());
    assert_eq!(Operation::Equal.to_string(), "eq");
    assert_eq!(Operation::LoadConstant.mnemonic(), "ldc");
  }

  #[test]
  fn display_as_assembly(){
    assert_eq!(Instruction::from_operation(Operation::LoadConstant, 42).to_string(), "ldc 42");
    assert_eq!(Instruction::new(9, 1).to_string(), "unknown(9) 1");
  }
}
