//! Structured output: the assembler's diagnostic log and the interpreter's memory export. Both
//! are YAML and write-only; nothing in the toolchain reads them back.

use serde::{Deserialize, Serialize};

use crate::bytecode::Instruction;
use crate::error::Result;
use crate::symboltable::opcode_to_mnemonic;
use crate::uvm::Cell;

/**
  One assembled instruction as it appears in the log. `operand` is the value written in the
  source, so it may be negative or wider than 28 bits.
*/
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
  pub mnemonic : String,
  pub opcode   : u8,
  pub operand  : i64
}

impl LogRecord {
  pub fn with_operand(instruction: &Instruction, operand: i64) -> LogRecord {
    LogRecord {
      mnemonic : opcode_to_mnemonic(instruction.opcode()).into_owned(),
      opcode   : instruction.opcode(),
      operand
    }
  }
}

impl From<&Instruction> for LogRecord {
  fn from(instruction: &Instruction) -> LogRecord {
    LogRecord::with_operand(instruction, instruction.operand() as i64)
  }
}

pub fn render_log(records: &[LogRecord]) -> Result<String> {
  Ok(serde_yaml::to_string(records)?)
}

pub fn render_memory(cells: &[Cell]) -> Result<String> {
  Ok(serde_yaml::to_string(cells)?)
}
