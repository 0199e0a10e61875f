/*!
  This module is responsible for the encoding and decoding of binary instructions.

  Every instruction is one little-endian word:

    [Operand:28][OpCode:4]

  with the opcode in the least significant bits. A program is a bare sequence of such words
  with no header, footer or length prefix.
*/

use super::{Instruction, OPCODE_BITS, OPCODE_MASK, OPERAND_MASK};
use crate::config::Truncation;
use crate::error::{Result, UvmError};

// If you change this you must also change `encode_instruction` and `decode_instruction`.
pub type Word = u32;
/// Size in bytes of an encoded instruction.
pub const INSTRUCTION_SIZE: usize = 4;

pub fn encode_instruction(instruction: Instruction) -> [u8; INSTRUCTION_SIZE] {
  let word: Word =
      (instruction.opcode() as Word & OPCODE_MASK)
    | ((instruction.operand() & OPERAND_MASK) << OPCODE_BITS);
  word.to_le_bytes()
}

/// Decodes the instruction in the first four bytes of `bytes`. Opcodes are not validated.
pub fn decode_instruction(bytes: &[u8]) -> Result<Instruction> {
  decode_at(bytes, 0)
}

fn decode_at(bytes: &[u8], offset: usize) -> Result<Instruction> {
  if bytes.len() < INSTRUCTION_SIZE {
    return Err(UvmError::MalformedInput { offset, length: bytes.len() });
  }
  let word = Word::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
  Ok(
    Instruction::new(
      (word & OPCODE_MASK) as u8,
      (word >> OPCODE_BITS) & OPERAND_MASK
    )
  )
}

/**
  Slices a bytecode stream into consecutive instructions in stream order.

  A trailing partial instruction is dropped under `Truncation::Silent` and is an error under
  `Truncation::Strict`.
*/
pub fn decode_program(bytes: &[u8], truncation: Truncation) -> Result<Vec<Instruction>> {
  let chunks = bytes.chunks_exact(INSTRUCTION_SIZE);
  let remainder = chunks.remainder();

  if !remainder.is_empty() && truncation == Truncation::Strict {
    return Err(
      UvmError::MalformedInput {
        offset: bytes.len() - remainder.len(),
        length: remainder.len()
      }
    );
  }

  chunks.enumerate()
        .map(|(i, chunk)| decode_at(chunk, i * INSTRUCTION_SIZE))
        .collect()
}
