/*!

  The VM uses a 32 bit little-endian word size, and every instruction is exactly one word.
  The sizes of instruction components are as follows:

    Opcode:   4 bits
    Operand: 28 bits

  Fixed-size instructions mean a program is decoded by slicing it into 4 byte chunks, with no
  length prefix or padding. The operand is a literal constant for `ldc` and a memory address
  for every other operation.

  Assembly is the human readable textual form of bytecode: one `<mnemonic> <integer>` pair per
  line, with `#` starting a full-line comment. Assembling is done in two passes. The first pass
  parses the text into `Instruction`s, and the second pass encodes them to bytecode and to a
  log of records for diagnostics.

*/

mod binary;
mod instruction;
mod assembly;

pub use binary::{encode_instruction, decode_instruction, decode_program, Word, INSTRUCTION_SIZE};
pub use instruction::{Instruction, Operation, OPCODE_BITS, OPCODE_MASK, OPERAND_MASK};
pub use assembly::{assemble, parse_line, emit_binary, emit_log, disassemble, Assembler};
