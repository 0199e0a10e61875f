/*!
  The human readable textual form of bytecode is called assembly. Each line holds either
  nothing, a comment starting with `#`, or an instruction of the form

    <mnemonic> <decimal integer>

  separated by any whitespace. Comments must occupy the whole line. Operands may be signed and
  of any size in the text, but only their low 28 bits survive encoding.
*/

use nom::{
  bytes::complete::{take_till1, take_while1},
  character::complete::{digit1, one_of},
  combinator::{all_consuming, map, opt, recognize},
  multi::separated_list,
  sequence::pair,
  IResult
};

use crate::bytecode::{encode_instruction, Instruction, Word, INSTRUCTION_SIZE};
use crate::error::{Result, UvmError};
use crate::report::LogRecord;
use crate::symboltable::mnemonic_to_opcode;

const COMMENT_MARKER: char = '#';

/// An operand as written: its low 32 bits, and the value itself when it fits in an `i64`.
#[derive(Copy, Clone, Debug)]
struct Operand {
  word    : Word,
  literal : Option<i64>
}

fn token(input: &str) -> IResult<&str, &str> {
  take_till1(|c: char| c.is_whitespace())(input)
}

fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
  separated_list(take_while1(|c: char| c.is_whitespace()), token)(input)
}

fn integer(input: &str) -> IResult<&str, Operand> {
  map(
    recognize(pair(opt(one_of("+-")), digit1)),
    |text: &str| {
      // Wrapping arithmetic mod 2^32 is exact for the low 28 bits.
      let word = text.chars()
                     .filter_map(|c| c.to_digit(10))
                     .fold(0 as Word, |word, digit| word.wrapping_mul(10).wrapping_add(digit));
      let word = match text.starts_with('-') {
        true  => word.wrapping_neg(),
        false => word
      };
      Operand{ word, literal: text.parse::<i64>().ok() }
    }
  )(input)
}

fn syntax_error(line: usize, text: &str, reason: String) -> UvmError {
  UvmError::Syntax {
    line,
    text: text.to_string(),
    reason
  }
}

/// Parses one line into its instruction and the log record carrying the operand as written.
fn parse_statement(line: usize, text: &str) -> Result<Option<(Instruction, LogRecord)>> {
  let trimmed = text.trim();
  if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
    return Ok(None);
  }

  let parts = match all_consuming(tokens)(trimmed) {
    Ok((_rest, parts)) => parts,
    Err(_e)            => {
      return Err(syntax_error(line, trimmed, "could not split line into tokens".to_string()));
    }
  };

  if parts.len() != 2 {
    return Err(
      syntax_error(
        line,
        trimmed,
        format!("expected a mnemonic and an operand but found {} tokens", parts.len())
      )
    );
  }

  let opcode = mnemonic_to_opcode(parts[0]).map_err(|error| {
    match error {
      UvmError::UnknownMnemonic{ mnemonic, .. } => {
        UvmError::UnknownMnemonic{ line: Some(line), mnemonic }
      }
      other => other
    }
  })?;

  let operand = match all_consuming(integer)(parts[1]) {
    Ok((_rest, operand)) => operand,
    Err(_e)              => {
      return Err(
        syntax_error(line, trimmed, format!("operand `{}` is not an integer", parts[1]))
      );
    }
  };

  // `Instruction::new` masks the word to 28 bits.
  let instruction = Instruction::new(opcode, operand.word);
  let literal = operand.literal.unwrap_or(instruction.operand() as i64);
  Ok(Some((instruction, LogRecord::with_operand(&instruction, literal))))
}

fn parse_statements(source: &str) -> Result<Vec<(Instruction, LogRecord)>> {
  let mut statements = vec![];
  for (i, text) in source.lines().enumerate() {
    if let Some(statement) = parse_statement(i + 1, text)? {
      statements.push(statement);
    }
  }

  #[cfg(feature = "trace_computation")]
  println!("Assembled {} instructions.", statements.len());

  Ok(statements)
}

/**
  Parses a single source line. Returns `Ok(None)` for blank and comment lines. `line` is the
  1-based line number used in error messages.
*/
pub fn parse_line(line: usize, text: &str) -> Result<Option<Instruction>> {
  Ok(parse_statement(line, text)?.map(|(instruction, _record)| instruction))
}

/// Parses a whole source text into instructions in source order.
pub fn assemble(source: &str) -> Result<Vec<Instruction>> {
  Ok(
    parse_statements(source)?
      .into_iter()
      .map(|(instruction, _record)| instruction)
      .collect()
  )
}

/// Concatenates the encoding of every instruction. No header, footer or length prefix.
pub fn emit_binary(program: &[Instruction]) -> Vec<u8> {
  let mut bytes = Vec::with_capacity(program.len() * INSTRUCTION_SIZE);
  for instruction in program {
    bytes.extend_from_slice(&encode_instruction(*instruction));
  }
  bytes
}

/// Log records for instructions without source text, so operands are the encoded values.
pub fn emit_log(program: &[Instruction]) -> Vec<LogRecord> {
  program.iter().map(LogRecord::from).collect()
}

/// Lists a program back as assembly source, one instruction per line.
pub fn disassemble(program: &[Instruction]) -> String {
  program.iter()
         .map(|instruction| format!("{}\n", instruction))
         .collect()
}


/**
  Accumulates instructions across one or more source texts. A source text that fails to
  assemble leaves the buffer as it was. The log keeps each operand as it was written, before
  masking.
*/
#[derive(Clone, Debug, Default)]
pub struct Assembler {
  instructions : Vec<Instruction>,
  log          : Vec<LogRecord>
}

impl Assembler {
  pub fn new() -> Assembler {
    Assembler::default()
  }

  pub fn assemble(&mut self, source: &str) -> Result<&[Instruction]> {
    for (instruction, record) in parse_statements(source)? {
      self.instructions.push(instruction);
      self.log.push(record);
    }
    Ok(&self.instructions)
  }

  pub fn instructions(&self) -> &[Instruction] {
    &self.instructions
  }

  pub fn emit_binary(&self) -> Vec<u8> {
    emit_binary(&self.instructions)
  }

  pub fn emit_log(&self) -> Vec<LogRecord> {
    self.log.clone()
  }
}
