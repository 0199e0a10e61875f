//! Runtime configuration of the interpreter. Tracing is configured at compile time instead,
//! through the `trace_computation` feature.

/// Number of memory cells when no size is given.
pub const DEFAULT_MEMORY_SIZE: usize = 1024;

/**
  What to do with a bytecode stream whose length is not a multiple of the instruction size.
  `Silent` drops the trailing partial instruction, which is how existing program files have
  always been read. `Strict` rejects the stream with `UvmError::MalformedInput`.
*/
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Truncation {
  Silent,
  Strict
}

impl Default for Truncation {
  fn default() -> Truncation {
    Truncation::Silent
  }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct InterpreterConfig {
  pub memory_size : usize,
  pub truncation  : Truncation
}

impl Default for InterpreterConfig {
  fn default() -> InterpreterConfig {
    InterpreterConfig {
      memory_size : DEFAULT_MEMORY_SIZE,
      truncation  : Truncation::default()
    }
  }
}

impl InterpreterConfig {
  pub fn with_memory_size(self, memory_size: usize) -> InterpreterConfig {
    InterpreterConfig { memory_size, ..self }
  }

  pub fn with_truncation(self, truncation: Truncation) -> InterpreterConfig {
    InterpreterConfig { truncation, ..self }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults(){
    let config = InterpreterConfig::default();
    assert_eq!(config.memory_size, 1024);
    assert_eq!(config.truncation, Truncation::Silent);
  }

  #[test]
  fn builders(){
    let config = InterpreterConfig::default()
      .with_memory_size(16)
      .with_truncation(Truncation::Strict);
    assert_eq!(config.memory_size, 16);
    assert_eq!(config.truncation, Truncation::Strict);
  }
}
