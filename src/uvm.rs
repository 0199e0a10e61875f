//! Structures and functions for the UVM, a single-accumulator virtual machine over a flat
//! memory array.

use std::fmt::{Display, Formatter};

use prettytable::{format as TableFormat, Table};

use crate::address::{AddressType, MemoryRange};
use crate::bytecode::*;
use crate::config::InterpreterConfig;
use crate::error::{Result, UvmError};

/// Contents of a memory cell and of the accumulator.
pub type Cell = i64;

/**
  The machine state: memory, the accumulator, and how many instructions have run. There is no
  instruction pointer because there is no control flow. A program runs front to back, and
  reaching its end is termination.
*/
pub struct UVM {
  // Memory Store
  memory      : Vec<Cell>,

  // Registers //
  accumulator : Cell,
  executed    : usize,          // Instructions executed so far, a cursor
  last_access : Option<AddressType>,

  config      : InterpreterConfig
}

impl UVM {

  // region Display methods

  fn make_memory_table(memory: &[Cell], highlight: Option<AddressType>) -> Table {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"Address", ubl->"Contents"]);

    // Memory is mostly zeros; only show cells that were written or just accessed.
    for (i, cell) in memory.iter().enumerate() {
      match Some(i) == highlight {

        true  => {
          table.add_row(row![r->format!("* --> M[{}] =", i), format!("{}", cell)]);
        }

        false if *cell != 0 => {
          table.add_row(row![r->format!("M[{}] =", i), format!("{}", cell)]);
        }

        false => {}

      } // end match on highlight
    } // end for
    table
  }

  // endregion

  // region Low-level utility methods

  pub fn new() -> UVM {
    UVM::with_config(InterpreterConfig::default())
  }

  pub fn with_config(config: InterpreterConfig) -> UVM {
    UVM {
      memory      :  vec![0; config.memory_size],
      accumulator :  0,
      executed    :  0,
      last_access :  None,
      config
    }
  }

  pub fn memory(&self) -> &[Cell] {
    &self.memory
  }

  /// For seeding memory before a run.
  pub fn memory_mut(&mut self) -> &mut [Cell] {
    &mut self.memory
  }

  pub fn accumulator(&self) -> Cell {
    self.accumulator
  }

  pub fn executed(&self) -> usize {
    self.executed
  }

  fn index_fault(&self, address: AddressType) -> UvmError {
    UvmError::IndexFault {
      index       : address,
      memory_size : self.memory.len(),
      position    : self.executed
    }
  }

  /// Reads a memory cell. Addresses are never wrapped or clamped.
  fn value_at(&mut self, address: AddressType) -> Result<Cell> {
    match self.memory.get(address) {
      Some(cell) => {
        let value = *cell;
        self.last_access = Some(address);
        Ok(value)
      }
      None       => Err(self.index_fault(address))
    }
  }

  fn set_value_at(&mut self, address: AddressType, value: Cell) -> Result<()> {
    if address >= self.memory.len() {
      return Err(self.index_fault(address));
    }
    self.memory[address] = value;
    self.last_access = Some(address);
    Ok(())
  }

  // endregion

  // region Interpretation

  /// Slices a bytecode stream into instructions according to the configured truncation policy.
  pub fn load_program(&self, bytes: &[u8]) -> Result<Vec<Instruction>> {
    decode_program(bytes, self.config.truncation)
  }

  /**
    Executes one instruction. An opcode without semantics fails with
    `UvmError::UnknownInstruction`; effects of earlier instructions are kept.
  */
  pub fn step(&mut self, instruction: Instruction) -> Result<()> {
    let operand = instruction.operand();

    match instruction.operation() {
      Some(Operation::LoadConstant) => self.load_constant(operand),
      Some(Operation::LoadMemory)   => self.load_memory(operand as AddressType)?,
      Some(Operation::Store)        => self.store(operand as AddressType)?,
      Some(Operation::Equal)        => self.equal(operand as AddressType)?,
      None                          => {
        return Err(
          UvmError::UnknownInstruction {
            opcode   : instruction.opcode(),
            position : self.executed
          }
        );
      }
    }

    self.executed += 1;
    Ok(())
  }

  /// Executes the instructions in order, stopping at the first error.
  pub fn run(&mut self, program: &[Instruction]) -> Result<()> {
    for instruction in program {
      self.step(*instruction)?;

      #[cfg(feature = "trace_computation")] println!("{}", self);
    }
    Ok(())
  }

  /// Decodes and runs a bytecode stream, then exports the requested memory window.
  pub fn execute(&mut self, bytes: &[u8], range: MemoryRange) -> Result<Vec<Cell>> {
    let program = self.load_program(bytes)?;

    #[cfg(feature = "trace_computation")]
    println!("# Loaded Program\n{}", disassemble(&program));

    self.run(&program)?;
    Ok(self.export_memory(range.start, range.end).to_vec())
  }

  /// Returns `memory[start..end]`, clamped to the memory like a slice in dynamic languages.
  pub fn export_memory(&self, start: AddressType, end: AddressType) -> &[Cell] {
    &self.memory[MemoryRange::new(start, end).clamp(self.memory.len())]
  }

  // endregion

  // region VM instruction methods

  /// Sets the accumulator to the operand itself.
  fn load_constant(&mut self, operand: Word) {
    #[cfg(feature = "trace_computation")] println!("load_constant({})", operand);
    self.accumulator = operand as Cell;
  }

  fn load_memory(&mut self, address: AddressType) -> Result<()> {
    #[cfg(feature = "trace_computation")] println!("load_memory(M[{}])", address);
    self.accumulator = self.value_at(address)?;
    Ok(())
  }

  fn store(&mut self, address: AddressType) -> Result<()> {
    #[cfg(feature = "trace_computation")] println!("store(M[{}])", address);
    self.set_value_at(address, self.accumulator)
  }

  /// Sets the accumulator to 1 if it equals the memory cell and to 0 otherwise.
  fn equal(&mut self, address: AddressType) -> Result<()> {
    #[cfg(feature = "trace_computation")] println!("equal(M[{}])", address);
    let value = self.value_at(address)?;
    self.accumulator = match self.accumulator == value {
      true  => 1,
      false => 0
    };
    Ok(())
  }

  // endregion

}

impl Default for UVM {
  fn default() -> UVM {
    UVM::new()
  }
}


lazy_static! {
  static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

impl Display for UVM {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let m_table = UVM::make_memory_table(&self.memory, self.last_access);

    write!(
      f,
      "Accumulator: {}\tExecuted: {}\n{}",
      self.accumulator, self.executed, m_table
    )
  }
}
