/*!
  A toolchain for the UVM, a minimal accumulator machine: the bytecode format, an assembler
  from text to bytecode, and an interpreter that runs bytecode against a flat memory.

  ```text
  source text -> [assemble] -> Instructions -> [emit_binary] -> bytecode
                                            -> [emit_log]    -> log records

  bytecode -> [UVM::load_program] -> Instructions -> [UVM::run] -> memory window
  ```
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod address;
pub mod bytecode;
pub mod config;
pub mod error;
pub mod report;
pub mod symboltable;
pub mod toolchain;
pub mod uvm;

pub use address::MemoryRange;
pub use config::{InterpreterConfig, Truncation};
pub use error::{Result, UvmError};
pub use uvm::{Cell, UVM};
