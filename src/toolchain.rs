/*!
  Whole-file steps behind the command line. Each step reads its inputs completely, computes in
  memory, and only then writes its outputs. A failed assembly therefore writes nothing. A failed
  run writes no result file.
*/

use std::fs;
use std::path::Path;

use crate::address::MemoryRange;
use crate::bytecode::{Assembler, Instruction};
use crate::config::InterpreterConfig;
use crate::error::Result;
use crate::report::{render_log, render_memory};
use crate::uvm::UVM;

/// Assembles `source` and writes the bytecode to `binary` and the YAML log to `log`.
pub fn assemble_file(source: &Path, binary: &Path, log: &Path) -> Result<Vec<Instruction>> {
  let text = fs::read_to_string(source)?;
  let mut assembler = Assembler::new();
  assembler.assemble(&text)?;

  let bytes = assembler.emit_binary();
  let log_text = render_log(&assembler.emit_log())?;

  fs::write(binary, &bytes)?;
  fs::write(log, log_text)?;

  #[cfg(feature = "trace_computation")]
  println!("Compiled to {} bytes of bytecode.", bytes.len());

  Ok(assembler.instructions().to_vec())
}

/**
  Runs the bytecode in `binary` on a fresh machine and writes `range` of its memory to `result`
  as YAML. Returns the machine for inspection.
*/
pub fn interpret_file(
  binary : &Path,
  result : &Path,
  range  : MemoryRange,
  config : InterpreterConfig
) -> Result<UVM> {
  let bytes = fs::read(binary)?;

  let mut machine = UVM::with_config(config);
  let window = machine.execute(&bytes, range)?;
  fs::write(result, render_memory(&window)?)?;

  Ok(machine)
}
