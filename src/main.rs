use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use uvm::config::{InterpreterConfig, Truncation, DEFAULT_MEMORY_SIZE};
use uvm::toolchain::{assemble_file, interpret_file};
use uvm::MemoryRange;

/// Assembler and interpreter for the UVM accumulator machine
#[derive(Parser, Debug)]
#[command(name = "uvm", version, about, long_about = None)]
struct Args {
  #[command(subcommand)]
  command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Assemble a source program into bytecode and a YAML log
  Assemble {
    /// Assembly source file
    source: PathBuf,
    /// Bytecode output file
    binary: PathBuf,
    /// YAML log output file
    log: PathBuf
  },

  /// Run a bytecode program and write a window of memory as YAML
  Interpret {
    /// Bytecode input file
    binary: PathBuf,
    /// YAML result output file
    result: PathBuf,
    /// Memory window to export, as `start:end`
    memory_range: MemoryRange,
    /// Number of memory cells
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    memory_size: usize,
    /// Reject bytecode whose length is not a multiple of 4 instead of dropping the tail
    #[arg(long)]
    strict: bool
  }
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  match args.command {

    Command::Assemble { source, binary, log } => {
      assemble_file(&source, &binary, &log)
        .with_context(|| format!("failed to assemble {}", source.display()))?;
    }

    Command::Interpret { binary, result, memory_range, memory_size, strict } => {
      let truncation = match strict {
        true  => Truncation::Strict,
        false => Truncation::Silent
      };
      let config = InterpreterConfig::default()
        .with_memory_size(memory_size)
        .with_truncation(truncation);

      interpret_file(&binary, &result, memory_range, config)
        .with_context(|| format!("failed to interpret {}", binary.display()))?;
    }

  }

  Ok(())
}
