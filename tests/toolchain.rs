use std::fs;
use std::path::PathBuf;

use uvm::report::LogRecord;
use uvm::toolchain::{assemble_file, interpret_file};
use uvm::{Cell, InterpreterConfig, MemoryRange, Truncation, UvmError};

/// A scratch directory unique to one test.
fn scratch(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("uvm-{}-{}", name, std::process::id()));
  fs::create_dir_all(&dir).unwrap();
  dir
}

const COMPARE: &str = "# compare two stored constants
ldc 42
st 0
ldc 99
st 1

ldr 0
eq 1
";

#[test]
fn assemble_then_interpret(){
  let dir = scratch("pipeline");
  let source = dir.join("program.asm");
  let binary = dir.join("program.bin");
  let log    = dir.join("program.yml");
  let result = dir.join("result.yml");
  fs::write(&source, COMPARE).unwrap();

  let program = assemble_file(&source, &binary, &log).unwrap();
  assert_eq!(program.len(), 6);
  assert_eq!(fs::read(&binary).unwrap().len(), 24);

  let records: Vec<LogRecord> = serde_yaml::from_str(&fs::read_to_string(&log).unwrap()).unwrap();
  let mnemonics: Vec<&str> = records.iter().map(|r| r.mnemonic.as_str()).collect();
  assert_eq!(mnemonics, vec!["ldc", "st", "ldc", "st", "ldr", "eq"]);
  assert_eq!(records[2].operand, 99);

  let machine = interpret_file(
    &binary, &result, MemoryRange::new(0, 2), InterpreterConfig::default()
  ).unwrap();
  assert_eq!(machine.accumulator(), 0);

  let window: Vec<Cell> = serde_yaml::from_str(&fs::read_to_string(&result).unwrap()).unwrap();
  assert_eq!(window, vec![42, 99]);

  fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn log_records_operands_as_written(){
  let dir = scratch("raw-operands");
  let source = dir.join("program.asm");
  let binary = dir.join("program.bin");
  let log    = dir.join("program.yml");
  fs::write(&source, "ldc -1\nst\x0c3\n").unwrap();

  let program = assemble_file(&source, &binary, &log).unwrap();
  assert_eq!(program[0].operand(), 0x0FFF_FFFF);
  assert_eq!(program[1].operand(), 3);

  let records: Vec<LogRecord> = serde_yaml::from_str(&fs::read_to_string(&log).unwrap()).unwrap();
  let operands: Vec<i64> = records.iter().map(|r| r.operand).collect();
  assert_eq!(operands, vec![-1, 3]);

  fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn failed_assembly_writes_nothing(){
  let dir = scratch("failed-assembly");
  let source = dir.join("program.asm");
  let binary = dir.join("program.bin");
  let log    = dir.join("program.yml");
  fs::write(&source, "ldc 1\nxyz 2\n").unwrap();

  let result = assemble_file(&source, &binary, &log);
  assert!(matches!(result, Err(UvmError::UnknownMnemonic{ line: Some(2), .. })));
  assert!(!binary.exists());
  assert!(!log.exists());

  fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn window_past_memory_is_clamped(){
  let dir = scratch("clamped");
  let binary = dir.join("program.bin");
  let result = dir.join("result.yml");
  // ldc 7, st 1023
  fs::write(&binary, [0x72, 0x00, 0x00, 0x00, 0xFB, 0x3F, 0x00, 0x00]).unwrap();

  interpret_file(
    &binary, &result, "1022:5000".parse().unwrap(), InterpreterConfig::default()
  ).unwrap();
  let window: Vec<Cell> = serde_yaml::from_str(&fs::read_to_string(&result).unwrap()).unwrap();
  assert_eq!(window, vec![0, 7]);

  fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn strict_mode_rejects_partial_instruction(){
  let dir = scratch("strict");
  let binary = dir.join("program.bin");
  let result = dir.join("result.yml");
  fs::write(&binary, [0x72, 0x00, 0x00, 0x00, 0xFB]).unwrap();

  let config = InterpreterConfig::default().with_truncation(Truncation::Strict);
  let outcome = interpret_file(&binary, &result, MemoryRange::new(0, 1), config);
  assert!(matches!(outcome, Err(UvmError::MalformedInput{ offset: 4, length: 1 })));
  assert!(!result.exists());

  fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_input_file(){
  let dir = scratch("missing");
  let outcome = interpret_file(
    &dir.join("absent.bin"), &dir.join("result.yml"), MemoryRange::new(0, 1),
    InterpreterConfig::default()
  );
  assert!(matches!(outcome, Err(UvmError::Io(_))));

  fs::remove_dir_all(&dir).unwrap();
}
