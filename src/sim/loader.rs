//! Assembly program loader.
//!
//! Parses the six-operation MIPS subset from text: comments are stripped,
//! labels are collected and resolved to absolute instruction indices before
//! the core ever sees a branch, and malformed lines are skipped with a
//! recorded diagnostic rather than aborting the load.

use std::collections::HashMap;
use std::fs;
use std::process;

use crate::isa::{abi, Instruction};

/// Result of loading a program: the valid instruction stream plus one
/// diagnostic per skipped line.
#[derive(Debug)]
pub struct LoadedProgram {
    pub instructions: Vec<Instruction>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A skipped source line and the reason it was rejected.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// 1-based source line number.
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// Reads an assembly source file from disk.
pub fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read file '{}': {}", path, e);
        process::exit(1);
    })
}

/// Parses assembly source into an instruction stream.
///
/// Label lines (`NAME:`), directive lines (`.data` ...), comments and blank
/// lines produce no instructions. `nop` lines are accepted and dropped from
/// the stream. Unparseable lines are skipped and reported; an empty result
/// is an ordinary outcome, not an error.
pub fn load_program(source: &str) -> LoadedProgram {
    let mut labels: HashMap<String, usize> = HashMap::new();
    let mut parsed: Vec<(usize, String, Parsed)> = Vec::new();
    let mut diagnostics = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('.') {
            continue;
        }
        if let Some(name) = line.strip_suffix(':') {
            let _ = labels.insert(name.trim().to_string(), parsed.len());
            continue;
        }
        match parse_line(line) {
            Ok(Some(p)) => parsed.push((idx + 1, line.to_string(), p)),
            Ok(None) => {}
            Err(reason) => diagnostics.push(Diagnostic {
                line: idx + 1,
                text: line.to_string(),
                reason,
            }),
        }
    }

    // Branch targets can reference labels defined later, so they resolve in
    // a second pass once every label index is known.
    let mut instructions = Vec::with_capacity(parsed.len());
    for (line, text, p) in parsed {
        match p {
            Parsed::Instr(inst) => instructions.push(inst.with_text(&text)),
            Parsed::Branch { rs, rt, label } => match labels.get(&label) {
                Some(&target) => {
                    instructions.push(Instruction::beq(rs, rt, target).with_text(&text));
                }
                None => diagnostics.push(Diagnostic {
                    line,
                    text,
                    reason: format!("unknown branch label '{}'", label),
                }),
            },
        }
    }

    LoadedProgram {
        instructions,
        diagnostics,
    }
}

enum Parsed {
    Instr(Instruction),
    Branch { rs: usize, rt: usize, label: String },
}

fn parse_line(line: &str) -> Result<Option<Parsed>, String> {
    let normalized = line.replace([',', '(', ')'], " ");
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let Some((&mnemonic, operands)) = tokens.split_first() else {
        return Ok(None);
    };

    match mnemonic.to_ascii_lowercase().as_str() {
        "nop" => Ok(None),
        "add" | "sub" => {
            let [rd, rs, rt] = operand_slots(operands)?;
            let rd = register(rd)?;
            let rs = register(rs)?;
            let rt = register(rt)?;
            let inst = if mnemonic.eq_ignore_ascii_case("add") {
                Instruction::add(rd, rs, rt)
            } else {
                Instruction::sub(rd, rs, rt)
            };
            Ok(Some(Parsed::Instr(inst)))
        }
        "addi" => {
            let [rt, rs, imm] = operand_slots(operands)?;
            let rt = register(rt)?;
            let rs = register(rs)?;
            let imm = immediate(imm)?;
            Ok(Some(Parsed::Instr(Instruction::addi(rt, rs, imm))))
        }
        "lw" | "sw" => {
            let [rt, offset, rs] = operand_slots(operands)?;
            let rt = register(rt)?;
            let offset = immediate(offset)?;
            let rs = register(rs)?;
            let inst = if mnemonic.eq_ignore_ascii_case("lw") {
                Instruction::lw(rt, offset, rs)
            } else {
                Instruction::sw(rt, offset, rs)
            };
            Ok(Some(Parsed::Instr(inst)))
        }
        "beq" => {
            let [rs, rt, label] = operand_slots(operands)?;
            let rs = register(rs)?;
            let rt = register(rt)?;
            Ok(Some(Parsed::Branch {
                rs,
                rt,
                label: label.to_string(),
            }))
        }
        other => Err(format!("unrecognized operation '{}'", other)),
    }
}

fn operand_slots<'a>(operands: &[&'a str]) -> Result<[&'a str; 3], String> {
    match operands {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(format!("expected 3 operands, found {}", operands.len())),
    }
}

fn register(token: &str) -> Result<usize, String> {
    abi::register_index(token).ok_or_else(|| format!("invalid register '{}'", token))
}

fn immediate(token: &str) -> Result<i32, String> {
    token
        .parse::<i32>()
        .map_err(|_| format!("invalid immediate '{}'", token))
}
