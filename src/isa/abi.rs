//! MIPS register naming conventions.
//!
//! Maps the symbolic register names used in assembly source (`$t0`, `$sp`,
//! ...) to architectural register indices. The loader resolves names through
//! this table so the core only ever sees indices in 0-31.

/// The hard-wired zero register.
pub const REG_ZERO: usize = 0;
/// Stack pointer.
pub const REG_SP: usize = 29;
/// Return address.
pub const REG_RA: usize = 31;

/// Resolves a symbolic register name to its architectural index.
///
/// Accepts both conventional names (`$t0`, `$sp`) and raw numeric names
/// (`$0` through `$31`). Returns `None` for anything unrecognized.
pub fn register_index(name: &str) -> Option<usize> {
    let idx = match name.to_ascii_lowercase().as_str() {
        "$zero" => 0,
        "$at" => 1,
        "$v0" => 2,
        "$v1" => 3,
        "$a0" => 4,
        "$a1" => 5,
        "$a2" => 6,
        "$a3" => 7,
        "$t0" => 8,
        "$t1" => 9,
        "$t2" => 10,
        "$t3" => 11,
        "$t4" => 12,
        "$t5" => 13,
        "$t6" => 14,
        "$t7" => 15,
        "$s0" => 16,
        "$s1" => 17,
        "$s2" => 18,
        "$s3" => 19,
        "$s4" => 20,
        "$s5" => 21,
        "$s6" => 22,
        "$s7" => 23,
        "$t8" => 24,
        "$t9" => 25,
        "$k0" => 26,
        "$k1" => 27,
        "$gp" => 28,
        "$sp" => 29,
        "$fp" => 30,
        "$ra" => 31,
        other => {
            let numeric = other.strip_prefix('$')?.parse::<usize>().ok()?;
            if numeric < 32 {
                numeric
            } else {
                return None;
            }
        }
    };
    Some(idx)
}
