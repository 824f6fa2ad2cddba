//! Tests for the assembly program loader.

use mips_simulator::isa::Opcode;
use mips_simulator::sim::loader;

/// Every operation in the subset parses with its operands in the right
/// fields.
#[test]
fn test_parses_each_operation() {
    let source = "\
add $t2, $t0, $t1
sub $s0, $t2, $t0
addi $t0, $zero, 5
lw $t3, 8($sp)
sw $t3, -4($sp)
";
    let loaded = loader::load_program(source);
    assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
    assert_eq!(loaded.instructions.len(), 5);

    let add = &loaded.instructions[0];
    assert_eq!(add.opcode, Opcode::Add);
    assert_eq!((add.rd, add.rs, add.rt), (Some(10), Some(8), Some(9)));

    let addi = &loaded.instructions[2];
    assert_eq!(addi.opcode, Opcode::Addi);
    assert_eq!((addi.rt, addi.rs, addi.imm), (Some(8), Some(0), Some(5)));

    let lw = &loaded.instructions[3];
    assert_eq!(lw.opcode, Opcode::Lw);
    assert_eq!((lw.rt, lw.imm, lw.rs), (Some(11), Some(8), Some(29)));

    let sw = &loaded.instructions[4];
    assert_eq!(sw.opcode, Opcode::Sw);
    assert_eq!(sw.imm, Some(-4), "negative offsets parse");
}

/// Branch targets resolve to absolute instruction indices, including
/// forward references.
#[test]
fn test_branch_labels_resolve_to_instruction_indices() {
    let source = "\
start:
addi $t0, $zero, 1
beq $t0, $zero, end
nop
addi $t1, $zero, 2
end:
beq $zero, $zero, start
";
    let loaded = loader::load_program(source);
    assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
    // The nop line is dropped from the stream.
    assert_eq!(loaded.instructions.len(), 4);

    let forward = &loaded.instructions[1];
    assert_eq!(forward.opcode, Opcode::Beq);
    assert_eq!(forward.imm, Some(3), "'end' labels the final beq");

    let backward = &loaded.instructions[3];
    assert_eq!(backward.imm, Some(0), "'start' labels the first instruction");
}

/// Comments, blank lines and assembler directives produce no instructions.
#[test]
fn test_comments_and_directives_are_ignored() {
    let source = "\
.data
# a full-line comment

.text
addi $t0, $zero, 1   # trailing comment
";
    let loaded = loader::load_program(source);
    assert!(loaded.diagnostics.is_empty());
    assert_eq!(loaded.instructions.len(), 1);
    assert_eq!(loaded.instructions[0].text, "addi $t0, $zero, 1");
}

/// A malformed line is skipped with a diagnostic; the rest of the program
/// still loads.
#[test]
fn test_malformed_lines_are_skipped_not_fatal() {
    let source = "\
addi $t0, $zero, 1
mul $t1, $t0, $t0
addi $t2, $qq, 2
addi $t3, $zero, banana
addi $t1, $zero, 3
";
    let loaded = loader::load_program(source);
    assert_eq!(loaded.instructions.len(), 2, "two valid instructions remain");
    assert_eq!(loaded.diagnostics.len(), 3);
    assert_eq!(loaded.diagnostics[0].line, 2);
    assert!(loaded.diagnostics[0].reason.contains("unrecognized operation"));
    assert!(loaded.diagnostics[1].reason.contains("invalid register"));
    assert!(loaded.diagnostics[2].reason.contains("invalid immediate"));
}

/// A branch to a label that never appears is a diagnostic, not a panic.
#[test]
fn test_unknown_branch_label_is_a_diagnostic() {
    let source = "beq $t0, $t1, nowhere\n";
    let loaded = loader::load_program(source);
    assert!(loaded.instructions.is_empty());
    assert_eq!(loaded.diagnostics.len(), 1);
    assert!(loaded.diagnostics[0].reason.contains("nowhere"));
}

/// Zero valid instructions is an ordinary empty result.
#[test]
fn test_empty_source_loads_empty_program() {
    let loaded = loader::load_program("");
    assert!(loaded.instructions.is_empty());
    assert!(loaded.diagnostics.is_empty());
}

/// Numeric register names are accepted alongside conventional ones.
#[test]
fn test_numeric_register_names() {
    let loaded = loader::load_program("add $10, $8, $9\n");
    assert!(loaded.diagnostics.is_empty());
    let add = &loaded.instructions[0];
    assert_eq!((add.rd, add.rs, add.rt), (Some(10), Some(8), Some(9)));
}

/// Instructions keep their original source text for trace display.
#[test]
fn test_source_text_is_preserved() {
    let loaded = loader::load_program("lw $t0, 0($sp)\n");
    assert_eq!(loaded.instructions[0].text, "lw $t0, 0($sp)");
}
