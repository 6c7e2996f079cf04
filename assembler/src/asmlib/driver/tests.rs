use std::path::Path;

use base::prelude::{Address, InstructionCatalog, NativeNumber};

use super::super::line::Word;
use super::super::program::Program;
use super::super::symbol::Label;
use super::super::types::{AssemblerFailure, ErrorKind, LineFailure};
use super::{compile, write_words};

fn catalog() -> InstructionCatalog {
    InstructionCatalog::from_entries(&[("HALT", 0), ("JMP", 1), ("ADD", 2)])
        .expect("test catalog should be valid")
}

fn compile_ok(source: &str) -> Vec<Word> {
    match compile(source, &catalog()) {
        Ok(words) => words,
        Err(e) => panic!("failed to compile {source:?}: {e}"),
    }
}

fn compile_failure(source: &str) -> AssemblerFailure {
    match compile(source, &catalog()) {
        Ok(words) => panic!("compiling {source:?} should have failed, got {words:?}"),
        Err(e) => e,
    }
}

fn values(words: &[Word]) -> Vec<i32> {
    words.iter().map(|w| w.value().value()).collect()
}

fn addr(n: u16) -> Word {
    Word::Address(Address::new(n))
}

fn num(n: i32) -> Word {
    Word::Number(NativeNumber::new(n))
}

#[test]
fn test_compile_label_reference() {
    let catalog = catalog();
    let add = catalog.get("ADD").unwrap().clone();
    let words = compile("foo:\n  ADD foo 0\n", &catalog).expect("should compile");
    assert_eq!(words, [Word::Opcode(add), addr(0), addr(0)]);
}

#[test]
fn test_compile_label_reference_with_colon() {
    assert_eq!(
        compile_ok("foo:\n  ADD foo: 0\n"),
        compile_ok("foo:\n  ADD foo 0\n")
    );
}

#[test]
fn test_compile_offset_pads_with_zeroes() {
    assert_eq!(compile_ok("5\nOffset 3\n7\n"), [num(5), num(0), num(0), num(7)]);
}

#[test]
fn test_compile_offset_at_start() {
    assert_eq!(compile_ok("Offset 2\n1\n"), [num(0), num(0), num(1)]);
}

#[test]
fn test_compile_offset_equal_to_address() {
    assert_eq!(compile_ok("5\nOffset 1\n6\n"), [num(5), num(6)]);
}

#[test]
fn test_compile_offset_backwards() {
    match compile_failure("5\nOffset 0\n") {
        AssemblerFailure::Line {
            line_number: 2,
            failure: LineFailure::InvalidOffset { .. },
        } => (),
        other => panic!("expected an invalid offset on line 2, got {other:?}"),
    }
}

#[test]
fn test_compile_unknown_mnemonic() {
    let failure = compile_failure("BADOP 1\n");
    assert_eq!(failure.kind(), ErrorKind::InvalidSyntax);
    assert_eq!(failure.line_number(), Some(1));
    assert_eq!(failure.to_string(), "Line 1: Invalid syntax");
}

#[test]
fn test_compile_duplicate_label() {
    let failure = compile_failure("x:\n1\nx:\n");
    match &failure {
        AssemblerFailure::DuplicateLabel(label) if label.as_str() == "x" => (),
        other => panic!("expected x to be a duplicate label, got {other:?}"),
    }
    assert_eq!(failure.line_number(), None);
    assert_eq!(failure.to_string(), "Label x duplicated");
}

#[test]
fn test_compile_undefined_label() {
    let failure = compile_failure("JMP nowhere\n");
    assert_eq!(failure.kind(), ErrorKind::UndefinedLabel);
    assert_eq!(failure.to_string(), "Undefined label nowhere");
}

#[test]
fn test_compile_forward_reference() {
    let catalog = catalog();
    let jmp = catalog.get("JMP").unwrap().clone();
    let halt = catalog.get("HALT").unwrap().clone();
    let words = compile("JMP end\n1\n2\nend:\nHALT\n", &catalog).expect("should compile");
    assert_eq!(
        words,
        [Word::Opcode(jmp), addr(4), num(1), num(2), Word::Opcode(halt)]
    );
}

#[test]
fn test_compile_without_labels_never_fails_on_labels() {
    let words = compile_ok("1\n-2\n0x10\nJMP 3\nHALT\n");
    assert_eq!(values(&words), [1, -2, 16, 1, 3, 0]);
}

#[test]
fn test_compile_empty_source() {
    assert!(compile_ok("").is_empty());
    assert!(compile_ok("\n# nothing\n   \n").is_empty());
}

#[test]
fn test_compile_is_repeatable() {
    let source = "start:\nADD start end\nOffset 6\nend:\nJMP start\n";
    let first = compile_ok(source);
    let second = compile_ok(source);
    assert_eq!(first, second);
    assert_eq!(values(&first), [2, 0, 6, 0, 0, 0, 1, 0]);
}

#[test]
fn test_program_size_matches_output() {
    let source = "a:\n1\nOffset 10\nADD a b\nb:\nHALT\n";
    let catalog = catalog();
    let program = Program::parse(source, &catalog).expect("should parse");
    let labels = program.label_table().expect("labels should be unique");
    let words = program.encode(&labels).expect("should encode");
    assert_eq!(program.word_count(), words.len());
    assert_eq!(labels.get(&Label::try_from("b").unwrap()), Some(Address::new(13)));
}

#[test]
fn test_write_words() {
    let mut buf: Vec<u8> = Vec::new();
    let words = compile_ok("foo:\nADD foo 0x10\n-3\n");
    write_words(&mut buf, Path::new("test.out"), &words).expect("writing to memory should succeed");
    assert_eq!(String::from_utf8(buf).unwrap(), "2\n0\n16\n-3\n");
}

#[test]
fn test_listing() {
    let source = "start:\nJMP start\nOffset 8\n7\n";
    let catalog = catalog();
    let program = Program::parse(source, &catalog).expect("should parse");
    let labels = program.label_table().expect("labels should be unique");
    let listing = program.listing(source, &labels).expect("should list");
    let lines = listing.lines();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1].address(), Address::new(0));
    assert_eq!(lines[1].words().len(), 2);
    assert_eq!(lines[2].words().len(), 6);
    assert_eq!(lines[3].address(), Address::new(8));

    let text = listing.to_string();
    assert!(text.starts_with("Labels:\n"));
    assert!(text.contains("Program:\n"));
    assert!(text.contains("|JMP start"));
    assert!(text.contains("...+2"));
}

#[test]
fn test_compile_full_memory_with_trailing_comment() {
    for source in ["Offset 0xFFFF\n1\n# end\n", "Offset 0xFFFF\n1\n\n"] {
        let words = compile_ok(source);
        assert_eq!(words.len(), 0x10000);
        assert_eq!(words.last(), Some(&num(1)));
    }
}
