//! End-to-end CLI tests: running the
//! compiled binary against a source file and checking its diagnostic dump.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn source_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("should create temp file");
    write!(file, "{contents}").expect("should write source");
    file
}

#[test]
fn fibonacci_program_prints_the_sequence() {
    let file = source_file("a = pattern fibonacci 8\nprint a\n");
    Command::cargo_bin("sequentia")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 1 1 2 3 5 8 13"));
}

#[test]
fn program_dump_includes_every_section_banner() {
    let file = source_file("x = 5\nprint x\n");
    Command::cargo_bin("sequentia")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("LEXER OUTPUT (Tokens)"))
        .stdout(predicate::str::contains("ABSTRACT SYNTAX TREE (AST)"))
        .stdout(predicate::str::contains("SYMBOL TABLE"))
        .stdout(predicate::str::contains("THREE-ADDRESS CODE (TAC)"))
        .stdout(predicate::str::contains("CODE OPTIMIZATION"))
        .stdout(predicate::str::contains("OPTIMIZED THREE-ADDRESS CODE"))
        .stdout(predicate::str::contains("PROGRAM OUTPUT"));
}

#[test]
fn for_loop_over_a_pattern_visits_every_element() {
    let file = source_file("a = pattern square 4\nfor v in a {\n  print v\n}\n");
    Command::cargo_bin("sequentia")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1\n4\n9\n16"));
}

#[test]
fn undefined_variable_is_reported_as_a_compilation_error() {
    let file = source_file("print missing\n");
    Command::cargo_bin("sequentia")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Compilation error"));
}

#[test]
fn batch_mode_prints_empty_output_verbatim_with_no_placeholder() {
    let file = source_file("x = 5\n");
    Command::cargo_bin("sequentia")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PROGRAM OUTPUT"))
        .stdout(predicate::str::contains("(no output - use 'print' statement to display values)").not());
}
