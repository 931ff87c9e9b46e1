//! Sequentia compiler CLI.
//!
//! With no arguments, starts an interactive REPL: blank line compiles and
//! runs everything entered so far, `Ctrl-C`/`Ctrl-D` exits. With one
//! argument, treats it as a source file path and compiles it once.

use std::fs;

use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use sequentia_drv::{compile_and_run, render_report, Mode};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() == 1 {
        repl()
    } else {
        run_file(&args[1])
    }
}

fn repl() -> anyhow::Result<()> {
    println!("{}", "=".repeat(70));
    println!("{}", "SEQUENTIA COMPILER - REPL Mode".bold());
    println!("{}", "=".repeat(70));
    println!("Parser Type: Recursive Descent (Top-Down Parser)");
    println!("Pipeline: Lexer -> Parser -> Semantic Analysis -> TAC -> Optimization");
    println!();
    println!("Enter lines, empty line to compile and run. Ctrl-C / Ctrl-D to exit.");
    println!("{}", "=".repeat(70));
    println!();

    let mut editor = DefaultEditor::new()?;
    let mut lines: Vec<String> = Vec::new();

    loop {
        match editor.readline(">>> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    if lines.is_empty() {
                        continue;
                    }
                    let source = format!("{}\n", lines.join("\n"));
                    run_and_print(&source, Mode::Repl);
                    lines.clear();
                } else {
                    let _ = editor.add_history_entry(line.as_str());
                    lines.push(line);
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("Exiting REPL.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_file(path: &str) -> anyhow::Result<()> {
    let source = fs::read_to_string(path)?;
    run_and_print(&source, Mode::Batch);
    Ok(())
}

fn run_and_print(source: &str, mode: Mode) {
    match compile_and_run(source) {
        Ok(output) => println!("{}", render_report(&output, mode)),
        Err(err) => eprintln!("{} {err}", "Compilation error:".red().bold()),
    }
}
