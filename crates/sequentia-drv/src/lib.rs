//! sequentia-drv - Compiler driver and diagnostics (C7)
//!
//! Wires every pipeline crate together, renders the section-by-section
//! diagnostic dump, and exposes the REPL and batch-file CLI surfaces.

pub mod compile;
pub mod pretty;

pub use compile::{compile_and_run, CompileOutput};

/// Which CLI surface is rendering this report. The REPL shows a placeholder
/// for empty program output; batch (file) mode always prints the captured
/// stdout verbatim, even when it's empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Repl,
    Batch,
}

/// Renders the full diagnostic dump for one compiled program: tokens, AST,
/// symbol table, TAC before and after optimization, and program output.
pub fn render_report(output: &CompileOutput, mode: Mode) -> String {
    let mut sections = Vec::new();
    sections.push(pretty::format_tokens(&output.tokens));
    sections.push(format!(
        "{}\n{}\n{}\n",
        "=".repeat(70),
        "ABSTRACT SYNTAX TREE (AST)",
        "=".repeat(70)
    ));
    sections.push(pretty::format_ast(&output.ast));
    sections.push(String::new());
    sections.push(pretty::format_symbol_table(&output.symbols));
    sections.push(pretty::format_tac("THREE-ADDRESS CODE (TAC)", &output.original_tac));
    sections.push(pretty::format_optimizations(output.original_tac.len(), output.optimized_tac.len()));
    sections.push(pretty::format_tac("OPTIMIZED THREE-ADDRESS CODE", &output.optimized_tac));
    sections.push(pretty::format_program_output(
        &output.program_output,
        mode == Mode::Repl,
    ));
    sections.join("\n")
}
