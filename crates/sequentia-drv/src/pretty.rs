//! Diagnostic pretty printers (C7).
//!
//! Every section uses the same banner: 70 `=` characters, a title line, 70
//! more `=` characters. Exact column widths and placeholder text below are
//! load-bearing — they're what a caller diffs against.

use sequentia_lex::Token;
use sequentia_par::{Expr, Program, Stmt};
use sequentia_sem::SymbolTable;
use sequentia_tac::Instr;

const BANNER_WIDTH: usize = 70;

fn banner(title: &str) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    format!("{rule}\n{title}\n{rule}")
}

pub fn format_tokens(tokens: &[Token]) -> String {
    let mut lines = vec![banner("LEXER OUTPUT (Tokens)")];
    for (i, tok) in tokens.iter().enumerate() {
        let kind = tok.kind_name();
        let rendered = match tok {
            Token::Newline => "'\\n'".to_string(),
            Token::Eof => "(end of file)".to_string(),
            other => format!("'{}'", other.lexeme()),
        };
        lines.push(format!("{i:3}. {kind:<15} {rendered}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_ast(program: &Program) -> String {
    let mut lines = vec!["Program:".to_string()];
    for stmt in &program.stmts {
        format_stmt(stmt, 1, &mut lines);
    }
    lines.join("\n")
}

fn format_stmt(stmt: &Stmt, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match stmt {
        Stmt::Assign(a) => {
            lines.push(format!("{pad}Assign: {} =", a.name));
            format_expr(&a.expr, indent + 1, lines);
        }
        Stmt::Print(expr) => match expr {
            Expr::Id(name) => lines.push(format!("{pad}Print: {name}")),
            Expr::ArrayAccess { name, .. } => {
                lines.push(format!("{pad}Print: {name}[index]"));
                format_expr(expr, indent + 1, lines);
            }
            other => {
                lines.push(format!("{pad}Print:"));
                format_expr(other, indent + 1, lines);
            }
        },
        Stmt::If(s) => {
            lines.push(format!("{pad}If:"));
            lines.push(format!("{pad}  Condition:"));
            format_expr(&s.condition, indent + 2, lines);
            lines.push(format!("{pad}  Then:"));
            for inner in &s.then_block {
                format_stmt(inner, indent + 2, lines);
            }
            if let Some(else_block) = &s.else_block {
                lines.push(format!("{pad}  Else:"));
                for inner in else_block {
                    format_stmt(inner, indent + 2, lines);
                }
            }
        }
        Stmt::For(s) => {
            lines.push(format!("{pad}For: {} in {}", s.iterator, expr_summary(&s.source)));
            lines.push(format!("{pad}  Body:"));
            for inner in &s.body {
                format_stmt(inner, indent + 2, lines);
            }
        }
    }
}

fn expr_summary(expr: &Expr) -> String {
    match expr {
        Expr::Id(name) => name.clone(),
        Expr::Number(n) => n.to_string(),
        other => format!("{other:?}"),
    }
}

fn format_expr(expr: &Expr, indent: usize, lines: &mut Vec<String>) {
    let pad = "  ".repeat(indent);
    match expr {
        Expr::Number(n) => lines.push(format!("{pad}Number: {n}")),
        Expr::Id(name) => lines.push(format!("{pad}ID: {name}")),
        Expr::ArrayAccess { name, index } => {
            lines.push(format!("{pad}ArrayAccess: {name}[index]"));
            format_expr(index, indent + 1, lines);
        }
        Expr::Slice { name, start, end } => {
            lines.push(format!("{pad}Slice: {name}[..]"));
            if let Some(s) = start {
                lines.push(format!("{pad}  Start:"));
                format_expr(s, indent + 2, lines);
            }
            if let Some(e) = end {
                lines.push(format!("{pad}  End:"));
                format_expr(e, indent + 2, lines);
            }
        }
        Expr::BinOp { left, op, right } => {
            lines.push(format!("{pad}BinOp: {}", op.as_str()));
            lines.push(format!("{pad}  Left:"));
            format_expr(left, indent + 2, lines);
            lines.push(format!("{pad}  Right:"));
            format_expr(right, indent + 2, lines);
        }
        Expr::Pattern { kind, args } => {
            lines.push(format!("{pad}PatternExpr: {}", kind.as_str()));
            for arg in args {
                format_expr(arg, indent + 1, lines);
            }
        }
    }
}

pub fn format_symbol_table(symbols: &SymbolTable) -> String {
    let mut lines = vec![banner("SYMBOL TABLE")];
    lines.push(format!("{:<15} {:<10} {:<10} {:<15}", "Variable", "Type", "Length", "Pattern"));
    lines.push("-".repeat(BANNER_WIDTH));
    for symbol in symbols.iter() {
        let length_str = match symbol.ty {
            sequentia_sem::SymType::Int => "-".to_string(),
            sequentia_sem::SymType::Array => symbol.length.map(|n| n.to_string()).unwrap_or_else(|| "dynamic".to_string()),
        };
        let pattern_str = symbol.pattern.map(|p| p.as_str().to_string()).unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "{:<15} {:<10} {:<10} {:<15}",
            symbol.name,
            symbol.ty.as_str(),
            length_str,
            pattern_str
        ));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_tac(title: &str, instructions: &[Instr]) -> String {
    let mut lines = vec![banner(title)];
    for (i, instr) in instructions.iter().enumerate() {
        lines.push(format!("{i:3}. {instr}"));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn format_optimizations(original_len: usize, optimized_len: usize) -> String {
    let mut lines = vec![banner("CODE OPTIMIZATION")];
    lines.push(format!("Original TAC instructions: {original_len}"));
    lines.push(format!("Optimized TAC instructions: {optimized_len}"));
    lines.push(format!("Reduction: {} instructions", original_len.saturating_sub(optimized_len)));
    lines.push(String::new());
    lines.join("\n")
}

/// Renders the `PROGRAM OUTPUT` section. The REPL shows a placeholder on
/// empty output; batch (file) mode always prints the captured stdout
/// verbatim, even when it's empty.
pub fn format_program_output(out: &str, show_empty_placeholder: bool) -> String {
    let mut lines = vec![banner("PROGRAM OUTPUT")];
    if out.is_empty() && show_empty_placeholder {
        lines.push("(no output - use 'print' statement to display values)".to_string());
    } else {
        lines.push(out.trim_end_matches('\n').to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}
