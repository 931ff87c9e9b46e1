//! sequentia-par - Recursive-descent parsing (C2)
//!
//! Consumes the token stream from `sequentia-lex` and produces the AST
//! consumed by `sequentia-sem` and `sequentia-tac`.

pub mod ast;
mod parser;
pub mod pattern;

pub use ast::{Assign, BinOpKind, Expr, ForStmt, IfStmt, PatternKind, Program, Stmt};
pub use parser::{parse, Parser};
