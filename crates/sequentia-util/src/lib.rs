//! sequentia-util - Shared foundation types
//!
//! Every Sequentia compiler stage (lexer, parser, semantic analyzer, TAC
//! generator/optimizer, lowering backend) raises one of a small, closed set
//! of error kinds. This crate defines those kinds plus the top-level error
//! enum the driver matches on to pick an exit code.
//!
//! The pipeline is intentionally line/column-free: the lexer is stateless
//! beyond its cursor and diagnostics are message-only.

pub mod error;

pub use error::{LexError, LowerError, ParseError, SemanticError, SequentiaError, TacError};
