//! sequentia-lex - Lexical analysis (C1)
//!
//! Turns Sequentia source text into a flat token stream. Ordering of the
//! scan rules in [`lexer`] matters: keywords are recognized only after a
//! full identifier has been scanned, and two-character operators are tried
//! before falling back to their single-character prefix.

mod cursor;
mod lexer;
mod token;

pub use lexer::{lex, Lexer};
pub use token::{keyword_token, Token};
