//! Core error types shared across the compiler pipeline.

use thiserror::Error;

/// Raised by the lexer (C1) on a malformed byte in the source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unknown character {0}")]
    UnknownCharacter(char),
}

/// Raised by the parser (C2): token mismatch, missing delimiter, illegal
/// statement/primary start, or an invalid pattern keyword.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Expected {expected}, got {got}")]
    Expected { expected: String, got: String },

    #[error("Invalid statement start {0}")]
    InvalidStatementStart(String),

    #[error("Invalid expression start {0}")]
    InvalidExpressionStart(String),

    #[error("Invalid pattern keyword")]
    InvalidPatternKeyword,

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

/// Raised by the semantic analyzer (C3): undefined name, kind mismatch,
/// non-integer index, invalid pattern argument, non-array `for` source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    #[error("Undefined variable {0}")]
    UndefinedVariable(String),

    #[error("Undefined array {0}")]
    UndefinedArray(String),

    #[error("{0} is not an array")]
    NotAnArray(String),

    #[error("{0} is not a scalar integer")]
    NotAScalar(String),

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("Invalid pattern argument")]
    InvalidPatternArgument,

    #[error("For loop source must be an array")]
    ForSourceNotArray,
}

/// Raised while generating or optimizing three-address code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TacError {
    #[error("Unresolved label {0}")]
    UnresolvedLabel(String),

    #[error("Unknown pattern {0}")]
    UnknownPattern(String),

    #[error("Malformed slice range {0}")]
    MalformedRange(String),
}

/// Raised while lowering the AST to executable target text, or while
/// executing the reference interpreter over it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LowerError {
    #[error("Undefined variable {0}")]
    UndefinedVariable(String),

    #[error("Not an array: {0}")]
    NotAnArray(String),

    #[error("Index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },

    #[error("Unknown pattern {0}")]
    UnknownPattern(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// Aggregate error type returned by `compile()` and surfaced by the driver.
/// Each compilation is a fatal boundary on the first error raised by any
/// stage: no stage retries, and no partial output is produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequentiaError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Semantic(#[from] SemanticError),

    #[error(transparent)]
    Tac(#[from] TacError),

    #[error(transparent)]
    Lower(#[from] LowerError),
}
