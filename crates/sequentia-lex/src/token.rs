//! Token definitions.
//!
//! A [`Token`] pairs a tag from the closed token set with whatever
//! literal lexeme produced it. Tagged variants make it impossible to
//! construct e.g. a `NUMBER` token carrying non-numeric text.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Number(i64),
    Id(String),
    Newline,
    Eof,

    Assign,
    Comma,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,

    Eq,
    Neq,
    Lt,
    Gt,
    Leq,
    Geq,

    Pattern,
    Print,
    If,
    Else,
    For,
    In,

    Fib,
    Fact,
    Square,
    Cube,
    Arith,
    Geo,
    Tri,
}

impl Token {
    /// The diagnostic tag name, e.g. `"NUMBER"`, `"PATTERN_KW"`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Number(_) => "NUMBER",
            Token::Id(_) => "ID",
            Token::Newline => "NEWLINE",
            Token::Eof => "EOF",
            Token::Assign => "ASSIGN",
            Token::Comma => "COMMA",
            Token::LBracket => "LBRACKET",
            Token::RBracket => "RBRACKET",
            Token::LBrace => "LBRACE",
            Token::RBrace => "RBRACE",
            Token::Colon => "COLON",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Star => "STAR",
            Token::Slash => "SLASH",
            Token::LParen => "LPAREN",
            Token::RParen => "RPAREN",
            Token::Eq => "EQ",
            Token::Neq => "NEQ",
            Token::Lt => "LT",
            Token::Gt => "GT",
            Token::Leq => "LEQ",
            Token::Geq => "GEQ",
            Token::Pattern => "PATTERN_KW",
            Token::Print => "PRINT_KW",
            Token::If => "IF_KW",
            Token::Else => "ELSE_KW",
            Token::For => "FOR_KW",
            Token::In => "IN_KW",
            Token::Fib => "FIB_KW",
            Token::Fact => "FACT_KW",
            Token::Square => "SQUARE_KW",
            Token::Cube => "CUBE_KW",
            Token::Arith => "ARITH_KW",
            Token::Geo => "GEO_KW",
            Token::Tri => "TRI_KW",
        }
    }

    /// The literal text that produced this token. Used by pretty-printing
    /// and by round-trip reconstruction of the source text.
    pub fn lexeme(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Id(s) => s.clone(),
            Token::Newline => "\n".to_string(),
            Token::Eof => String::new(),
            Token::Assign => "=".to_string(),
            Token::Comma => ",".to_string(),
            Token::LBracket => "[".to_string(),
            Token::RBracket => "]".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::Colon => ":".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Eq => "==".to_string(),
            Token::Neq => "!=".to_string(),
            Token::Lt => "<".to_string(),
            Token::Gt => ">".to_string(),
            Token::Leq => "<=".to_string(),
            Token::Geq => ">=".to_string(),
            Token::Pattern => "pattern".to_string(),
            Token::Print => "print".to_string(),
            Token::If => "if".to_string(),
            Token::Else => "else".to_string(),
            Token::For => "for".to_string(),
            Token::In => "in".to_string(),
            Token::Fib => "fibonacci".to_string(),
            Token::Fact => "factorial".to_string(),
            Token::Square => "square".to_string(),
            Token::Cube => "cube".to_string(),
            Token::Arith => "arithmetic".to_string(),
            Token::Geo => "geometric".to_string(),
            Token::Tri => "triangular".to_string(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind_name())
    }
}

/// Maps a keyword lexeme to its token, if it is one. Called after an
/// identifier has been fully scanned.
pub fn keyword_token(word: &str) -> Option<Token> {
    Some(match word {
        "pattern" => Token::Pattern,
        "print" => Token::Print,
        "if" => Token::If,
        "else" => Token::Else,
        "for" => Token::For,
        "in" => Token::In,
        "fibonacci" => Token::Fib,
        "factorial" => Token::Fact,
        "square" => Token::Square,
        "cube" => Token::Cube,
        "arithmetic" => Token::Arith,
        "geometric" => Token::Geo,
        "triangular" => Token::Tri,
        _ => return None,
    })
}
