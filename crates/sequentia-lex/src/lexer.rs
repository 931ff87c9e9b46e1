//! The lexer proper: byte stream -> token stream (C1).
//!
//! Scanning applies these rules in order at each cursor position:
//! comment, whitespace, newline, number, identifier/keyword, two-character
//! operator, single-character punctuation, else `LexError::UnknownCharacter`.
//! Comments and non-newline whitespace are discarded; every other rule
//! produces exactly one token.

use crate::cursor::Cursor;
use crate::token::{keyword_token, Token};
use sequentia_util::LexError;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    /// Scans the whole input, returning a token stream terminated by a
    /// single trailing `Token::Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_comment_and_whitespace();
            match self.cursor.current() {
                None => {
                    tokens.push(Token::Eof);
                    return Ok(tokens);
                }
                Some(b'\n') => {
                    self.cursor.advance();
                    tokens.push(Token::Newline);
                }
                Some(c) if c.is_ascii_digit() => {
                    tokens.push(self.scan_number());
                }
                Some(c) if is_ident_start(c) => {
                    tokens.push(self.scan_identifier());
                }
                Some(_) => {
                    tokens.push(self.scan_operator_or_punct()?);
                }
            }
        }
    }

    fn skip_comment_and_whitespace(&mut self) {
        loop {
            match self.cursor.current() {
                Some(b' ') | Some(b'\t') | Some(b'\r') => {
                    self.cursor.advance();
                }
                Some(b'#') => {
                    while let Some(c) = self.cursor.current() {
                        if c == b'\n' {
                            break;
                        }
                        self.cursor.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.cursor.pos();
        while matches!(self.cursor.current(), Some(c) if c.is_ascii_digit()) {
            self.cursor.advance();
        }
        let text = self.cursor.slice(start, self.cursor.pos());
        Token::Number(text.parse().expect("digit run parses as i64"))
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.cursor.pos();
        while matches!(self.cursor.current(), Some(c) if is_ident_continue(c)) {
            self.cursor.advance();
        }
        let text = self.cursor.slice(start, self.cursor.pos());
        keyword_token(text).unwrap_or_else(|| Token::Id(text.to_string()))
    }

    fn scan_operator_or_punct(&mut self) -> Result<Token, LexError> {
        let c = self.cursor.advance().expect("caller checked current() is Some");
        Ok(match c {
            b'=' => {
                if self.cursor.eat(b'=') {
                    Token::Eq
                } else {
                    Token::Assign
                }
            }
            b'!' => {
                if self.cursor.eat(b'=') {
                    Token::Neq
                } else {
                    return Err(LexError::UnknownCharacter('!'));
                }
            }
            b'<' => {
                if self.cursor.eat(b'=') {
                    Token::Leq
                } else {
                    Token::Lt
                }
            }
            b'>' => {
                if self.cursor.eat(b'=') {
                    Token::Geq
                } else {
                    Token::Gt
                }
            }
            b',' => Token::Comma,
            b'[' => Token::LBracket,
            b']' => Token::RBracket,
            b'{' => Token::LBrace,
            b'}' => Token::RBrace,
            b':' => Token::Colon,
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            other => return Err(LexError::UnknownCharacter(other as char)),
        })
    }
}

fn is_ident_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_continue(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// Convenience entry point matching the other stages' `fn(input) -> Result<Output, Error>` shape.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<Token> {
        lex(src).expect("lex should succeed")
    }

    #[test]
    fn empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![Token::Eof]);
    }

    #[test]
    fn skips_comments_and_blank_runs() {
        let toks = kinds("# a comment\n  \t\n");
        assert_eq!(toks, vec![Token::Newline, Token::Newline, Token::Eof]);
    }

    #[test]
    fn scans_assignment_of_a_number() {
        let toks = kinds("x = 42\n");
        assert_eq!(
            toks,
            vec![
                Token::Id("x".to_string()),
                Token::Assign,
                Token::Number(42),
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn keywords_take_priority_over_identifiers() {
        let toks = kinds("pattern fibonacci print if else for in");
        assert_eq!(
            toks,
            vec![
                Token::Pattern,
                Token::Fib,
                Token::Print,
                Token::If,
                Token::Else,
                Token::For,
                Token::In,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn identifiers_with_keyword_prefixes_are_not_split() {
        let toks = kinds("fibonacci_count");
        assert_eq!(
            toks,
            vec![Token::Id("fibonacci_count".to_string()), Token::Eof]
        );
    }

    #[test]
    fn two_char_operators_beat_their_single_char_prefix() {
        let toks = kinds("== != <= >= < >");
        assert_eq!(
            toks,
            vec![
                Token::Eq,
                Token::Neq,
                Token::Leq,
                Token::Geq,
                Token::Lt,
                Token::Gt,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn punctuation_set_scans_individually() {
        let toks = kinds("[]{}:,()+-*/");
        assert_eq!(
            toks,
            vec![
                Token::LBracket,
                Token::RBracket,
                Token::LBrace,
                Token::RBrace,
                Token::Colon,
                Token::Comma,
                Token::LParen,
                Token::RParen,
                Token::Plus,
                Token::Minus,
                Token::Star,
                Token::Slash,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn unknown_character_is_an_error() {
        let err = lex("x = 1 @ 2").unwrap_err();
        assert_eq!(err, LexError::UnknownCharacter('@'));
    }

    #[test]
    fn lone_bang_is_an_error_not_a_token() {
        let err = lex("!").unwrap_err();
        assert_eq!(err, LexError::UnknownCharacter('!'));
    }
}
