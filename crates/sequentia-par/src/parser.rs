//! Recursive-descent parser (C2).
//!
//! Grammar, in descending precedence:
//! ```text
//! program    := (stmt NEWLINE?)*
//! stmt       := assign | print | if | for
//! expr       := comparison
//! comparison := additive (('=='|'!='|'<'|'>'|'<='|'>=') additive)?
//! additive   := multiplicative (('+'|'-') multiplicative)*
//! multiplicative := primary (('*'|'/') primary)*
//! primary    := '(' expr ')' | pattern | NUMBER | ID index_or_slice?
//! ```
//! Comparisons are non-associative: `a < b < c` is a syntax error rather
//! than `(a < b) < c`.

use sequentia_lex::Token;
use sequentia_util::ParseError;

use crate::ast::{Assign, BinOpKind, Expr, ForStmt, IfStmt, PatternKind, Program, Stmt};

pub struct Parser {
    toks: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(toks: Vec<Token>) -> Self {
        Parser { toks, pos: 0 }
    }

    fn peek(&self) -> &Token {
        self.toks.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.toks.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect_kind(&mut self, expected: &str) -> Result<Token, ParseError> {
        let tok = self.peek().clone();
        if tok.kind_name() != expected {
            return Err(ParseError::Expected {
                expected: expected.to_string(),
                got: tok.kind_name().to_string(),
            });
        }
        Ok(self.advance())
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while self.peek().kind_name() != "EOF" {
            if self.peek().kind_name() == "NEWLINE" {
                self.advance();
                continue;
            }
            stmts.push(self.parse_stmt()?);
            if self.peek().kind_name() == "NEWLINE" {
                self.advance();
            }
        }
        Ok(Program { stmts })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek() {
            Token::Id(_) => self.parse_assign(),
            Token::Print => self.parse_print(),
            Token::If => self.parse_if(),
            Token::For => self.parse_for(),
            other => Err(ParseError::InvalidStatementStart(other.kind_name().to_string())),
        }
    }

    fn parse_assign(&mut self) -> Result<Stmt, ParseError> {
        let name = match self.advance() {
            Token::Id(s) => s,
            other => {
                return Err(ParseError::Expected {
                    expected: "ID".to_string(),
                    got: other.kind_name().to_string(),
                })
            }
        };
        self.expect_kind("ASSIGN")?;
        let expr = self.parse_expr()?;
        Ok(Stmt::Assign(Assign { name, expr }))
    }

    fn parse_print(&mut self) -> Result<Stmt, ParseError> {
        self.expect_kind("PRINT_KW")?;
        let expr = self.parse_expr()?;
        Ok(Stmt::Print(expr))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        self.expect_kind("IF_KW")?;
        let condition = self.parse_expr()?;
        let then_block = self.parse_block()?;
        let else_block = if matches!(self.peek(), Token::Else) {
            self.advance();
            Some(self.parse_block()?)
        } else {
            None
        };
        Ok(Stmt::If(IfStmt {
            condition,
            then_block,
            else_block,
        }))
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        self.expect_kind("FOR_KW")?;
        let iterator = match self.advance() {
            Token::Id(s) => s,
            other => {
                return Err(ParseError::Expected {
                    expected: "ID".to_string(),
                    got: other.kind_name().to_string(),
                })
            }
        };
        self.expect_kind("IN_KW")?;
        let source = self.parse_expr()?;
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt {
            iterator,
            source,
            body,
        }))
    }

    /// A `{ ... }` block: leading/trailing newlines between statements are
    /// skipped, shared by `if`/`else` and `for` bodies.
    fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect_kind("LBRACE")?;
        while self.peek().kind_name() == "NEWLINE" {
            self.advance();
        }
        let mut stmts = Vec::new();
        while self.peek().kind_name() != "RBRACE" {
            if self.peek().kind_name() == "EOF" {
                return Err(ParseError::Expected {
                    expected: "RBRACE".to_string(),
                    got: "EOF".to_string(),
                });
            }
            if self.peek().kind_name() == "NEWLINE" {
                self.advance();
                continue;
            }
            stmts.push(self.parse_stmt()?);
        }
        self.expect_kind("RBRACE")?;
        Ok(stmts)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_additive()?;
        let op = match self.peek() {
            Token::Eq => BinOpKind::Eq,
            Token::Neq => BinOpKind::Neq,
            Token::Lt => BinOpKind::Lt,
            Token::Gt => BinOpKind::Gt,
            Token::Leq => BinOpKind::Leq,
            Token::Geq => BinOpKind::Geq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;
        Ok(Expr::BinOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus => BinOpKind::Add,
                Token::Minus => BinOpKind::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_primary()?;
        loop {
            let op = match self.peek() {
                Token::Star => BinOpKind::Mul,
                Token::Slash => BinOpKind::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_primary()?;
            left = Expr::BinOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek().clone() {
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect_kind("RPAREN")?;
                Ok(expr)
            }
            Token::Pattern => {
                self.advance();
                let kind = self.expect_pattern_keyword()?;
                let mut args = vec![self.parse_additive()?];
                while self.peek().kind_name() == "COMMA" {
                    self.advance();
                    args.push(self.parse_additive()?);
                }
                Ok(Expr::Pattern { kind, args })
            }
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            }
            Token::Id(name) => {
                self.advance();
                if self.peek().kind_name() == "LBRACKET" {
                    self.advance();
                    self.parse_index_or_slice(name)
                } else {
                    Ok(Expr::Id(name))
                }
            }
            other => Err(ParseError::InvalidExpressionStart(other.kind_name().to_string())),
        }
    }

    /// Parses what follows an already-consumed `name [`.
    fn parse_index_or_slice(&mut self, name: String) -> Result<Expr, ParseError> {
        let start = if self.peek().kind_name() != "COLON" {
            Some(Box::new(self.parse_additive()?))
        } else {
            None
        };

        if self.peek().kind_name() == "COLON" {
            self.advance();
            let end = if self.peek().kind_name() != "RBRACKET" {
                Some(Box::new(self.parse_additive()?))
            } else {
                None
            };
            self.expect_kind("RBRACKET")?;
            Ok(Expr::Slice { name, start, end })
        } else {
            self.expect_kind("RBRACKET")?;
            let index = start.ok_or_else(|| ParseError::Expected {
                expected: "index expression".to_string(),
                got: "RBRACKET".to_string(),
            })?;
            Ok(Expr::ArrayAccess { name, index })
        }
    }

    fn expect_pattern_keyword(&mut self) -> Result<PatternKind, ParseError> {
        let kind = match self.peek() {
            Token::Fib => PatternKind::Fibonacci,
            Token::Fact => PatternKind::Factorial,
            Token::Square => PatternKind::Square,
            Token::Cube => PatternKind::Cube,
            Token::Arith => PatternKind::Arithmetic,
            Token::Geo => PatternKind::Geometric,
            Token::Tri => PatternKind::Triangular,
            _ => return Err(ParseError::InvalidPatternKeyword),
        };
        self.advance();
        Ok(kind)
    }
}

pub fn parse(toks: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(toks).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;

    fn parsed(src: &str) -> Program {
        parse(lex(src).expect("lex should succeed")).expect("parse should succeed")
    }

    #[test]
    fn parses_a_number_assignment() {
        let prog = parsed("x = 42\n");
        assert_eq!(
            prog.stmts,
            vec![Stmt::Assign(Assign {
                name: "x".to_string(),
                expr: Expr::Number(42),
            })]
        );
    }

    #[test]
    fn comparisons_do_not_chain() {
        let err = parse(lex("x = a < b < c\n").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidStatementStart(_)));
    }

    #[test]
    fn parses_array_slice_with_both_bounds() {
        let prog = parsed("x = a[1:3]\n");
        match &prog.stmts[0] {
            Stmt::Assign(a) => assert!(matches!(a.expr, Expr::Slice { .. })),
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn parses_open_ended_slice() {
        let prog = parsed("x = a[:3]\n");
        match &prog.stmts[0] {
            Stmt::Assign(a) => match &a.expr {
                Expr::Slice { start, end, .. } => {
                    assert!(start.is_none());
                    assert!(end.is_some());
                }
                _ => panic!("expected slice"),
            },
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn parses_pattern_with_multiple_args() {
        let prog = parsed("x = pattern arithmetic 1, 2, 5\n");
        match &prog.stmts[0] {
            Stmt::Assign(a) => match &a.expr {
                Expr::Pattern { kind, args } => {
                    assert_eq!(*kind, PatternKind::Arithmetic);
                    assert_eq!(args.len(), 3);
                }
                _ => panic!("expected pattern"),
            },
            _ => panic!("expected assign"),
        }
    }

    #[test]
    fn print_accepts_any_expression() {
        let prog = parsed("print a + 1\n");
        assert!(matches!(prog.stmts[0], Stmt::Print(Expr::BinOp { .. })));
    }

    #[test]
    fn if_else_blocks_skip_blank_lines() {
        let prog = parsed("if x {\n\n  y = 1\n\n} else {\n  y = 2\n}\n");
        match &prog.stmts[0] {
            Stmt::If(stmt) => {
                assert_eq!(stmt.then_block.len(), 1);
                assert_eq!(stmt.else_block.as_ref().unwrap().len(), 1);
            }
            _ => panic!("expected if"),
        }
    }

    #[test]
    fn for_over_bare_identifier_source() {
        let prog = parsed("for v in arr {\n  print v\n}\n");
        match &prog.stmts[0] {
            Stmt::For(stmt) => assert_eq!(stmt.source, Expr::Id("arr".to_string())),
            _ => panic!("expected for"),
        }
    }

    #[test]
    fn unclosed_block_is_an_error() {
        let err = parse(lex("if x {\n  y = 1\n").unwrap()).unwrap_err();
        assert!(matches!(err, ParseError::Expected { .. }));
    }
}
