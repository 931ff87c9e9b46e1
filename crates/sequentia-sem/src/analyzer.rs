//! The semantic analyzer (C3).
//!
//! Walks the AST once, in declaration order, growing a single flat
//! [`SymbolTable`]. Each `Assign` statement re-derives its target's type
//! (and, where possible, its static array length) from the right-hand
//! side; every other statement only checks, never declares, except that
//! a `for` loop declares its iterator as `int` for the duration of (and
//! after) its body.

use sequentia_par::{Assign, BinOpKind, Expr, ForStmt, IfStmt, PatternKind, Program, Stmt};
use sequentia_util::SemanticError;

use crate::symbol::{SymType, Symbol, SymbolTable};

pub struct Analyzer {
    pub symbols: SymbolTable,
}

impl Analyzer {
    pub fn new() -> Self {
        Analyzer {
            symbols: SymbolTable::new(),
        }
    }

    pub fn check_program(program: &Program) -> Result<SymbolTable, SemanticError> {
        let mut analyzer = Analyzer::new();
        for stmt in &program.stmts {
            analyzer.check_stmt(stmt)?;
        }
        Ok(analyzer.symbols)
    }

    fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::Assign(a) => self.check_assign(a),
            Stmt::Print(expr) => self.check_print(expr),
            Stmt::If(s) => self.check_if(s),
            Stmt::For(s) => self.check_for(s),
        }
    }

    fn check_assign(&mut self, stmt: &Assign) -> Result<(), SemanticError> {
        let symbol = match &stmt.expr {
            Expr::Number(_) => Symbol::scalar(&stmt.name),

            Expr::ArrayAccess { name, index } => {
                let src = self.require_array(name)?;
                let _ = src;
                self.expect_type(index, SymType::Int)?;
                Symbol::scalar(&stmt.name)
            }

            Expr::Slice { name, start, end } => {
                let src = self.require_array(name)?.clone();
                if let Some(s) = start {
                    self.expect_type(s, SymType::Int)?;
                }
                if let Some(e) = end {
                    self.expect_type(e, SymType::Int)?;
                }
                let length = slice_length(start.as_deref(), end.as_deref(), src.length);
                Symbol::array(&stmt.name, length)
            }

            Expr::Id(name) => {
                let src = self
                    .symbols
                    .get(name)
                    .ok_or_else(|| SemanticError::UndefinedVariable(name.clone()))?
                    .clone();
                match src.ty {
                    SymType::Int => Symbol::scalar(&stmt.name),
                    SymType::Array => Symbol {
                        name: stmt.name.clone(),
                        ty: SymType::Array,
                        length: src.length,
                        pattern: src.pattern,
                    },
                }
            }

            Expr::BinOp { left, op, right } => {
                let result_ty = self.check_binop(left, *op, right)?;
                let length = match result_ty {
                    SymType::Array => self.array_operand_length(left).or_else(|| self.array_operand_length(right)),
                    SymType::Int => None,
                };
                Symbol {
                    name: stmt.name.clone(),
                    ty: result_ty,
                    length,
                    pattern: None,
                }
            }

            Expr::Pattern { kind, args } => {
                let mut lengths: Vec<Option<i64>> = Vec::with_capacity(args.len());
                for arg in args {
                    lengths.push(self.check_pattern_arg(arg)?);
                }
                let length = lengths.last().copied().flatten();
                Symbol {
                    name: stmt.name.clone(),
                    ty: SymType::Array,
                    length,
                    pattern: Some(*kind),
                }
            }
        };

        self.symbols.insert(symbol);
        Ok(())
    }

    fn check_pattern_arg(&mut self, arg: &Expr) -> Result<Option<i64>, SemanticError> {
        match arg {
            Expr::Number(n) => Ok(Some(*n)),
            Expr::Id(name) => {
                let sym = self
                    .symbols
                    .get(name)
                    .ok_or_else(|| SemanticError::UndefinedVariable(name.clone()))?;
                if sym.ty != SymType::Int {
                    return Err(SemanticError::NotAScalar(name.clone()));
                }
                Ok(None)
            }
            Expr::ArrayAccess { name, index } => {
                self.require_array(name)?;
                if let Expr::Id(idx_name) = index.as_ref() {
                    let idx_sym = self
                        .symbols
                        .get(idx_name)
                        .ok_or_else(|| SemanticError::UndefinedVariable(idx_name.clone()))?;
                    if idx_sym.ty != SymType::Int {
                        return Err(SemanticError::TypeMismatch {
                            expected: "int".to_string(),
                            got: idx_sym.ty.as_str().to_string(),
                        });
                    }
                }
                Ok(None)
            }
            _ => Err(SemanticError::InvalidPatternArgument),
        }
    }

    fn check_print(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match expr {
            Expr::Id(name) => {
                if !self.symbols.contains(name) {
                    return Err(SemanticError::UndefinedVariable(name.clone()));
                }
                Ok(())
            }
            other => self.infer(other).map(|_| ()),
        }
    }

    fn check_if(&mut self, stmt: &IfStmt) -> Result<(), SemanticError> {
        self.infer(&stmt.condition)?;
        for s in &stmt.then_block {
            self.check_stmt(s)?;
        }
        if let Some(else_block) = &stmt.else_block {
            for s in else_block {
                self.check_stmt(s)?;
            }
        }
        Ok(())
    }

    fn check_for(&mut self, stmt: &ForStmt) -> Result<(), SemanticError> {
        let source_ty = self.infer(&stmt.source)?;
        if source_ty != SymType::Array {
            return Err(SemanticError::ForSourceNotArray);
        }
        self.symbols.insert(Symbol::scalar(&stmt.iterator));
        for s in &stmt.body {
            self.check_stmt(s)?;
        }
        Ok(())
    }

    /// Infers an expression's type, recursively checking its subexpressions.
    fn infer(&mut self, expr: &Expr) -> Result<SymType, SemanticError> {
        match expr {
            Expr::Number(_) => Ok(SymType::Int),
            Expr::Id(name) => Ok(self
                .symbols
                .get(name)
                .ok_or_else(|| SemanticError::UndefinedVariable(name.clone()))?
                .ty),
            Expr::ArrayAccess { name, index } => {
                self.require_array(name)?;
                self.expect_type(index, SymType::Int)?;
                Ok(SymType::Int)
            }
            Expr::Slice { name, start, end } => {
                self.require_array(name)?;
                if let Some(s) = start {
                    self.expect_type(s, SymType::Int)?;
                }
                if let Some(e) = end {
                    self.expect_type(e, SymType::Int)?;
                }
                Ok(SymType::Array)
            }
            Expr::BinOp { left, op, right } => self.check_binop(left, *op, right),
            Expr::Pattern { args, .. } => {
                for arg in args {
                    self.infer(arg)?;
                }
                Ok(SymType::Array)
            }
        }
    }

    fn expect_type(&mut self, expr: &Expr, expected: SymType) -> Result<(), SemanticError> {
        let actual = self.infer(expr)?;
        if actual != expected {
            return Err(SemanticError::TypeMismatch {
                expected: expected.as_str().to_string(),
                got: actual.as_str().to_string(),
            });
        }
        Ok(())
    }

    fn check_binop(&mut self, left: &Expr, op: BinOpKind, right: &Expr) -> Result<SymType, SemanticError> {
        let left_ty = self.infer(left)?;
        let right_ty = self.infer(right)?;
        if op.is_comparison() {
            return Ok(SymType::Int);
        }
        if left_ty == SymType::Array || right_ty == SymType::Array {
            Ok(SymType::Array)
        } else {
            Ok(SymType::Int)
        }
    }

    fn require_array(&self, name: &str) -> Result<&Symbol, SemanticError> {
        let sym = self
            .symbols
            .get(name)
            .ok_or_else(|| SemanticError::UndefinedArray(name.to_string()))?;
        if sym.ty != SymType::Array {
            return Err(SemanticError::NotAnArray(name.to_string()));
        }
        Ok(sym)
    }

    fn array_operand_length(&self, expr: &Expr) -> Option<i64> {
        if let Expr::Id(name) = expr {
            let sym = self.symbols.get(name)?;
            if sym.ty == SymType::Array {
                return sym.length;
            }
        }
        None
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Statically computes a slice's length where it is determinable:
/// both bounds literal, an open start with a literal end (`[:n]` has
/// length `n`), or a literal start with the source's own length known
/// (`[k:]` has length `len(src) - k`). Any other shape leaves the
/// length unknown until runtime.
fn slice_length(start: Option<&Expr>, end: Option<&Expr>, src_length: Option<i64>) -> Option<i64> {
    match (start, end) {
        (Some(Expr::Number(s)), Some(Expr::Number(e))) => Some(e - s),
        (None, Some(Expr::Number(e))) => Some(*e),
        (Some(Expr::Number(s)), None) => src_length.map(|len| len - s),
        _ => None,
    }
}

pub fn check(program: &Program) -> Result<SymbolTable, SemanticError> {
    Analyzer::check_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;
    use sequentia_par::parse;

    fn table(src: &str) -> SymbolTable {
        let ast = parse(lex(src).unwrap()).unwrap();
        check(&ast).expect("semantic check should succeed")
    }

    #[test]
    fn number_assign_is_scalar() {
        let t = table("x = 5\n");
        assert_eq!(t.get("x").unwrap().ty, SymType::Int);
    }

    #[test]
    fn pattern_assign_is_array_with_known_length() {
        let t = table("x = pattern fibonacci 10\n");
        let sym = t.get("x").unwrap();
        assert_eq!(sym.ty, SymType::Array);
        assert_eq!(sym.length, Some(10));
    }

    #[test]
    fn slice_with_literal_bounds_has_known_length() {
        let t = table("a = pattern square 10\nb = a[2:5]\n");
        assert_eq!(t.get("b").unwrap().length, Some(3));
    }

    #[test]
    fn open_start_slice_derives_length_from_source() {
        let t = table("a = pattern square 10\nb = a[3:]\n");
        assert_eq!(t.get("b").unwrap().length, Some(7));
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let ast = parse(lex("print missing\n").unwrap()).unwrap();
        let err = check(&ast).unwrap_err();
        assert_eq!(err, SemanticError::UndefinedVariable("missing".to_string()));
    }

    #[test]
    fn for_over_scalar_is_rejected() {
        let ast = parse(lex("x = 5\nfor v in x {\n  print v\n}\n").unwrap()).unwrap();
        let err = check(&ast).unwrap_err();
        assert_eq!(err, SemanticError::ForSourceNotArray);
    }

    #[test]
    fn for_iterator_stays_visible_after_the_loop() {
        let t = table("a = pattern square 3\nfor v in a {\n  print v\n}\nprint v\n");
        assert_eq!(t.get("v").unwrap().ty, SymType::Int);
    }

    #[test]
    fn array_plus_array_is_array() {
        let t = table("a = pattern square 3\nb = pattern cube 3\nc = a + b\n");
        assert_eq!(t.get("c").unwrap().ty, SymType::Array);
    }

    #[test]
    fn comparison_is_always_int() {
        let t = table("a = pattern square 3\nb = pattern cube 3\nc = a == b\n");
        assert_eq!(t.get("c").unwrap().ty, SymType::Int);
    }
}
