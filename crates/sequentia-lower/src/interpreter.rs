//! Tree-walking AST interpreter (C6 reference execution).
//!
//! This is the practical stand-in for the host collaborator: the
//! lowering contract treats `execute(lowered_text) -> stdout` as delegated to
//! whatever runs the emitted target text, which is out of scope for a
//! self-contained crate. Here it is realized directly over the AST so the
//! driver has something to actually run, and so tests can compare its
//! output against `sequentia_tac::interpret` for the optimizer-correctness
//! property.

use std::collections::HashMap;
use std::fmt::Write as _;

use sequentia_par::{Assign, BinOpKind, Expr, ForStmt, IfStmt, PatternKind, Program, Stmt};
use sequentia_util::LowerError;

use crate::value::Value;

pub struct Interpreter {
    env: HashMap<String, Value>,
    out: String,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            env: HashMap::new(),
            out: String::new(),
        }
    }

    pub fn run(program: &Program) -> Result<String, LowerError> {
        let mut interp = Interpreter::new();
        for stmt in &program.stmts {
            interp.exec_stmt(stmt)?;
        }
        Ok(interp.out)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), LowerError> {
        match stmt {
            Stmt::Assign(a) => self.exec_assign(a),
            Stmt::Print(expr) => self.exec_print(expr),
            Stmt::If(s) => self.exec_if(s),
            Stmt::For(s) => self.exec_for(s),
        }
    }

    fn exec_assign(&mut self, stmt: &Assign) -> Result<(), LowerError> {
        let value = self.eval(&stmt.expr)?;
        self.env.insert(stmt.name.clone(), value);
        Ok(())
    }

    fn exec_print(&mut self, expr: &Expr) -> Result<(), LowerError> {
        let value = self.eval(expr)?;
        writeln!(self.out, "{value}").expect("String writes never fail");
        Ok(())
    }

    fn exec_if(&mut self, stmt: &IfStmt) -> Result<(), LowerError> {
        let cond = self.eval(&stmt.condition)?.as_int().unwrap_or(0);
        if cond != 0 {
            for s in &stmt.then_block {
                self.exec_stmt(s)?;
            }
        } else if let Some(else_block) = &stmt.else_block {
            for s in else_block {
                self.exec_stmt(s)?;
            }
        }
        Ok(())
    }

    fn exec_for(&mut self, stmt: &ForStmt) -> Result<(), LowerError> {
        let source = self.eval(&stmt.source)?;
        let items = source
            .as_array()
            .ok_or_else(|| LowerError::NotAnArray(format!("{:?}", stmt.source)))?
            .to_vec();
        for item in items {
            self.env.insert(stmt.iterator.clone(), Value::Int(item));
            for s in &stmt.body {
                self.exec_stmt(s)?;
            }
        }
        Ok(())
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, LowerError> {
        match expr {
            Expr::Number(n) => Ok(Value::Int(*n)),
            Expr::Id(name) => self
                .env
                .get(name)
                .cloned()
                .ok_or_else(|| LowerError::UndefinedVariable(name.clone())),
            Expr::ArrayAccess { name, index } => {
                let arr = self.require_array(name)?;
                let idx = self.eval(index)?.as_int().unwrap_or(0);
                index_array(&arr, idx, name)
            }
            Expr::Slice { name, start, end } => {
                let arr = self.require_array(name)?;
                let start_v = match start {
                    Some(s) => self.eval(s)?.as_int().unwrap_or(0),
                    None => 0,
                };
                let end_v = match end {
                    Some(e) => self.eval(e)?.as_int().unwrap_or(arr.len() as i64),
                    None => arr.len() as i64,
                };
                Ok(Value::Array(slice_array(&arr, start_v, end_v)))
            }
            Expr::BinOp { left, op, right } => {
                let l = self.eval(left)?;
                let r = self.eval(right)?;
                apply_binop(*op, l, r)
            }
            Expr::Pattern { kind, args } => {
                let arg_vals: Vec<i64> = args
                    .iter()
                    .map(|a| self.eval(a).map(|v| v.as_int().unwrap_or(0)))
                    .collect::<Result<_, _>>()?;
                let array = sequentia_par::pattern::expand(*kind, &arg_vals).map_err(LowerError::UnknownPattern)?;
                Ok(Value::Array(array))
            }
        }
    }

    fn require_array(&self, name: &str) -> Result<Vec<i64>, LowerError> {
        match self.env.get(name) {
            Some(Value::Array(items)) => Ok(items.clone()),
            Some(Value::Int(_)) => Err(LowerError::NotAnArray(name.to_string())),
            None => Err(LowerError::UndefinedVariable(name.to_string())),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn index_array(arr: &[i64], idx: i64, _name: &str) -> Result<Value, LowerError> {
    let resolved = if idx < 0 { arr.len() as i64 + idx } else { idx };
    arr.get(resolved as usize)
        .copied()
        .map(Value::Int)
        .ok_or_else(|| LowerError::IndexOutOfBounds { index: idx, length: arr.len() })
}

fn slice_array(arr: &[i64], start: i64, end: i64) -> Vec<i64> {
    let len = arr.len() as i64;
    let start = start.clamp(0, len) as usize;
    let end = end.clamp(0, len) as usize;
    if start >= end {
        Vec::new()
    } else {
        arr[start..end].to_vec()
    }
}

/// Broadcasting rules: array-array ops zip, truncating to the shorter
/// operand; scalar-array ops apply elementwise; scalar-scalar is plain
/// arithmetic.
fn apply_binop(op: BinOpKind, l: Value, r: Value) -> Result<Value, LowerError> {
    if op.is_comparison() {
        return compare(op, &l, &r);
    }

    Ok(match (l, r) {
        (Value::Array(a), Value::Array(b)) => {
            let mut result = Vec::with_capacity(a.len().min(b.len()));
            for (x, y) in a.into_iter().zip(b) {
                result.push(scalar_binop(op, x, y)?);
            }
            Value::Array(result)
        }
        (Value::Array(a), Value::Int(b)) => {
            let mut result = Vec::with_capacity(a.len());
            for x in a {
                result.push(scalar_binop(op, x, b)?);
            }
            Value::Array(result)
        }
        (Value::Int(a), Value::Array(b)) => {
            let mut result = Vec::with_capacity(b.len());
            for y in b {
                result.push(scalar_binop(op, a, y)?);
            }
            Value::Array(result)
        }
        (Value::Int(a), Value::Int(b)) => Value::Int(scalar_binop(op, a, b)?),
    })
}

fn scalar_binop(op: BinOpKind, a: i64, b: i64) -> Result<i64, LowerError> {
    Ok(match op {
        BinOpKind::Add => a + b,
        BinOpKind::Sub => a - b,
        BinOpKind::Mul => a * b,
        BinOpKind::Div => {
            if b == 0 {
                return Err(LowerError::DivisionByZero);
            }
            a / b
        }
        _ => unreachable!("comparisons are handled by `compare`"),
    })
}

fn compare(op: BinOpKind, l: &Value, r: &Value) -> Result<Value, LowerError> {
    let result = match op {
        BinOpKind::Eq => l == r,
        BinOpKind::Neq => l != r,
        BinOpKind::Lt => l < r,
        BinOpKind::Gt => l > r,
        BinOpKind::Leq => l <= r,
        BinOpKind::Geq => l >= r,
        _ => unreachable!("arithmetic ops are handled by `apply_binop`"),
    };
    Ok(Value::Int(result as i64))
}

pub fn execute(program: &Program) -> Result<String, LowerError> {
    Interpreter::run(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;
    use sequentia_par::parse;

    fn run(src: &str) -> String {
        let ast = parse(lex(src).unwrap()).unwrap();
        execute(&ast).expect("execute should succeed")
    }

    #[test]
    fn prints_a_scalar() {
        assert_eq!(run("x = 5\nprint x\n"), "5\n");
    }

    #[test]
    fn prints_an_array() {
        assert_eq!(run("a = pattern fibonacci 5\nprint a\n"), "0 1 1 2 3\n");
    }

    #[test]
    fn array_plus_scalar_broadcasts() {
        assert_eq!(run("a = pattern square 3\nb = a + 1\nprint b\n"), "2 5 10\n");
    }

    #[test]
    fn array_plus_array_zips_and_truncates() {
        assert_eq!(run("a = pattern square 3\nb = pattern cube 2\nc = a + b\nprint c\n"), "2 12\n");
    }

    #[test]
    fn for_loop_visits_every_element_in_order() {
        assert_eq!(run("a = pattern triangular 4\nfor v in a {\n  print v\n}\n"), "1\n3\n6\n10\n");
    }

    #[test]
    fn if_else_selects_a_branch() {
        assert_eq!(run("x = 2\nif x == 2 {\n  print 1\n} else {\n  print 0\n}\n"), "1\n");
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let ast = parse(lex("x = 1 / 0\n").unwrap()).unwrap();
        assert_eq!(execute(&ast).unwrap_err(), LowerError::DivisionByZero);
    }

    #[test]
    fn slice_bounds_clamp_to_array_length() {
        assert_eq!(run("a = pattern square 5\nb = a[2:100]\nprint b\n"), "9 16 25\n");
    }
}
