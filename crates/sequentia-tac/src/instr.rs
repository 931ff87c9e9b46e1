//! Three-address code instructions (C4).
//!
//! A flat instruction list rather than a basic-block graph: every control
//! transfer is an explicit `Label`/`Goto`/`IfFalse`, so the optimizer in
//! `opt` can operate on one linear `Vec<Instr>` without building a CFG.

use std::fmt;

use sequentia_par::{BinOpKind, PatternKind};

/// An operand is either a literal or the name of a variable/temporary.
/// Keeping this as typed data, rather than both cases sharing one string
/// field, is what lets the optimizer match on "is this a constant" without
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Const(i64),
    Name(String),
}

impl Operand {
    pub fn as_const(&self) -> Option<i64> {
        match self {
            Operand::Const(n) => Some(*n),
            Operand::Name(_) => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Operand::Name(s) => Some(s),
            Operand::Const(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(n) => write!(f, "{n}"),
            Operand::Name(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    BinOp {
        op: BinOpKind,
        left: Operand,
        right: Operand,
        result: String,
    },
    Assign {
        value: Operand,
        result: String,
    },
    ArrayAccess {
        array: String,
        index: Operand,
        result: String,
    },
    Slice {
        array: String,
        start: Operand,
        end: Option<Operand>,
        result: String,
    },
    PatternCall {
        pattern: PatternKind,
        args: Vec<Operand>,
        result: String,
    },
    /// Computes an array's element count, used so `for` loops can be
    /// lowered to a real bounds check (see the generator's loop
    /// materialization).
    Len {
        array: String,
        result: String,
    },
    Print(Operand),
    Label(String),
    Goto(String),
    IfFalse {
        cond: Operand,
        target: String,
    },
}

impl Instr {
    /// The name this instruction defines, if any. Used by dead-code
    /// elimination to decide whether the instruction has an observable
    /// effect beyond that definition.
    pub fn result_name(&self) -> Option<&str> {
        match self {
            Instr::BinOp { result, .. }
            | Instr::Assign { result, .. }
            | Instr::ArrayAccess { result, .. }
            | Instr::Slice { result, .. }
            | Instr::PatternCall { result, .. }
            | Instr::Len { result, .. } => Some(result),
            Instr::Print(_) | Instr::Label(_) | Instr::Goto(_) | Instr::IfFalse { .. } => None,
        }
    }

    /// Whether this instruction must be kept regardless of whether its
    /// result is used: control flow and output always have an effect.
    pub fn has_side_effect(&self) -> bool {
        matches!(
            self,
            Instr::Print(_) | Instr::Label(_) | Instr::Goto(_) | Instr::IfFalse { .. } | Instr::PatternCall { .. }
        )
    }

    /// All operand slots read by this instruction, in evaluation order.
    /// `&mut` so the optimizer's copy-propagation pass can rewrite in place.
    pub fn operands_mut(&mut self) -> Vec<&mut Operand> {
        match self {
            Instr::BinOp { left, right, .. } => vec![left, right],
            Instr::Assign { value, .. } => vec![value],
            Instr::ArrayAccess { index, .. } => vec![index],
            Instr::Slice { start, end, .. } => {
                let mut v = vec![start];
                if let Some(e) = end {
                    v.push(e);
                }
                v
            }
            Instr::PatternCall { args, .. } => args.iter_mut().collect(),
            Instr::Len { .. } => vec![],
            Instr::Print(op) => vec![op],
            Instr::IfFalse { cond, .. } => vec![cond],
            Instr::Label(_) | Instr::Goto(_) => vec![],
        }
    }

    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Instr::BinOp { left, right, .. } => vec![left, right],
            Instr::Assign { value, .. } => vec![value],
            Instr::ArrayAccess { index, .. } => vec![index],
            Instr::Slice { start, end, .. } => {
                let mut v = vec![start];
                if let Some(e) = end {
                    v.push(e);
                }
                v
            }
            Instr::PatternCall { args, .. } => args.iter().collect(),
            Instr::Len { .. } => vec![],
            Instr::Print(op) => vec![op],
            Instr::IfFalse { cond, .. } => vec![cond],
            Instr::Label(_) | Instr::Goto(_) => vec![],
        }
    }

    /// Array names read by this instruction (not captured by `operands`,
    /// since they name storage rather than a scalar/array value).
    pub fn array_refs(&self) -> Vec<&str> {
        match self {
            Instr::ArrayAccess { array, .. } | Instr::Slice { array, .. } | Instr::Len { array, .. } => {
                vec![array.as_str()]
            }
            _ => vec![],
        }
    }
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::PatternCall { pattern, args, result } => {
                let args_str = args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(", ");
                write!(f, "{result} = CALL {}({args_str})", pattern.as_str())
            }
            Instr::ArrayAccess { array, index, result } => write!(f, "{result} = {array}[{index}]"),
            Instr::Slice { array, start, end, result } => {
                let end_str = end.as_ref().map(|e| e.to_string()).unwrap_or_else(|| "None".to_string());
                write!(f, "{result} = {array}[{start}:{end_str}]")
            }
            Instr::Assign { value, result } => write!(f, "{result} = {value}"),
            Instr::Len { array, result } => write!(f, "{result} = LEN {array}"),
            Instr::Print(operand) => write!(f, "PRINT {operand}"),
            Instr::Label(name) => write!(f, "{name}:"),
            Instr::Goto(target) => write!(f, "GOTO {target}"),
            Instr::IfFalse { cond, target } => write!(f, "IF_FALSE {cond} GOTO {target}"),
            Instr::BinOp { op, left, right, result } => write!(f, "{result} = {left} {} {right}", op.as_str()),
        }
    }
}

/// Temporaries are named `t1`, `t2`, ... by the generator; this is how the
/// optimizer tells a compiler-introduced name from a source-level one.
pub fn is_temp(name: &str) -> bool {
    name.len() > 1 && name.starts_with('t') && name[1..].chars().all(|c| c.is_ascii_digit())
}
