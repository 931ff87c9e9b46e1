//! Abstract syntax tree produced by the parser (C2).
//!
//! `Print` and the `for` loop's source are both represented uniformly as
//! [`Expr`], with [`Expr::Id`] covering the bare-name case — no sentinel
//! variant to keep in sync with whatever it stands in for.

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(Assign),
    Print(Expr),
    If(IfStmt),
    For(ForStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub name: String,
    pub expr: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub iterator: String,
    pub source: Expr,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Id(String),
    ArrayAccess {
        name: String,
        index: Box<Expr>,
    },
    Slice {
        name: String,
        start: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
    BinOp {
        left: Box<Expr>,
        op: BinOpKind,
        right: Box<Expr>,
    },
    Pattern {
        kind: PatternKind,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Neq,
    Lt,
    Gt,
    Leq,
    Geq,
}

impl BinOpKind {
    /// The literal operator text, used by diagnostics and the textual TAC
    /// operand renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOpKind::Add => "+",
            BinOpKind::Sub => "-",
            BinOpKind::Mul => "*",
            BinOpKind::Div => "/",
            BinOpKind::Eq => "==",
            BinOpKind::Neq => "!=",
            BinOpKind::Lt => "<",
            BinOpKind::Gt => ">",
            BinOpKind::Leq => "<=",
            BinOpKind::Geq => ">=",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinOpKind::Eq | BinOpKind::Neq | BinOpKind::Lt | BinOpKind::Gt | BinOpKind::Leq | BinOpKind::Geq
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Fibonacci,
    Factorial,
    Square,
    Cube,
    Arithmetic,
    Geometric,
    Triangular,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Fibonacci => "fibonacci",
            PatternKind::Factorial => "factorial",
            PatternKind::Square => "square",
            PatternKind::Cube => "cube",
            PatternKind::Arithmetic => "arithmetic",
            PatternKind::Geometric => "geometric",
            PatternKind::Triangular => "triangular",
        }
    }

    /// Number of arguments each pattern consumes after its name: all
    /// patterns take a count plus pattern-specific parameters.
    pub fn expected_arg_count(&self) -> usize {
        match self {
            PatternKind::Fibonacci | PatternKind::Factorial | PatternKind::Square | PatternKind::Cube => 1,
            PatternKind::Arithmetic | PatternKind::Geometric => 3,
            PatternKind::Triangular => 1,
        }
    }
}
