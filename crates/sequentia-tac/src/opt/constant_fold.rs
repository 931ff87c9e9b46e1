//! Constant folding: collapses an arithmetic `Instr::BinOp` with two
//! constant operands into a plain `Assign`. Comparisons are left alone, as
//! in the reference optimizer — only `+ - * /` fold.

use sequentia_par::BinOpKind;

use crate::instr::{Instr, Operand};

pub fn run(instructions: Vec<Instr>) -> Vec<Instr> {
    instructions
        .into_iter()
        .map(|instr| match &instr {
            Instr::BinOp { op, left, right, result } => match (op, left.as_const(), right.as_const()) {
                (BinOpKind::Add, Some(a), Some(b)) => fold(result, a + b),
                (BinOpKind::Sub, Some(a), Some(b)) => fold(result, a - b),
                (BinOpKind::Mul, Some(a), Some(b)) => fold(result, a * b),
                (BinOpKind::Div, Some(a), Some(b)) if b != 0 => fold(result, a / b),
                _ => instr,
            },
            _ => instr,
        })
        .collect()
}

fn fold(result: &str, value: i64) -> Instr {
    Instr::Assign {
        value: Operand::Const(value),
        result: result.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_constant_addition() {
        let instrs = vec![Instr::BinOp {
            op: BinOpKind::Add,
            left: Operand::Const(2),
            right: Operand::Const(3),
            result: "t1".to_string(),
        }];
        let folded = run(instrs);
        assert_eq!(
            folded,
            vec![Instr::Assign {
                value: Operand::Const(5),
                result: "t1".to_string(),
            }]
        );
    }

    #[test]
    fn leaves_non_constant_binops_alone() {
        let instrs = vec![Instr::BinOp {
            op: BinOpKind::Add,
            left: Operand::Name("x".to_string()),
            right: Operand::Const(3),
            result: "t1".to_string(),
        }];
        assert_eq!(run(instrs.clone()), instrs);
    }

    #[test]
    fn comparisons_do_not_fold() {
        let instrs = vec![Instr::BinOp {
            op: BinOpKind::Lt,
            left: Operand::Const(2),
            right: Operand::Const(3),
            result: "t1".to_string(),
        }];
        assert_eq!(run(instrs.clone()), instrs);
    }
}
