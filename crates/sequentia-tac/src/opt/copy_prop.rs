//! Copy propagation: once `t1 = x` has been seen, every later read of `t1`
//! is rewritten to read `x` directly.
//!
//! [`Instr::Slice`] keeps `start`/`end` as separate typed operands, so
//! propagation reaches them too, not just a slice's array name.

use std::collections::HashMap;

use crate::instr::{is_temp, Instr, Operand};

pub fn run(mut instructions: Vec<Instr>) -> Vec<Instr> {
    let mut temp_to_value: HashMap<String, Operand> = HashMap::new();

    for instr in &mut instructions {
        if let Instr::Assign { value, result } = instr {
            if is_temp(result) {
                temp_to_value.insert(result.clone(), value.clone());
            }
        }

        for operand in instr.operands_mut() {
            if let Operand::Name(name) = operand {
                if let Some(replacement) = temp_to_value.get(name) {
                    *operand = replacement.clone();
                }
            }
        }
    }

    instructions
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_par::BinOpKind;

    #[test]
    fn propagates_a_constant_through_a_temp() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(8),
                result: "t1".to_string(),
            },
            Instr::Assign {
                value: Operand::Name("t1".to_string()),
                result: "a".to_string(),
            },
        ];
        let result = run(instrs);
        assert_eq!(
            result[1],
            Instr::Assign {
                value: Operand::Const(8),
                result: "a".to_string(),
            }
        );
    }

    #[test]
    fn propagates_into_binop_operands() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(3),
                result: "t1".to_string(),
            },
            Instr::BinOp {
                op: BinOpKind::Add,
                left: Operand::Name("t1".to_string()),
                right: Operand::Const(1),
                result: "t2".to_string(),
            },
        ];
        let result = run(instrs);
        assert_eq!(
            result[1],
            Instr::BinOp {
                op: BinOpKind::Add,
                left: Operand::Const(3),
                right: Operand::Const(1),
                result: "t2".to_string(),
            }
        );
    }

    #[test]
    fn does_not_touch_source_level_names() {
        let instrs = vec![Instr::Assign {
            value: Operand::Const(8),
            result: "a".to_string(),
        }];
        assert_eq!(run(instrs.clone()), instrs);
    }
}
