//! Final cleanup: collapses `tN = k; var = k` into just `var = k` when a
//! constant-folded temp is immediately re-assigned to a named variable
//! with the same value.

use crate::instr::{is_temp, Instr, Operand};

pub fn run(instructions: Vec<Instr>) -> Vec<Instr> {
    let mut optimized = Vec::with_capacity(instructions.len());
    let mut skip_next = false;

    for (i, instr) in instructions.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }

        if let Instr::Assign {
            value: Operand::Const(value),
            result,
        } = instr
        {
            if is_temp(result) {
                if let Some(Instr::Assign {
                    value: Operand::Const(next_value),
                    result: next_result,
                }) = instructions.get(i + 1)
                {
                    if next_value == value && !is_temp(next_result) {
                        skip_next = true;
                        continue;
                    }
                }
            }
        }

        optimized.push(instr.clone());
    }

    optimized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_temp_then_variable_assignment_of_the_same_constant() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(8),
                result: "t1".to_string(),
            },
            Instr::Assign {
                value: Operand::Const(8),
                result: "a".to_string(),
            },
        ];
        let result = run(instrs);
        assert_eq!(
            result,
            vec![Instr::Assign {
                value: Operand::Const(8),
                result: "a".to_string(),
            }]
        );
    }

    #[test]
    fn leaves_differing_constants_alone() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(8),
                result: "t1".to_string(),
            },
            Instr::Assign {
                value: Operand::Const(9),
                result: "a".to_string(),
            },
        ];
        assert_eq!(run(instrs.clone()), instrs);
    }
}
