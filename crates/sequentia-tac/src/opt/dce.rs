//! Dead-code elimination: drops any `result`-defining instruction whose
//! result is never read, keeping everything with an observable effect
//! (`Print`, `Label`, `Goto`, `IfFalse`, `PatternCall`).
//!
//! Marks every operand an instruction reads as used, array references
//! included, so a temp computing an index used only as an array subscript
//! is never dropped out from under it; see `DESIGN.md`.

use std::collections::HashSet;

use crate::instr::Instr;

pub fn run(instructions: Vec<Instr>) -> Vec<Instr> {
    let mut used: HashSet<String> = HashSet::new();

    for instr in &instructions {
        for operand in instr.operands() {
            if let Some(name) = operand.name() {
                used.insert(name.to_string());
            }
        }
        for array in instr.array_refs() {
            used.insert(array.to_string());
        }
    }

    let mut changed = true;
    while changed {
        changed = false;
        for instr in &instructions {
            let Some(result) = instr.result_name() else { continue };
            if !used.contains(result) {
                continue;
            }
            for operand in instr.operands() {
                if let Some(name) = operand.name() {
                    if used.insert(name.to_string()) {
                        changed = true;
                    }
                }
            }
            for array in instr.array_refs() {
                if used.insert(array.to_string()) {
                    changed = true;
                }
            }
        }
    }

    instructions
        .into_iter()
        .filter(|instr| instr.has_side_effect() || instr.result_name().is_some_and(|r| used.contains(r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Operand;

    #[test]
    fn drops_an_assign_whose_result_is_never_read() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(1),
                result: "unused".to_string(),
            },
            Instr::Assign {
                value: Operand::Const(2),
                result: "a".to_string(),
            },
            Instr::Print(Operand::Name("a".to_string())),
        ];
        let result = run(instrs);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|i| i.result_name() != Some("unused")));
    }

    #[test]
    fn keeps_chains_of_dependencies() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(1),
                result: "t1".to_string(),
            },
            Instr::Assign {
                value: Operand::Name("t1".to_string()),
                result: "a".to_string(),
            },
            Instr::Print(Operand::Name("a".to_string())),
        ];
        assert_eq!(run(instrs.clone()).len(), 3);
    }

    #[test]
    fn always_keeps_pattern_calls() {
        let instrs = vec![Instr::PatternCall {
            pattern: sequentia_par::PatternKind::Square,
            args: vec![Operand::Const(3)],
            result: "unused".to_string(),
        }];
        assert_eq!(run(instrs.clone()).len(), 1);
    }

    #[test]
    fn array_index_survives_when_only_used_as_a_subscript() {
        let instrs = vec![
            Instr::Assign {
                value: Operand::Const(0),
                result: "idx".to_string(),
            },
            Instr::ArrayAccess {
                array: "a".to_string(),
                index: Operand::Name("idx".to_string()),
                result: "v".to_string(),
            },
            Instr::Print(Operand::Name("v".to_string())),
        ];
        let result = run(instrs);
        assert!(result.iter().any(|i| i.result_name() == Some("idx")));
    }
}
