//! The optimizer (C5): constant folding, copy propagation, dead-code
//! elimination, a second copy-propagation pass to catch opportunities DCE
//! exposed, then a final redundant-constant-assign cleanup. Pass order is
//! load-bearing — running DCE before copy propagation would leave dead
//! copies alive, and skipping the second propagation pass misses temps
//! freed up by DCE.

mod cleanup;
mod constant_fold;
mod copy_prop;
mod dce;

use crate::instr::Instr;

pub fn optimize(instructions: Vec<Instr>) -> Vec<Instr> {
    let instructions = constant_fold::run(instructions);
    let instructions = copy_prop::run(instructions);
    let instructions = dce::run(instructions);
    let instructions = copy_prop::run(instructions);
    cleanup::run(instructions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Operand;
    use sequentia_par::BinOpKind;

    #[test]
    fn full_pipeline_folds_propagates_and_eliminates() {
        let instrs = vec![
            Instr::BinOp {
                op: BinOpKind::Add,
                left: Operand::Const(3),
                right: Operand::Const(5),
                result: "t1".to_string(),
            },
            Instr::Assign {
                value: Operand::Name("t1".to_string()),
                result: "a".to_string(),
            },
            Instr::Assign {
                value: Operand::Const(99),
                result: "unused".to_string(),
            },
            Instr::Print(Operand::Name("a".to_string())),
        ];
        let result = optimize(instrs);
        assert_eq!(
            result,
            vec![
                Instr::Assign {
                    value: Operand::Const(8),
                    result: "a".to_string(),
                },
                Instr::Print(Operand::Name("a".to_string())),
            ]
        );
    }
}
