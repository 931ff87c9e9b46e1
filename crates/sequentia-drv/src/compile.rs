//! The compiler driver proper: runs every stage in order and collects
//! everything the pretty printers need, stopping at the first stage that
//! fails: compilation is a fatal boundary, no partial output is produced.

use sequentia_lex::Token;
use sequentia_par::Program;
use sequentia_sem::SymbolTable;
use sequentia_tac::Instr;
use sequentia_util::SequentiaError;

pub struct CompileOutput {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub symbols: SymbolTable,
    pub original_tac: Vec<Instr>,
    pub optimized_tac: Vec<Instr>,
    pub lowered_text: String,
    pub program_output: String,
}

pub fn compile_and_run(source: &str) -> Result<CompileOutput, SequentiaError> {
    let tokens = sequentia_lex::lex(source)?;
    let ast = sequentia_par::parse(tokens.clone())?;
    let symbols = sequentia_sem::check(&ast)?;

    let original_tac = sequentia_tac::generate(&ast);
    let optimized_tac = sequentia_tac::optimize(original_tac.clone());

    let lowered_text = sequentia_lower::emit(&ast);
    let program_output = sequentia_lower::execute(&ast)?;

    Ok(CompileOutput {
        tokens,
        ast,
        symbols,
        original_tac,
        optimized_tac,
        lowered_text,
        program_output,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_and_runs_a_small_program() {
        let out = compile_and_run("a = pattern fibonacci 5\nprint a\n").expect("should compile");
        assert_eq!(out.program_output, "0 1 1 2 3\n");
    }

    #[test]
    fn optimizer_preserves_program_behavior() {
        let out = compile_and_run("x = 2 + 3\nprint x\n").expect("should compile");
        let before = sequentia_tac::interpret(&out.original_tac).unwrap();
        let after = sequentia_tac::interpret(&out.optimized_tac).unwrap();
        assert_eq!(before, after);
        assert_eq!(after, out.program_output);
    }

    #[test]
    fn lex_error_stops_the_pipeline() {
        let err = compile_and_run("x = 1 @ 2\n").unwrap_err();
        assert!(matches!(err, SequentiaError::Lex(_)));
    }

    #[test]
    fn semantic_error_stops_before_tac_generation() {
        let err = compile_and_run("print missing\n").unwrap_err();
        assert!(matches!(err, SequentiaError::Semantic(_)));
    }
}
