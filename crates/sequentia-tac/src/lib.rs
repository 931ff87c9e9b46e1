//! sequentia-tac - Three-address code generation, optimization, and a
//! reference interpreter (C4/C5).
//!
//! `generator` lowers the AST to a flat [`Instr`] list; `opt` rewrites that
//! list in place; `interpreter` runs either list to prove the rewrite kept
//! the program's observable behavior unchanged.

mod generator;
mod instr;
mod interpreter;
pub mod opt;

pub use generator::{generate, Generator};
pub use instr::{is_temp, Instr, Operand};
pub use interpreter::interpret;
pub use opt::optimize;
