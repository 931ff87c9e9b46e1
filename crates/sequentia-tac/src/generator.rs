//! TAC generation (C4): lowers the AST into a flat instruction list.
//!
//! `for` loops are materialized in full: an index temp, a `Len` bounds
//! check, and an increment/`Goto` back to the loop head, so the loop
//! actually advances through the source array element by element.

use sequentia_par::{Assign, BinOpKind, Expr, ForStmt, IfStmt, Program, Stmt};

use crate::instr::{Instr, Operand};

pub struct Generator {
    instructions: Vec<Instr>,
    temp_counter: u32,
    label_counter: u32,
}

impl Generator {
    pub fn new() -> Self {
        Generator {
            instructions: Vec::new(),
            temp_counter: 0,
            label_counter: 0,
        }
    }

    pub fn generate(program: &Program) -> Vec<Instr> {
        let mut gen = Generator::new();
        for stmt in &program.stmts {
            gen.gen_stmt(stmt);
        }
        gen.instructions
    }

    fn new_temp(&mut self) -> String {
        self.temp_counter += 1;
        format!("t{}", self.temp_counter)
    }

    fn new_label(&mut self) -> String {
        self.label_counter += 1;
        format!("L{}", self.label_counter)
    }

    fn gen_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign(a) => self.gen_assign(a),
            Stmt::Print(expr) => self.gen_print(expr),
            Stmt::If(s) => self.gen_if(s),
            Stmt::For(s) => self.gen_for(s),
        }
    }

    fn gen_assign(&mut self, stmt: &Assign) {
        if let Expr::Pattern { kind, args } = &stmt.expr {
            let arg_ops = args.iter().map(|a| self.gen_expr(a)).collect();
            self.instructions.push(Instr::PatternCall {
                pattern: *kind,
                args: arg_ops,
                result: stmt.name.clone(),
            });
        } else {
            let value = self.gen_expr(&stmt.expr);
            self.instructions.push(Instr::Assign {
                value,
                result: stmt.name.clone(),
            });
        }
    }

    fn gen_print(&mut self, expr: &Expr) {
        match expr {
            Expr::Id(name) => {
                self.instructions.push(Instr::Print(Operand::Name(name.clone())));
            }
            Expr::ArrayAccess { name, index } => {
                let idx = self.gen_expr(index);
                let temp = self.new_temp();
                self.instructions.push(Instr::ArrayAccess {
                    array: name.clone(),
                    index: idx,
                    result: temp.clone(),
                });
                self.instructions.push(Instr::Print(Operand::Name(temp)));
            }
            other => {
                let operand = self.gen_expr(other);
                self.instructions.push(Instr::Print(operand));
            }
        }
    }

    fn gen_if(&mut self, stmt: &IfStmt) {
        let cond = self.gen_expr(&stmt.condition);
        let else_label = self.new_label();
        let end_label = self.new_label();

        self.instructions.push(Instr::IfFalse {
            cond,
            target: else_label.clone(),
        });

        for s in &stmt.then_block {
            self.gen_stmt(s);
        }
        self.instructions.push(Instr::Goto(end_label.clone()));
        self.instructions.push(Instr::Label(else_label));

        if let Some(else_block) = &stmt.else_block {
            for s in else_block {
                self.gen_stmt(s);
            }
        }
        self.instructions.push(Instr::Label(end_label));
    }

    fn gen_for(&mut self, stmt: &ForStmt) {
        let array_name = match &stmt.source {
            Expr::Id(name) => name.clone(),
            other => {
                let value = self.gen_expr(other);
                let temp = self.new_temp();
                self.instructions.push(Instr::Assign {
                    value,
                    result: temp.clone(),
                });
                temp
            }
        };

        let idx_temp = self.new_temp();
        self.instructions.push(Instr::Assign {
            value: Operand::Const(0),
            result: idx_temp.clone(),
        });

        let len_temp = self.new_temp();
        self.instructions.push(Instr::Len {
            array: array_name.clone(),
            result: len_temp.clone(),
        });

        let loop_label = self.new_label();
        let end_label = self.new_label();
        self.instructions.push(Instr::Label(loop_label.clone()));

        let cond_temp = self.new_temp();
        self.instructions.push(Instr::BinOp {
            op: BinOpKind::Lt,
            left: Operand::Name(idx_temp.clone()),
            right: Operand::Name(len_temp),
            result: cond_temp.clone(),
        });
        self.instructions.push(Instr::IfFalse {
            cond: Operand::Name(cond_temp),
            target: end_label.clone(),
        });

        self.instructions.push(Instr::ArrayAccess {
            array: array_name,
            index: Operand::Name(idx_temp.clone()),
            result: stmt.iterator.clone(),
        });

        for s in &stmt.body {
            self.gen_stmt(s);
        }

        let inc_temp = self.new_temp();
        self.instructions.push(Instr::BinOp {
            op: BinOpKind::Add,
            left: Operand::Name(idx_temp.clone()),
            right: Operand::Const(1),
            result: inc_temp.clone(),
        });
        self.instructions.push(Instr::Assign {
            value: Operand::Name(inc_temp),
            result: idx_temp,
        });
        self.instructions.push(Instr::Goto(loop_label));
        self.instructions.push(Instr::Label(end_label));
    }

    fn gen_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Number(n) => Operand::Const(*n),
            Expr::Id(name) => Operand::Name(name.clone()),
            Expr::ArrayAccess { name, index } => {
                let idx = self.gen_expr(index);
                let temp = self.new_temp();
                self.instructions.push(Instr::ArrayAccess {
                    array: name.clone(),
                    index: idx,
                    result: temp.clone(),
                });
                Operand::Name(temp)
            }
            Expr::Slice { name, start, end } => {
                let start_op = start.as_ref().map(|s| self.gen_expr(s)).unwrap_or(Operand::Const(0));
                let end_op = end.as_ref().map(|e| self.gen_expr(e));
                let temp = self.new_temp();
                self.instructions.push(Instr::Slice {
                    array: name.clone(),
                    start: start_op,
                    end: end_op,
                    result: temp.clone(),
                });
                Operand::Name(temp)
            }
            Expr::BinOp { left, op, right } => {
                let l = self.gen_expr(left);
                let r = self.gen_expr(right);
                let temp = self.new_temp();
                self.instructions.push(Instr::BinOp {
                    op: *op,
                    left: l,
                    right: r,
                    result: temp.clone(),
                });
                Operand::Name(temp)
            }
            Expr::Pattern { kind, args } => {
                let arg_ops = args.iter().map(|a| self.gen_expr(a)).collect();
                let temp = self.new_temp();
                self.instructions.push(Instr::PatternCall {
                    pattern: *kind,
                    args: arg_ops,
                    result: temp.clone(),
                });
                Operand::Name(temp)
            }
        }
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn generate(program: &Program) -> Vec<Instr> {
    Generator::generate(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;
    use sequentia_par::parse;

    fn gen(src: &str) -> Vec<Instr> {
        let ast = parse(lex(src).unwrap()).unwrap();
        generate(&ast)
    }

    #[test]
    fn number_assign_lowers_to_assign() {
        let instrs = gen("x = 5\n");
        assert_eq!(
            instrs,
            vec![Instr::Assign {
                value: Operand::Const(5),
                result: "x".to_string(),
            }]
        );
    }

    #[test]
    fn bare_print_does_not_allocate_a_temp() {
        let instrs = gen("x = 5\nprint x\n");
        assert_eq!(instrs[1], Instr::Print(Operand::Name("x".to_string())));
    }

    #[test]
    fn for_loop_materializes_index_and_bounds_check() {
        let instrs = gen("a = pattern square 3\nfor v in a {\n  print v\n}\n");
        assert!(instrs.iter().any(|i| matches!(i, Instr::Len { .. })));
        assert!(instrs.iter().any(|i| matches!(i, Instr::Goto(_))));
        let if_false_count = instrs.iter().filter(|i| matches!(i, Instr::IfFalse { .. })).count();
        assert_eq!(if_false_count, 1);
    }
}
