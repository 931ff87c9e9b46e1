//! Target-text emission (C6): renders the AST as the Python-flavored
//! source text the lowering backend hands to
//! whatever runs it downstream. Kept purely textual — nothing here is
//! executed by this crate; `interpreter::execute` is the actual reference
//! execution path.

use std::fmt::Write as _;

use sequentia_par::{BinOpKind, Expr, PatternKind, Program, Stmt};

const RUNTIME_HELPERS: &str = r#"# Runtime helpers for vector/scalar arithmetic
def _pat_add(a, b):
    if isinstance(a, list) and isinstance(b, list):
        return [x + y for x, y in zip(a, b)]
    elif isinstance(a, list):
        return [x + b for x in a]
    elif isinstance(b, list):
        return [a + x for x in b]
    return a + b

def _pat_sub(a, b):
    if isinstance(a, list) and isinstance(b, list):
        return [x - y for x, y in zip(a, b)]
    elif isinstance(a, list):
        return [x - b for x in a]
    elif isinstance(b, list):
        return [a - x for x in b]
    return a - b

def _pat_mul(a, b):
    if isinstance(a, list) and isinstance(b, list):
        return [x * y for x, y in zip(a, b)]
    elif isinstance(a, list):
        return [x * b for x in a]
    elif isinstance(b, list):
        return [a * x for x in b]
    return a * b

def _pat_div(a, b):
    if isinstance(a, list) and isinstance(b, list):
        return [x // y for x, y in zip(a, b)]
    elif isinstance(a, list):
        return [x // b for x in a]
    elif isinstance(b, list):
        return [a // x for x in b]
    return a // b

def _fib_inline(n):
    a, b = 0, 1
    arr = []
    for _ in range(n):
        arr.append(a)
        a, b = b, a + b
    return arr

def _fact_inline(n):
    arr = []
    f = 1
    for i in range(1, n + 1):
        f *= i
        arr.append(f)
    return arr
"#;

pub fn emit(program: &Program) -> String {
    let mut out = String::from("# Generated target text\n");
    out.push_str(RUNTIME_HELPERS);
    out.push('\n');
    for stmt in &program.stmts {
        emit_stmt(&mut out, stmt, 0);
    }
    out
}

fn indent(level: usize) -> String {
    "    ".repeat(level)
}

fn emit_stmt(out: &mut String, stmt: &Stmt, level: usize) {
    let pad = indent(level);
    match stmt {
        Stmt::Assign(a) => match &a.expr {
            Expr::Pattern { kind, args } => emit_pattern_def(out, &a.name, *kind, args, level),
            other => {
                let _ = writeln!(out, "{pad}{} = {}", a.name, expr_text(other));
            }
        },
        Stmt::Print(expr) => {
            let text = expr_text(expr);
            let _ = writeln!(
                out,
                "{pad}print({text} if isinstance({text}, int) else ' '.join(str(x) for x in {text}))"
            );
        }
        Stmt::If(s) => {
            let _ = writeln!(out, "{pad}if {}:", expr_text(&s.condition));
            for inner in &s.then_block {
                emit_stmt(out, inner, level + 1);
            }
            if let Some(else_block) = &s.else_block {
                let _ = writeln!(out, "{pad}else:");
                for inner in else_block {
                    emit_stmt(out, inner, level + 1);
                }
            }
        }
        Stmt::For(s) => {
            let _ = writeln!(out, "{pad}for {} in {}:", s.iterator, expr_text(&s.source));
            for inner in &s.body {
                emit_stmt(out, inner, level + 1);
            }
        }
    }
}

fn emit_pattern_def(out: &mut String, name: &str, kind: PatternKind, args: &[Expr], level: usize) {
    let pad = indent(level);
    let vals: Vec<String> = args.iter().map(expr_text).collect();
    match kind {
        PatternKind::Fibonacci => {
            let n = &vals[0];
            let _ = writeln!(out, "{pad}def _gen_{name}():");
            let _ = writeln!(out, "{pad}    a, b = 0, 1");
            let _ = writeln!(out, "{pad}    arr = []");
            let _ = writeln!(out, "{pad}    for _ in range({n}):");
            let _ = writeln!(out, "{pad}        arr.append(a)");
            let _ = writeln!(out, "{pad}        a, b = b, a + b");
            let _ = writeln!(out, "{pad}    return arr");
            let _ = writeln!(out, "{pad}{name} = _gen_{name}()");
        }
        PatternKind::Factorial => {
            let n = &vals[0];
            let _ = writeln!(out, "{pad}def _gen_{name}():");
            let _ = writeln!(out, "{pad}    arr = []");
            let _ = writeln!(out, "{pad}    f = 1");
            let _ = writeln!(out, "{pad}    for i in range(1, {n} + 1):");
            let _ = writeln!(out, "{pad}        f *= i");
            let _ = writeln!(out, "{pad}        arr.append(f)");
            let _ = writeln!(out, "{pad}    return arr");
            let _ = writeln!(out, "{pad}{name} = _gen_{name}()");
        }
        PatternKind::Square => {
            let n = &vals[0];
            let _ = writeln!(out, "{pad}{name} = [(i + 1) ** 2 for i in range({n})]");
        }
        PatternKind::Cube => {
            let n = &vals[0];
            let _ = writeln!(out, "{pad}{name} = [(i + 1) ** 3 for i in range({n})]");
        }
        PatternKind::Triangular => {
            let n = &vals[0];
            let _ = writeln!(out, "{pad}{name} = [(i + 1) * (i + 2) // 2 for i in range({n})]");
        }
        PatternKind::Arithmetic => {
            let (start, step, n) = (&vals[0], &vals[1], &vals[2]);
            let _ = writeln!(out, "{pad}{name} = [{start} + {step} * i for i in range({n})]");
        }
        PatternKind::Geometric => {
            let (start, ratio, n) = (&vals[0], &vals[1], &vals[2]);
            let _ = writeln!(out, "{pad}{name} = [{start} * ({ratio} ** i) for i in range({n})]");
        }
    }
}

fn expr_text(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) => n.to_string(),
        Expr::Id(name) => name.clone(),
        Expr::ArrayAccess { name, index } => format!("{name}[{}]", expr_text(index)),
        Expr::Slice { name, start, end } => {
            let start = start.as_ref().map(|e| expr_text(e)).unwrap_or_default();
            let end = end.as_ref().map(|e| expr_text(e)).unwrap_or_default();
            format!("{name}[{start}:{end}]")
        }
        Expr::BinOp { left, op, right } => {
            let l = expr_text(left);
            let r = expr_text(right);
            match op {
                BinOpKind::Add => format!("_pat_add({l}, {r})"),
                BinOpKind::Sub => format!("_pat_sub({l}, {r})"),
                BinOpKind::Mul => format!("_pat_mul({l}, {r})"),
                BinOpKind::Div => format!("_pat_div({l}, {r})"),
                _ => format!("({l} {} {r})", op.as_str()),
            }
        }
        Expr::Pattern { kind, args } => emit_pattern_inline(*kind, args),
    }
}

fn emit_pattern_inline(kind: PatternKind, args: &[Expr]) -> String {
    let vals: Vec<String> = args.iter().map(expr_text).collect();
    match kind {
        PatternKind::Square => format!("[(i + 1) ** 2 for i in range({})]", vals[0]),
        PatternKind::Cube => format!("[(i + 1) ** 3 for i in range({})]", vals[0]),
        PatternKind::Triangular => format!("[(i + 1) * (i + 2) // 2 for i in range({})]", vals[0]),
        PatternKind::Arithmetic => format!("[{} + {} * i for i in range({})]", vals[0], vals[1], vals[2]),
        PatternKind::Geometric => format!("[{} * ({} ** i) for i in range({})]", vals[0], vals[1], vals[2]),
        PatternKind::Fibonacci => format!("_fib_inline({})", vals[0]),
        PatternKind::Factorial => format!("_fact_inline({})", vals[0]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;
    use sequentia_par::parse;

    #[test]
    fn emits_a_pattern_definition() {
        let ast = parse(lex("a = pattern square 3\n").unwrap()).unwrap();
        let text = emit(&ast);
        assert!(text.contains("a = [(i + 1) ** 2 for i in range(3)]"));
    }

    #[test]
    fn emits_broadcasting_helper_calls_for_binops() {
        let ast = parse(lex("a = pattern square 3\nb = a + 1\n").unwrap()).unwrap();
        let text = emit(&ast);
        assert!(text.contains("_pat_add(a, 1)"));
    }

    #[test]
    fn emits_nested_for_loop() {
        let ast = parse(lex("a = pattern square 3\nfor v in a {\n  print v\n}\n").unwrap()).unwrap();
        let text = emit(&ast);
        assert!(text.contains("for v in a:"));
    }

    #[test]
    fn inline_fibonacci_and_factorial_calls_are_backed_by_helpers() {
        let ast = parse(lex("print pattern fibonacci 5\n").unwrap()).unwrap();
        let text = emit(&ast);
        assert!(text.contains("_fib_inline(5)"));
        assert!(text.contains("def _fib_inline(n):"));

        let ast = parse(lex("print pattern factorial 5\n").unwrap()).unwrap();
        let text = emit(&ast);
        assert!(text.contains("_fact_inline(5)"));
        assert!(text.contains("def _fact_inline(n):"));
    }
}
