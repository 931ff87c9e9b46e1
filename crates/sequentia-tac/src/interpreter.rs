//! A reference interpreter over TAC, used to prove the optimizer preserves
//! behavior: run the same
//! program's unoptimized and optimized instruction lists and assert their
//! captured stdout matches.

use std::collections::HashMap;
use std::fmt::Write as _;

use sequentia_par::BinOpKind;
use sequentia_util::TacError;

use crate::instr::{Instr, Operand};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Int(i64),
    Array(Vec<i64>),
}

pub fn interpret(instructions: &[Instr]) -> Result<String, TacError> {
    let labels: HashMap<&str, usize> = instructions
        .iter()
        .enumerate()
        .filter_map(|(i, instr)| match instr {
            Instr::Label(name) => Some((name.as_str(), i)),
            _ => None,
        })
        .collect();

    let mut env: HashMap<String, Value> = HashMap::new();
    let mut out = String::new();
    let mut pc = 0usize;

    while pc < instructions.len() {
        match &instructions[pc] {
            Instr::BinOp { op, left, right, result } => {
                let l = eval_scalar(&env, left)?;
                let r = eval_scalar(&env, right)?;
                let v = apply_binop(*op, l, r)?;
                env.insert(result.clone(), Value::Int(v));
            }
            Instr::Assign { value, result } => {
                let v = eval_any(&env, value)?;
                env.insert(result.clone(), v);
            }
            Instr::ArrayAccess { array, index, result } => {
                let arr = eval_array(&env, array)?;
                let idx = eval_scalar(&env, index)?;
                let value = index_array(&arr, idx)?;
                env.insert(result.clone(), Value::Int(value));
            }
            Instr::Slice { array, start, end, result } => {
                let arr = eval_array(&env, array)?;
                let start_v = eval_scalar(&env, start)?.max(0) as usize;
                let end_v = match end {
                    Some(e) => eval_scalar(&env, e)?.clamp(0, arr.len() as i64) as usize,
                    None => arr.len(),
                };
                let slice = if start_v >= end_v { Vec::new() } else { arr[start_v..end_v].to_vec() };
                env.insert(result.clone(), Value::Array(slice));
            }
            Instr::PatternCall { pattern, args, result } => {
                let arg_vals: Vec<i64> = args
                    .iter()
                    .map(|a| eval_scalar(&env, a))
                    .collect::<Result<_, _>>()?;
                let array = sequentia_par::pattern::expand(*pattern, &arg_vals).map_err(TacError::UnknownPattern)?;
                env.insert(result.clone(), Value::Array(array));
            }
            Instr::Len { array, result } => {
                let arr = eval_array(&env, array)?;
                env.insert(result.clone(), Value::Int(arr.len() as i64));
            }
            Instr::Print(operand) => {
                match eval_any(&env, operand)? {
                    Value::Int(n) => writeln!(out, "{n}").unwrap(),
                    Value::Array(items) => {
                        let rendered = items.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
                        writeln!(out, "{rendered}").unwrap();
                    }
                }
            }
            Instr::Label(_) => {}
            Instr::Goto(target) => {
                pc = *labels.get(target.as_str()).ok_or_else(|| TacError::UnresolvedLabel(target.clone()))?;
                continue;
            }
            Instr::IfFalse { cond, target } => {
                if eval_scalar(&env, cond)? == 0 {
                    pc = *labels.get(target.as_str()).ok_or_else(|| TacError::UnresolvedLabel(target.clone()))?;
                    continue;
                }
            }
        }
        pc += 1;
    }

    Ok(out)
}

fn eval_any(env: &HashMap<String, Value>, operand: &Operand) -> Result<Value, TacError> {
    match operand {
        Operand::Const(n) => Ok(Value::Int(*n)),
        Operand::Name(name) => env
            .get(name)
            .cloned()
            .ok_or_else(|| TacError::UnresolvedLabel(name.clone())),
    }
}

fn eval_scalar(env: &HashMap<String, Value>, operand: &Operand) -> Result<i64, TacError> {
    match eval_any(env, operand)? {
        Value::Int(n) => Ok(n),
        Value::Array(_) => Err(TacError::UnresolvedLabel(format!("{operand} is not a scalar"))),
    }
}

fn eval_array(env: &HashMap<String, Value>, name: &str) -> Result<Vec<i64>, TacError> {
    match env.get(name) {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(Value::Int(_)) => Err(TacError::UnresolvedLabel(format!("{name} is not an array"))),
        None => Err(TacError::UnresolvedLabel(name.to_string())),
    }
}

fn index_array(arr: &[i64], idx: i64) -> Result<i64, TacError> {
    let idx = if idx < 0 { arr.len() as i64 + idx } else { idx };
    arr.get(idx as usize)
        .copied()
        .ok_or_else(|| TacError::MalformedRange(format!("index {idx} out of bounds for length {}", arr.len())))
}

fn apply_binop(op: BinOpKind, l: i64, r: i64) -> Result<i64, TacError> {
    Ok(match op {
        BinOpKind::Add => l + r,
        BinOpKind::Sub => l - r,
        BinOpKind::Mul => l * r,
        BinOpKind::Div => {
            if r == 0 {
                return Err(TacError::MalformedRange("division by zero".to_string()));
            }
            l / r
        }
        BinOpKind::Eq => (l == r) as i64,
        BinOpKind::Neq => (l != r) as i64,
        BinOpKind::Lt => (l < r) as i64,
        BinOpKind::Gt => (l > r) as i64,
        BinOpKind::Leq => (l <= r) as i64,
        BinOpKind::Geq => (l >= r) as i64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sequentia_lex::lex;
    use sequentia_par::parse;

    fn run(src: &str) -> String {
        let ast = parse(lex(src).unwrap()).unwrap();
        let instrs = crate::generator::generate(&ast);
        interpret(&instrs).expect("interpret should succeed")
    }

    #[test]
    fn prints_a_scalar() {
        assert_eq!(run("x = 5\nprint x\n"), "5\n");
    }

    #[test]
    fn prints_an_array_space_separated() {
        assert_eq!(run("a = pattern square 3\nprint a\n"), "1 4 9\n");
    }

    #[test]
    fn for_loop_visits_every_element() {
        assert_eq!(run("a = pattern square 3\nfor v in a {\n  print v\n}\n"), "1\n4\n9\n");
    }

    #[test]
    fn if_else_picks_the_right_branch() {
        assert_eq!(run("x = 5\nif x > 3 {\n  print 1\n} else {\n  print 0\n}\n"), "1\n");
    }
}
