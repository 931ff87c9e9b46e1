//! Pattern expansion: turns a `pattern <kind> <args>` expression into the
//! concrete `i64` sequence it denotes.
//!
//! Shared by the TAC interpreter and the AST interpreter so both reference
//! executions agree on what e.g. `pattern fibonacci 10` actually produces.

use crate::ast::PatternKind;

pub fn expand(kind: PatternKind, args: &[i64]) -> Result<Vec<i64>, String> {
    if args.len() != kind.expected_arg_count() {
        return Err(format!(
            "pattern {} expects {} argument(s), got {}",
            kind.as_str(),
            kind.expected_arg_count(),
            args.len()
        ));
    }

    Ok(match kind {
        PatternKind::Square => {
            let n = args[0].max(0);
            (1..=n).map(|i| i * i).collect()
        }
        PatternKind::Cube => {
            let n = args[0].max(0);
            (1..=n).map(|i| i * i * i).collect()
        }
        PatternKind::Triangular => {
            let n = args[0].max(0);
            (1..=n).map(|i| i * (i + 1) / 2).collect()
        }
        PatternKind::Arithmetic => {
            let (start, step, n) = (args[0], args[1], args[2].max(0));
            (0..n).map(|i| start + step * i).collect()
        }
        PatternKind::Geometric => {
            let (start, ratio, n) = (args[0], args[1], args[2].max(0));
            (0..n).map(|i| start * ratio.pow(i as u32)).collect()
        }
        PatternKind::Fibonacci => {
            let n = args[0].max(0);
            let mut arr = Vec::with_capacity(n as usize);
            let (mut a, mut b) = (0i64, 1i64);
            for _ in 0..n {
                arr.push(a);
                let next = a + b;
                a = b;
                b = next;
            }
            arr
        }
        PatternKind::Factorial => {
            let n = args[0].max(0);
            let mut arr = Vec::with_capacity(n as usize);
            let mut f = 1i64;
            for i in 1..=n {
                f *= i;
                arr.push(f);
            }
            arr
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_of_three() {
        assert_eq!(expand(PatternKind::Square, &[3]).unwrap(), vec![1, 4, 9]);
    }

    #[test]
    fn fibonacci_of_five() {
        assert_eq!(expand(PatternKind::Fibonacci, &[5]).unwrap(), vec![0, 1, 1, 2, 3]);
    }

    #[test]
    fn factorial_of_four() {
        assert_eq!(expand(PatternKind::Factorial, &[4]).unwrap(), vec![1, 2, 6, 24]);
    }

    #[test]
    fn arithmetic_sequence() {
        assert_eq!(expand(PatternKind::Arithmetic, &[1, 2, 4]).unwrap(), vec![1, 3, 5, 7]);
    }

    #[test]
    fn geometric_sequence() {
        assert_eq!(expand(PatternKind::Geometric, &[1, 2, 4]).unwrap(), vec![1, 2, 4, 8]);
    }

    #[test]
    fn wrong_arg_count_is_an_error() {
        assert!(expand(PatternKind::Arithmetic, &[1, 2]).is_err());
    }

    #[test]
    fn every_pattern_produces_exactly_n_elements() {
        for (kind, args) in [
            (PatternKind::Square, vec![6]),
            (PatternKind::Cube, vec![6]),
            (PatternKind::Triangular, vec![6]),
            (PatternKind::Fibonacci, vec![6]),
            (PatternKind::Factorial, vec![6]),
            (PatternKind::Arithmetic, vec![1, 2, 6]),
            (PatternKind::Geometric, vec![1, 2, 6]),
        ] {
            assert_eq!(expand(kind, &args).unwrap().len(), 6);
        }
    }

    #[test]
    fn n_equal_zero_produces_an_empty_sequence() {
        for (kind, args) in [
            (PatternKind::Square, vec![0]),
            (PatternKind::Fibonacci, vec![0]),
            (PatternKind::Arithmetic, vec![1, 2, 0]),
        ] {
            assert!(expand(kind, &args).unwrap().is_empty());
        }
    }
}
