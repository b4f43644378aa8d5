use super::helpers::{finite, reals};
use super::{BasicEngine, CalcError, Engine, Operator};
use crate::value::NumericValue;

/// Largest n whose factorial is a finite f64
pub const MAX_FACTORIAL: u32 = 170;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScientificEngine;

/// Iterative factorial with the bound checked before any work is done
fn factorial(x: f64) -> Result<f64, CalcError> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::Domain(format!(
            "factorial needs a non-negative integer, got {}",
            x
        )));
    }
    if x > f64::from(MAX_FACTORIAL) {
        return Err(CalcError::Overflow(format!("{}! is too large", x)));
    }
    Ok((2..=x as u32).fold(1.0, |acc, n| acc * f64::from(n)))
}

fn positive(x: f64, what: &str) -> Result<f64, CalcError> {
    if x > 0.0 {
        Ok(x)
    } else {
        Err(CalcError::Domain(format!("{} of {} is undefined", what, x)))
    }
}

impl Engine for ScientificEngine {
    fn supports(&self, op: Operator) -> bool {
        BasicEngine::is_basic(op)
            || matches!(
                op,
                Operator::Power
                    | Operator::Factorial
                    | Operator::Square
                    | Operator::SquareRoot
                    | Operator::Log2
                    | Operator::LogN
                    | Operator::Ln
                    | Operator::Inverse
            )
    }

    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError> {
        if BasicEngine::is_basic(op) {
            return BasicEngine.evaluate(op, operands);
        }

        let result = match (op, reals(operands).as_slice()) {
            (Operator::Power, &[a, b]) => {
                if a == 0.0 && b < 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a.powf(b)
            }
            (Operator::Factorial, &[a]) => factorial(a)?,
            (Operator::Square, &[a]) => a * a,
            (Operator::SquareRoot, &[a]) => {
                if a < 0.0 {
                    return Err(CalcError::Domain(format!("square root of {} is undefined", a)));
                }
                a.sqrt()
            }
            (Operator::Log2, &[a]) => positive(a, "log2")?.log2(),
            (Operator::LogN, &[base, x]) => {
                let base = positive(base, "logarithm base")?;
                if base == 1.0 {
                    return Err(CalcError::Domain("logarithm base 1 is undefined".into()));
                }
                positive(x, "logarithm")?.ln() / base.ln()
            }
            (Operator::Ln, &[a]) => positive(a, "ln")?.ln(),
            (Operator::Inverse, &[a]) => {
                if a == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                1.0 / a
            }
            _ => {
                return Err(CalcError::Domain(format!(
                    "{} is not a scientific operation",
                    op.formula()
                )))
            }
        };
        finite(result, op.formula())
    }
}
