use super::helpers::{finite, reals};
use super::{CalcError, Engine, Operator};
use crate::value::NumericValue;

/// Floating point arithmetic shared by every real-valued mode
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BasicEngine;

impl BasicEngine {
    pub(crate) fn is_basic(op: Operator) -> bool {
        matches!(
            op,
            Operator::Add
                | Operator::Subtract
                | Operator::Multiply
                | Operator::Divide
                | Operator::Modulo
                | Operator::Negate
        )
    }
}

impl Engine for BasicEngine {
    fn supports(&self, op: Operator) -> bool {
        Self::is_basic(op)
    }

    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError> {
        let result = match (op, reals(operands).as_slice()) {
            (Operator::Add, &[a, b]) => a + b,
            (Operator::Subtract, &[a, b]) => a - b,
            (Operator::Multiply, &[a, b]) => a * b,
            (Operator::Divide, &[a, b]) => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
            (Operator::Modulo, &[a, b]) => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                // Remainder takes the sign of the divisor
                let r = a % b;
                if r != 0.0 && (r < 0.0) != (b < 0.0) {
                    r + b
                } else {
                    r
                }
            }
            (Operator::Negate, &[a]) => -a,
            _ => {
                return Err(CalcError::Domain(format!(
                    "{} is not a basic operation",
                    op.formula()
                )))
            }
        };
        finite(result, op.formula())
    }
}
