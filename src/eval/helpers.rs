use super::CalcError;
use crate::value::{IntValue, NumericValue};

/// Real operands, oldest first
pub(crate) fn reals(operands: &[NumericValue]) -> Vec<f64> {
    operands.iter().map(NumericValue::as_f64).collect()
}

/// Integer operands, oldest first. A real cell is a domain error.
pub(crate) fn integers(operands: &[NumericValue]) -> Result<Vec<IntValue>, CalcError> {
    operands
        .iter()
        .map(|v| {
            v.as_int()
                .copied()
                .ok_or_else(|| CalcError::Domain(format!("{} is not an integer register", v.as_f64())))
        })
        .collect()
}

/// Reject results a float cannot hold: NaN is a domain problem, infinity
/// an overflow.
pub(crate) fn finite(value: f64, formula: &str) -> Result<NumericValue, CalcError> {
    if value.is_nan() {
        Err(CalcError::Domain(format!("{} is not a real number", formula)))
    } else if value.is_infinite() {
        Err(CalcError::Overflow(format!("{} is too large", formula)))
    } else {
        Ok(NumericValue::Real(value))
    }
}
