use super::helpers::integers;
use super::{BasicEngine, CalcError, Engine, Operator};
use crate::value::{IntValue, NumericValue};

/// Fixed-width register arithmetic. Everything wraps modulo `2^width`;
/// division and shifts treat the register as unsigned.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgrammerEngine;

/// Shifting by the register width or more clears it
fn shift_left(value: &IntValue, amount: u128) -> IntValue {
    if amount >= u128::from(value.width().bits()) {
        value.with_bits(0)
    } else {
        value.with_bits(value.bits() << amount)
    }
}

fn shift_right(value: &IntValue, amount: u128) -> IntValue {
    if amount >= u128::from(value.width().bits()) {
        value.with_bits(0)
    } else {
        value.with_bits(value.bits() >> amount)
    }
}

/// Bits `msb` down to `lsb` of `value`, shifted down to bit 0
fn bit_field(value: &IntValue, msb: u128, lsb: u128) -> Result<IntValue, CalcError> {
    let width = u128::from(value.width().bits());
    if lsb > msb {
        return Err(CalcError::Domain(format!(
            "bit field must be MSB first, LSB second: got [{}:{}]",
            msb, lsb
        )));
    }
    if msb >= width {
        return Err(CalcError::Domain(format!(
            "bit {} is outside the {}-bit register",
            msb, width
        )));
    }
    let len = msb - lsb + 1;
    let mask = if len >= 128 { u128::MAX } else { (1u128 << len) - 1 };
    Ok(value.with_bits((value.bits() >> lsb) & mask))
}

impl Engine for ProgrammerEngine {
    fn supports(&self, op: Operator) -> bool {
        BasicEngine::is_basic(op)
            || matches!(
                op,
                Operator::And
                    | Operator::Or
                    | Operator::Xor
                    | Operator::Not
                    | Operator::ShiftLeftOne
                    | Operator::ShiftRightOne
                    | Operator::ShiftLeft
                    | Operator::ShiftRight
                    | Operator::BitField
            )
    }

    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError> {
        let ints = integers(operands)?;
        let result = match (op, ints.as_slice()) {
            (Operator::Add, [a, b]) => a.with_bits(a.bits().wrapping_add(b.bits())),
            (Operator::Subtract, [a, b]) => a.with_bits(a.bits().wrapping_sub(b.bits())),
            (Operator::Multiply, [a, b]) => a.with_bits(a.bits().wrapping_mul(b.bits())),
            (Operator::Divide, [a, b]) => {
                let divisor = b.bits();
                if divisor == 0 {
                    return Err(CalcError::DivisionByZero);
                }
                a.with_bits(a.bits() / divisor)
            }
            (Operator::Modulo, [a, b]) => {
                let divisor = b.bits();
                if divisor == 0 {
                    return Err(CalcError::DivisionByZero);
                }
                a.with_bits(a.bits() % divisor)
            }
            (Operator::Negate, [a]) => a.negated(),
            (Operator::And, [a, b]) => a.with_bits(a.bits() & b.bits()),
            (Operator::Or, [a, b]) => a.with_bits(a.bits() | b.bits()),
            (Operator::Xor, [a, b]) => a.with_bits(a.bits() ^ b.bits()),
            (Operator::Not, [a]) => a.with_bits(!a.bits()),
            (Operator::ShiftLeftOne, [a]) => shift_left(a, 1),
            (Operator::ShiftRightOne, [a]) => shift_right(a, 1),
            (Operator::ShiftLeft, [a, b]) => shift_left(a, b.bits()),
            (Operator::ShiftRight, [a, b]) => shift_right(a, b.bits()),
            (Operator::BitField, [x, msb, lsb]) => bit_field(x, msb.bits(), lsb.bits())?,
            _ => {
                return Err(CalcError::Domain(format!(
                    "{} is not a programmer operation",
                    op.formula()
                )))
            }
        };
        Ok(NumericValue::Integer(result))
    }
}
