//! Stack cell values
//!
//! A cell is either a 64-bit float (basic, scientific and statistics modes)
//! or a fixed-width integer register (programmer mode). Integer cells carry
//! the base they were entered in and the register width they live in; all
//! integer arithmetic is performed on the raw bit pattern modulo `2^width`.

use crate::eval::CalcError;
use crate::lexer;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Numeric base used for programmer-mode input and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Bin,
    Oct,
    #[default]
    Dec,
    Hex,
}

impl Base {
    pub fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    /// Short label shown on the mode line
    pub fn label(self) -> &'static str {
        match self {
            Base::Bin => "BIN",
            Base::Oct => "OCT",
            Base::Dec => "DEC",
            Base::Hex => "HEX",
        }
    }

    /// Optional literal prefix accepted when parsing in this base
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            Base::Bin => "0b",
            Base::Oct => "0o",
            Base::Dec => "",
            Base::Hex => "0x",
        }
    }
}

/// Width of the programmer-mode register, 1 to 128 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    pub const MAX_BITS: u32 = 128;
    pub const DEFAULT: BitWidth = BitWidth(48);

    pub fn new(bits: u32) -> Option<Self> {
        (1..=Self::MAX_BITS).contains(&bits).then_some(BitWidth(bits))
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// All ones in the low `bits` positions
    pub fn mask(self) -> u128 {
        if self.0 == Self::MAX_BITS {
            u128::MAX
        } else {
            (1u128 << self.0) - 1
        }
    }

    /// Largest unsigned magnitude that fits, `2^bits - 1`
    pub fn max_value(self) -> u128 {
        self.mask()
    }

    pub fn wrap(self, raw: u128) -> u128 {
        raw & self.mask()
    }
}

impl Default for BitWidth {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// How a real value is squeezed into the integer register on a mode switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoercionPolicy {
    /// Reject the whole transition when any magnitude does not fit
    #[default]
    Strict,
    /// Clamp out-of-range values: positives to the register maximum,
    /// negatives to the most negative two's-complement pattern
    Saturate,
}

/// A fixed-width integer register value
#[derive(Debug, Clone, Copy)]
pub struct IntValue {
    bits: u128,
    base: Base,
    width: BitWidth,
}

impl IntValue {
    /// Build from a raw pattern, wrapping it into the register
    pub fn new(raw: u128, base: Base, width: BitWidth) -> Self {
        IntValue {
            bits: width.wrap(raw),
            base,
            width,
        }
    }

    /// Build from a sign and magnitude. Negative values become the
    /// two's-complement pattern of their magnitude.
    pub fn from_magnitude(
        negative: bool,
        magnitude: u128,
        base: Base,
        width: BitWidth,
    ) -> Result<Self, CalcError> {
        if magnitude > width.max_value() {
            return Err(CalcError::Overflow(format!(
                "{} does not fit in {} bits",
                magnitude,
                width.bits()
            )));
        }
        let value = IntValue::new(magnitude, base, width);
        Ok(if negative { value.negated() } else { value })
    }

    pub fn bits(&self) -> u128 {
        self.bits
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// Same base and width, different pattern (wrapped)
    pub fn with_bits(&self, raw: u128) -> Self {
        IntValue::new(raw, self.base, self.width)
    }

    pub fn negated(&self) -> Self {
        self.with_bits(self.bits.wrapping_neg())
    }

    /// Unsigned interpretation of the register
    pub fn to_f64(&self) -> f64 {
        self.bits as f64
    }
}

// Numeric equality: the entry base is display metadata only.
impl PartialEq for IntValue {
    fn eq(&self, other: &Self) -> bool {
        self.bits == other.bits && self.width == other.width
    }
}

/// One stack cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericValue {
    Real(f64),
    Integer(IntValue),
}

impl NumericValue {
    pub fn integer(raw: u128, base: Base, width: BitWidth) -> Self {
        NumericValue::Integer(IntValue::new(raw, base, width))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, NumericValue::Integer(_))
    }

    /// Real view of the cell (integers read as unsigned)
    pub fn as_f64(&self) -> f64 {
        match self {
            NumericValue::Real(v) => *v,
            NumericValue::Integer(i) => i.to_f64(),
        }
    }

    pub fn as_int(&self) -> Option<&IntValue> {
        match self {
            NumericValue::Integer(i) => Some(i),
            NumericValue::Real(_) => None,
        }
    }

    /// Integer -> Real is always representable (rounded above 2^53).
    pub fn to_real(&self) -> NumericValue {
        NumericValue::Real(self.as_f64())
    }

    /// Real -> Integer: truncate toward zero, then fit the magnitude into
    /// `width` according to `policy`. Integers are re-tagged only.
    pub fn to_integer(
        &self,
        base: Base,
        width: BitWidth,
        policy: CoercionPolicy,
    ) -> Result<NumericValue, CalcError> {
        let v = match self {
            NumericValue::Integer(i) => {
                return Ok(NumericValue::Integer(IntValue::new(i.bits(), i.base(), width)))
            }
            NumericValue::Real(v) => *v,
        };

        let truncated = v.trunc();
        let negative = truncated < 0.0;
        let magnitude = truncated.abs();
        // Exact power of two, so the comparison is exact for every width
        let limit = 2f64.powi(width.bits() as i32);
        let fits = magnitude.is_finite() && magnitude < limit;

        let magnitude = match policy {
            CoercionPolicy::Strict if !fits => {
                return Err(CalcError::Overflow(format!(
                    "{} does not fit in {} bits",
                    v,
                    width.bits()
                )))
            }
            CoercionPolicy::Saturate if magnitude.is_nan() => 0,
            // Negatives clamp to the most negative pattern, 1 << (width - 1)
            CoercionPolicy::Saturate if !fits && negative => 1u128 << (width.bits() - 1),
            CoercionPolicy::Saturate if !fits => width.max_value(),
            _ => magnitude as u128,
        };

        IntValue::from_magnitude(negative, magnitude, base, width).map(NumericValue::Integer)
    }
}

/// Parse a real literal: decimal with optional exponent (`1.5E3`, `2e-4`).
/// With `constants`, `p`/`pi` and `e` stand for π and Euler's number.
pub fn parse_real(token: &str, constants: bool) -> Result<NumericValue, CalcError> {
    if constants {
        match token {
            "p" | "pi" => return Ok(NumericValue::Real(std::f64::consts::PI)),
            "e" => return Ok(NumericValue::Real(std::f64::consts::E)),
            _ => {}
        }
    }

    // f64::from_str also takes "inf" and "NaN"; those are not calculator literals
    let well_formed = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    let value: f64 = if well_formed { token.parse::<f64>().ok() } else { None }
        .ok_or_else(|| CalcError::Parse(format!("unable to convert {} to a number", token)))?;

    if !value.is_finite() {
        return Err(CalcError::Overflow(format!("{} is out of range", token)));
    }
    Ok(NumericValue::Real(value))
}

/// Parse an integer literal in `base`. A leading `-` stores the
/// two's-complement pattern; magnitudes above `2^width - 1` overflow.
pub fn parse_integer(token: &str, base: Base, width: BitWidth) -> Result<NumericValue, CalcError> {
    let (negative, digits) = lexer::integer_literal(token, base).ok_or_else(|| {
        CalcError::Parse(format!("{} is not a valid {} literal", token, base.label()))
    })?;

    let magnitude = u128::from_str_radix(&digits, base.radix()).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => CalcError::Overflow(format!(
            "{} does not fit in {} bits",
            token,
            width.bits()
        )),
        _ => CalcError::Parse(format!("{} is not a valid {} literal", token, base.label())),
    })?;

    IntValue::from_magnitude(negative, magnitude, base, width).map(NumericValue::Integer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(token: &str, base: Base) -> Result<u128, CalcError> {
        parse_integer(token, base, BitWidth::DEFAULT).map(|v| v.as_int().unwrap().bits())
    }

    #[test]
    fn test_bit_width_bounds() {
        assert!(BitWidth::new(0).is_none());
        assert!(BitWidth::new(129).is_none());
        assert_eq!(BitWidth::new(8).unwrap().mask(), 0xFF);
        assert_eq!(BitWidth::new(128).unwrap().mask(), u128::MAX);
        assert_eq!(BitWidth::DEFAULT.max_value(), (1u128 << 48) - 1);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(int("FF", Base::Hex).unwrap(), 255);
        assert_eq!(int("ff", Base::Hex).unwrap(), 255);
        assert_eq!(int("0xFF", Base::Hex).unwrap(), 255);
        assert_eq!(int("DEAD_BEEF", Base::Hex).unwrap(), 0xDEAD_BEEF);
    }

    #[test]
    fn test_parse_rejects_digits_outside_base() {
        assert!(matches!(int("FF", Base::Dec), Err(CalcError::Parse(_))));
        assert!(matches!(int("12", Base::Bin), Err(CalcError::Parse(_))));
        assert!(matches!(int("8", Base::Oct), Err(CalcError::Parse(_))));
        assert!(matches!(int("", Base::Dec), Err(CalcError::Parse(_))));
    }

    #[test]
    fn test_parse_overflow() {
        // 2^48 needs 49 bits
        assert!(matches!(int("281474976710656", Base::Dec), Err(CalcError::Overflow(_))));
        assert_eq!(int("281474976710655", Base::Dec).unwrap(), (1u128 << 48) - 1);
        // Larger than u128 itself
        let huge = "F".repeat(40);
        assert!(matches!(int(&huge, Base::Hex), Err(CalcError::Overflow(_))));
    }

    #[test]
    fn test_parse_negative_integer_is_twos_complement() {
        let width = BitWidth::new(8).unwrap();
        let v = parse_integer("-1", Base::Dec, width).unwrap();
        assert_eq!(v.as_int().unwrap().bits(), 0xFF);
    }

    #[test]
    fn test_parse_real() {
        assert_eq!(parse_real("3.5", false).unwrap(), NumericValue::Real(3.5));
        assert_eq!(parse_real("1.5E3", false).unwrap(), NumericValue::Real(1500.0));
        assert_eq!(parse_real("-2e-2", false).unwrap(), NumericValue::Real(-0.02));
        assert!(matches!(parse_real("abc", false), Err(CalcError::Parse(_))));
        assert!(matches!(parse_real("inf", false), Err(CalcError::Parse(_))));
        assert!(matches!(parse_real("1e999", false), Err(CalcError::Overflow(_))));
    }

    #[test]
    fn test_parse_constants_only_when_enabled() {
        assert_eq!(
            parse_real("p", true).unwrap(),
            NumericValue::Real(std::f64::consts::PI)
        );
        assert!(parse_real("p", false).is_err());
    }

    #[test]
    fn test_to_integer_truncates() {
        let v = NumericValue::Real(3.9)
            .to_integer(Base::Dec, BitWidth::DEFAULT, CoercionPolicy::Strict)
            .unwrap();
        assert_eq!(v.as_int().unwrap().bits(), 3);

        let neg = NumericValue::Real(-2.5)
            .to_integer(Base::Dec, BitWidth::new(8).unwrap(), CoercionPolicy::Strict)
            .unwrap();
        assert_eq!(neg.as_int().unwrap().bits(), 0xFE);
    }

    #[test]
    fn test_to_integer_policies() {
        let width = BitWidth::new(8).unwrap();
        let big = NumericValue::Real(300.0);
        assert!(matches!(
            big.to_integer(Base::Dec, width, CoercionPolicy::Strict),
            Err(CalcError::Overflow(_))
        ));
        let clamped = big
            .to_integer(Base::Dec, width, CoercionPolicy::Saturate)
            .unwrap();
        assert_eq!(clamped.as_int().unwrap().bits(), 255);

        let low = NumericValue::Real(-1000.0)
            .to_integer(Base::Dec, width, CoercionPolicy::Saturate)
            .unwrap();
        assert_eq!(low.as_int().unwrap().bits(), 0x80);
    }

    #[test]
    fn test_numeric_equality_ignores_base() {
        let a = NumericValue::integer(10, Base::Hex, BitWidth::DEFAULT);
        let b = NumericValue::integer(10, Base::Dec, BitWidth::DEFAULT);
        assert_eq!(a, b);
    }
}
