//! Display formatting for stack values
//!
//! Integers render in the active base (uppercase hex, no padding, optional
//! `_` grouping every four digits). Reals are rounded to the configured
//! number of significant digits; that rounding is the only precision the
//! display loses, so re-parsing a rendered real gives the value back to
//! within `precision` significant digits. Values whose decimal exponent
//! falls outside `[-4, precision)` switch to exponent form, either normal
//! (`1.5E13`) or engineering (`15E12`, exponent a multiple of three).

use crate::eval::{CalcError, Mode};
use crate::value::{Base, IntValue, NumericValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exponent style for large and small reals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    #[serde(alias = "regular")]
    Normal,
    #[serde(alias = "eng")]
    Engineering,
}

impl Notation {
    pub fn label(self) -> &'static str {
        match self {
            Notation::Normal => "REG",
            Notation::Engineering => "ENG",
        }
    }
}

/// Settings read by the formatter
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    pub base: Base,
    pub notation: Notation,
    /// Significant digits for reals, 1..=17
    pub precision: usize,
    /// Separate bin/oct/hex digits into groups of four
    pub group_digits: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            base: Base::Dec,
            notation: Notation::Normal,
            precision: 10,
            group_digits: false,
        }
    }
}

/// Render one stack cell
pub fn format_value(value: &NumericValue, settings: &DisplaySettings) -> String {
    match value {
        NumericValue::Integer(i) => format_integer(i, settings),
        NumericValue::Real(v) => format_real(*v, settings),
    }
}

fn format_integer(value: &IntValue, settings: &DisplaySettings) -> String {
    let bits = value.bits();
    let digits = match settings.base {
        Base::Bin => format!("{:b}", bits),
        Base::Oct => format!("{:o}", bits),
        Base::Dec => format!("{}", bits),
        Base::Hex => format!("{:X}", bits),
    };

    if settings.group_digits && settings.base != Base::Dec && digits.len() > 4 {
        group_digits(&digits)
    } else {
        digits
    }
}

/// 110100101 -> 1_1010_0101
fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let head = chars.len() % 4;
    let mut groups: Vec<String> = Vec::new();
    if head > 0 {
        groups.push(chars[..head].iter().collect());
    }
    for chunk in chars[head..].chunks(4) {
        groups.push(chunk.iter().collect());
    }
    groups.join("_")
}

fn format_real(value: f64, settings: &DisplaySettings) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let precision = settings.precision.clamp(1, 17);

    // Rounded to `precision` significant digits: "-1.234500000e13"
    let rounded = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match rounded.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (rounded.as_str(), 0),
    };

    if (-4..precision as i32).contains(&exponent) {
        let plain: f64 = rounded.parse().unwrap_or(value);
        return format!("{}", plain);
    }

    let negative = mantissa.starts_with('-');
    let mut digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();
    while digits.len() > 1 && digits.ends_with('0') {
        digits.pop();
    }

    let (int_len, exponent) = match settings.notation {
        Notation::Normal => (1, exponent),
        Notation::Engineering => {
            let eng = exponent.div_euclid(3) * 3;
            ((exponent - eng) as usize + 1, eng)
        }
    };
    while digits.len() < int_len {
        digits.push('0');
    }

    let (int_part, frac_part) = digits.split_at(int_len);
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}E{}", sign, int_part, exponent)
    } else {
        format!("{}{}.{}E{}", sign, int_part, frac_part, exponent)
    }
}

/// The dotted mode line: `.....PROGRAMMER..........HEX......`
pub fn mode_line(mode: Mode, base: Base, notation: Notation) -> String {
    let status = match mode {
        Mode::Programmer => base.label(),
        Mode::Scientific => notation.label(),
        Mode::Basic | Mode::Statistics => "",
    };
    format!(".....{:.<15}...{:.>5}......", mode.label(), status)
}

/// Everything the front end needs to redraw after a command
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    pub mode: Mode,
    pub base: Base,
    pub notation: Notation,
    /// Rendered values, bottom of stack first
    pub stack: Vec<String>,
    /// Formula of the last operator
    pub message: Option<String>,
    /// Error raised by the last command
    pub error: Option<CalcError>,
    /// Help text requested with `?`
    pub help: Option<String>,
}

impl DisplayState {
    pub fn mode_line(&self) -> String {
        mode_line(self.mode, self.base, self.notation)
    }

    /// Rendered top of stack
    pub fn top(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.mode_line())?;

        if let Some(err) = &self.error {
            writeln!(f, "{:>34}", format!("ERROR:  {}", err))?;
        } else if let Some(msg) = &self.message {
            writeln!(f, "{:>34}", msg)?;
        }
        writeln!(f)?;

        if let Some(help) = &self.help {
            return write!(f, "{}", help);
        }

        for (idx, val) in self.stack.iter().enumerate() {
            writeln!(f, "{}> {}", idx, val)?;
        }
        write!(f, "{}> ", self.stack.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::BitWidth;

    fn settings(base: Base) -> DisplaySettings {
        DisplaySettings {
            base,
            ..DisplaySettings::default()
        }
    }

    fn real(v: f64, notation: Notation) -> String {
        let s = DisplaySettings {
            notation,
            ..DisplaySettings::default()
        };
        format_value(&NumericValue::Real(v), &s)
    }

    #[test]
    fn test_integer_bases() {
        let v = NumericValue::integer(255, Base::Dec, BitWidth::DEFAULT);
        assert_eq!(format_value(&v, &settings(Base::Bin)), "11111111");
        assert_eq!(format_value(&v, &settings(Base::Oct)), "377");
        assert_eq!(format_value(&v, &settings(Base::Dec)), "255");
        assert_eq!(format_value(&v, &settings(Base::Hex)), "FF");
    }

    #[test]
    fn test_integer_grouping() {
        let v = NumericValue::integer(0x1A5, Base::Hex, BitWidth::DEFAULT);
        let grouped = DisplaySettings {
            base: Base::Bin,
            group_digits: true,
            ..DisplaySettings::default()
        };
        assert_eq!(format_value(&v, &grouped), "1_1010_0101");
        let dec = DisplaySettings {
            group_digits: true,
            ..DisplaySettings::default()
        };
        assert_eq!(format_value(&v, &dec), "421");
    }

    #[test]
    fn test_real_plain() {
        assert_eq!(real(0.0, Notation::Normal), "0");
        assert_eq!(real(2.5, Notation::Normal), "2.5");
        assert_eq!(real(-12.0, Notation::Normal), "-12");
        assert_eq!(real(0.1 + 0.2, Notation::Normal), "0.3");
        assert_eq!(real(0.0001, Notation::Normal), "0.0001");
        assert_eq!(real(123456789.0, Notation::Normal), "123456789");
    }

    #[test]
    fn test_real_exponent_normal() {
        assert_eq!(real(1.5e13, Notation::Normal), "1.5E13");
        assert_eq!(real(-1.234e-5, Notation::Normal), "-1.234E-5");
        assert_eq!(real(1e10, Notation::Normal), "1E10");
    }

    #[test]
    fn test_real_exponent_engineering() {
        assert_eq!(real(1.5e12, Notation::Engineering), "1.5E12");
        assert_eq!(real(1.5e13, Notation::Engineering), "15E12");
        assert_eq!(real(1.5e14, Notation::Engineering), "150E12");
        assert_eq!(real(1.234e-5, Notation::Engineering), "12.34E-6");
    }

    #[test]
    fn test_mode_line() {
        assert_eq!(
            mode_line(Mode::Programmer, Base::Hex, Notation::Normal),
            ".....PROGRAMMER..........HEX......"
        );
        assert_eq!(
            mode_line(Mode::Basic, Base::Hex, Notation::Normal),
            format!(".....BASIC{}", ".".repeat(24))
        );
    }

    #[test]
    fn test_display_state_render() {
        let state = DisplayState {
            mode: Mode::Basic,
            base: Base::Dec,
            notation: Notation::Normal,
            stack: vec!["5".into(), "0".into()],
            message: None,
            error: Some(CalcError::DivisionByZero),
            help: None,
        };
        let text = state.to_string();
        assert!(text.contains("ERROR:  Division by zero"));
        assert!(text.contains("0> 5\n1> 0\n2> "));
    }
}
