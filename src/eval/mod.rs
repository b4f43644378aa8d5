//! Mode engines for rpncalc
//!
//! Each calculator mode owns an engine that applies operators to the
//! stack. Engines are a closed set, so dispatch is an explicit match on
//! [`ModeEngine`] rather than open-ended lookup.
//!
//! # Operand extraction
//!
//! Every operator declares its [`Arity`]. Unary, binary and ternary
//! operators read their operands with [`Stack::peek`], compute, and only
//! then replace the operands with the result. Reductions read the whole
//! stack and push their result on top. A failing operator therefore never
//! leaves a partially consumed stack behind.

mod basic;
mod helpers;
mod programmer;
mod scientific;
mod stats;

pub use basic::BasicEngine;
pub use programmer::ProgrammerEngine;
pub use scientific::ScientificEngine;
pub use stats::StatsEngine;

use crate::stack::Stack;
use crate::value::NumericValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Overflow: {0}")]
    Overflow(String),
    #[error("Not enough values for operation: {required} required, but only {available} available")]
    EmptyStack { required: usize, available: usize },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Domain error: {0}")]
    Domain(String),
    #[error("Unknown command in {mode} mode: {token}")]
    UnknownCommand { token: String, mode: Mode },
    #[error("No previous stack available")]
    NothingToUndo,
}

/// Calculator mode. Exactly one is active per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Programmer,
    Scientific,
    #[serde(alias = "stats")]
    Statistics,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Basic => "BASIC",
            Mode::Programmer => "PROGRAMMER",
            Mode::Scientific => "SCIENTIFIC",
            Mode::Statistics => "STATISTICS",
        }
    }

    /// Programmer mode stores integer registers, every other mode reals
    pub fn uses_integers(self) -> bool {
        self == Mode::Programmer
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How many operands an operator consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Reads the whole stack, consumes nothing
    Reduction,
    Unary,
    Binary,
    Ternary,
}

impl Arity {
    pub fn operands(self) -> usize {
        match self {
            Arity::Reduction => 0,
            Arity::Unary => 1,
            Arity::Binary => 2,
            Arity::Ternary => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Basic
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Negate,
    // Programmer
    And,
    Or,
    Xor,
    Not,
    ShiftLeftOne,
    ShiftRightOne,
    ShiftLeft,
    ShiftRight,
    BitField,
    // Scientific
    Power,
    Factorial,
    Square,
    SquareRoot,
    Log2,
    LogN,
    Ln,
    Inverse,
    // Statistics
    Sum,
    Average,
    Median,
}

impl Operator {
    pub fn arity(self) -> Arity {
        use Operator::*;
        match self {
            Sum | Average | Median => Arity::Reduction,
            Negate | Not | ShiftLeftOne | ShiftRightOne | Factorial | Square | SquareRoot
            | Log2 | Ln | Inverse => Arity::Unary,
            Add | Subtract | Multiply | Divide | Modulo | And | Or | Xor | ShiftLeft
            | ShiftRight | Power | LogN => Arity::Binary,
            BitField => Arity::Ternary,
        }
    }

    /// Formula shown after the operator runs
    pub fn formula(self) -> &'static str {
        use Operator::*;
        match self {
            Add => "x+y",
            Subtract => "x-y",
            Multiply => "x*y",
            Divide => "x/y",
            Modulo => "x%y",
            Negate => "-x",
            And => "x & y",
            Or => "x | y",
            Xor => "x ^ y",
            Not => "~x",
            ShiftLeftOne => "x << 1",
            ShiftRightOne => "x >> 1",
            ShiftLeft => "x << y",
            ShiftRight => "x >> y",
            BitField => "x[y:z]",
            Power => "x^y",
            Factorial => "x!",
            Square => "x^2",
            SquareRoot => "sqrt(x)",
            Log2 => "log2(x)",
            LogN => "log_x(y)",
            Ln => "ln(x)",
            Inverse => "1/x",
            Sum => "SUM",
            Average => "AVG",
            Median => "MEDIAN",
        }
    }
}

/// Shared contract of the mode engines
pub trait Engine {
    /// Whether this mode recognizes the operator at all
    fn supports(&self, op: Operator) -> bool;

    /// Compute the result of `op` from its operands (oldest first). Must
    /// not have side effects; the caller commits the result to the stack.
    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError>;
}

/// The engine of the active mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeEngine {
    Basic(BasicEngine),
    Programmer(ProgrammerEngine),
    Scientific(ScientificEngine),
    Statistics(StatsEngine),
}

impl ModeEngine {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Basic => ModeEngine::Basic(BasicEngine),
            Mode::Programmer => ModeEngine::Programmer(ProgrammerEngine),
            Mode::Scientific => ModeEngine::Scientific(ScientificEngine),
            Mode::Statistics => ModeEngine::Statistics(StatsEngine),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            ModeEngine::Basic(_) => Mode::Basic,
            ModeEngine::Programmer(_) => Mode::Programmer,
            ModeEngine::Scientific(_) => Mode::Scientific,
            ModeEngine::Statistics(_) => Mode::Statistics,
        }
    }

    pub fn supports(&self, op: Operator) -> bool {
        match self {
            ModeEngine::Basic(e) => e.supports(op),
            ModeEngine::Programmer(e) => e.supports(op),
            ModeEngine::Scientific(e) => e.supports(op),
            ModeEngine::Statistics(e) => e.supports(op),
        }
    }

    fn evaluate(&self, op: Operator, operands: &[NumericValue]) -> Result<NumericValue, CalcError> {
        match self {
            ModeEngine::Basic(e) => e.evaluate(op, operands),
            ModeEngine::Programmer(e) => e.evaluate(op, operands),
            ModeEngine::Scientific(e) => e.evaluate(op, operands),
            ModeEngine::Statistics(e) => e.evaluate(op, operands),
        }
    }

    /// Apply `op` to the stack. On error the stack is untouched.
    pub fn apply(&self, op: Operator, stack: &mut Stack) -> Result<(), CalcError> {
        if !self.supports(op) {
            return Err(CalcError::UnknownCommand {
                token: op.formula().to_string(),
                mode: self.mode(),
            });
        }

        let arity = op.arity();
        let result = match arity {
            Arity::Reduction => {
                if stack.is_empty() {
                    return Err(CalcError::EmptyStack {
                        required: 1,
                        available: 0,
                    });
                }
                self.evaluate(op, stack.as_slice())?
            }
            _ => self.evaluate(op, stack.peek(arity.operands())?)?,
        };

        match arity {
            Arity::Reduction => stack.push(result),
            _ => stack.replace_top(arity.operands(), result)?,
        }
        Ok(())
    }
}
