//! rpncalc - a reverse polish notation calculator core
//!
//! # Overview
//!
//! Values are pushed onto an explicit stack and operators consume them:
//! `3 4 +` leaves `7`. The calculator runs in one of four modes, each with
//! its own engine and command set:
//!
//! ```text
//! BASIC        floating point arithmetic      + - * / % n
//! PROGRAMMER   fixed-width integer registers  | & ^ ~ , . < > $
//! SCIENTIFIC   functions on reals             ^ ! q r l L ln I
//! STATISTICS   whole-stack reductions         s a m
//! ```
//!
//! Every mode also understands the stack commands (`U` undo, `X` clear,
//! `S` swap, `x` drop, `?` help) and the basic arithmetic.
//!
//! # Meta-commands
//!
//! ```text
//! :b :P :S :s          switch mode (basic, programmer, scientific, stats)
//! :D :H :O :B          switch base (programmer only)
//! :R :E                regular or engineering notation (scientific only)
//! ```
//!
//! Switching between real and integer modes re-coerces the whole stack;
//! if any value does not fit the register the switch is refused. Integers
//! read back as unsigned reals, so `-3` taken through programmer mode and
//! back becomes `2^48 - 3`.
//!
//! # Example
//!
//! ```rust
//! use rpncalc::Session;
//!
//! let mut session = Session::new();
//! for token in [":P", ":H", "FF", "1", "+"] {
//!     session.handle_input(token);
//! }
//! let state = session.display_state();
//! assert_eq!(state.top(), Some("100"));
//! ```

pub mod display;
pub mod eval;
pub mod lexer;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod stack;
pub mod value;

// Re-export commonly used items
pub use display::{format_value, DisplaySettings, DisplayState, Notation};
pub use eval::{CalcError, Mode, ModeEngine, Operator};
pub use lexer::{lex, LexError, Token};
pub use session::Session;
pub use settings::{Config, ConfigError};
pub use stack::Stack;
pub use value::{parse_integer, parse_real, Base, BitWidth, CoercionPolicy, NumericValue};

/// Convenience function: run a line of tokens in a fresh session
pub fn eval(input: &str) -> Result<DisplayState, String> {
    let mut session = Session::new();
    session.execute_line(input).map_err(|e| e.to_string())?;
    Ok(session.display_state())
}
