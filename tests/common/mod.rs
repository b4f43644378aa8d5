//! Common test utilities for rpncalc integration tests

#[allow(unused_imports)]
pub use rpncalc::{CalcError, Config, DisplayState, Mode, Session};

/// Run a line of tokens in a fresh session and return the rendered stack
pub fn eval(input: &str) -> Result<Vec<String>, CalcError> {
    let mut session = Session::new();
    session.execute_line(input)?;
    Ok(session.display_state().stack)
}

/// Rendered top of stack after running `input`
#[allow(dead_code)]
pub fn eval_top(input: &str) -> String {
    eval(input)
        .unwrap()
        .last()
        .cloned()
        .unwrap_or_default()
}

/// Run `setup`, then `input`, returning the error `input` raised and the
/// stack it left behind
#[allow(dead_code)]
pub fn eval_err(setup: &str, input: &str) -> (CalcError, Vec<String>) {
    let mut session = Session::new();
    session.execute_line(setup).unwrap();
    let err = session.execute_line(input).unwrap_err();
    (err, session.display_state().stack)
}

/// Session built from a TOML snippet
#[allow(dead_code)]
pub fn session_from(toml: &str) -> Session {
    Session::with_config(Config::from_toml_str(toml).unwrap()).unwrap()
}
