use rpncalc::{CalcError, Session};

/// Execute a line of tokens, optionally printing the stack afterwards
pub(crate) fn execute_line(
    session: &mut Session,
    input: &str,
    print_output: bool,
) -> Result<(), CalcError> {
    session.execute_line(input)?;
    if print_output {
        print_stack(session);
    }
    Ok(())
}

/// One rendered value per line, bottom of the stack first
pub(crate) fn print_stack(session: &Session) {
    for value in session.display_state().stack {
        println!("{}", value);
    }
}

/// The full panel render without its trailing `depth> ` line, which the
/// REPL uses as its prompt instead
pub(crate) fn panel(session: &Session) -> (String, String) {
    let state = session.display_state();
    let prompt = format!("{}> ", state.depth());
    let render = state.to_string();
    let body = match render.strip_suffix(&prompt) {
        Some(body) => body.to_string(),
        None => render,
    };
    (body, prompt)
}
