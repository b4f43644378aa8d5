use crate::cli::CliArgs;
use crate::rcfile::{history_path, load_config, save_preferences};
use crate::terminal::panel;
use rpncalc::resolver::{self, Command};
use rpncalc::{Mode, Session};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;

// ============================================
// CalcHelper: completion and operator hints
// ============================================

/// Completes command words and hints the formula of the operator being
/// typed in the current mode
struct CalcHelper {
    mode: Mode,
    words: Vec<&'static str>,
}

impl Helper for CalcHelper {}

impl Completer for CalcHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        // Find the word being completed
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map(|i| i + 1)
            .unwrap_or(0);
        let prefix = &line[start..pos];

        if prefix.is_empty() {
            return Ok((start, Vec::new()));
        }

        let pairs: Vec<Pair> = self
            .words
            .iter()
            .filter(|w| w.starts_with(prefix))
            .map(|w| Pair {
                display: w.to_string(),
                replacement: w.to_string(),
            })
            .collect();

        Ok((start, pairs))
    }
}

impl Hinter for CalcHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let word = line.split_whitespace().last()?;
        match resolver::resolve(self.mode, word) {
            Some(Command::Operator(op)) => Some(format!("  {}", op.formula())),
            _ => None,
        }
    }
}

impl Highlighter for CalcHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        false
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        // Dim the hint
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for CalcHelper {}

// ============================================
// REPL main loop
// ============================================

pub(crate) fn run_repl(cli: &CliArgs) -> RlResult<()> {
    let mut config = load_config(cli.config.as_deref());
    cli.apply(&mut config);
    let mut session = match Session::with_config(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            Session::new()
        }
    };

    let mut rl: Editor<CalcHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CalcHelper {
        mode: session.mode(),
        words: resolver::all_words(),
    }));

    // Try to load history
    let history = history_path();
    if let Some(ref path) = history {
        let _ = rl.load_history(path);
    }

    loop {
        let (body, prompt) = panel(&session);
        print!("{}", body);

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if matches!(trimmed, "exit" | "quit") {
                    break;
                }

                // Errors land in the next render
                let _ = session.execute_line(trimmed);

                if let Some(helper) = rl.helper_mut() {
                    helper.mode = session.mode();
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C drops the current line
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    // Save history
    if let Some(ref path) = history {
        let _ = rl.save_history(path);
    }
    save_preferences(&session, cli.config.as_deref());

    Ok(())
}
