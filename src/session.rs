//! Calculator session
//!
//! A [`Session`] owns everything that changes while the calculator runs:
//! the stack, the active mode engine, display settings and undo history.
//! The front end feeds it one token at a time through
//! [`Session::handle_input`] and redraws from the returned [`DisplayState`].
//!
//! Every command is atomic. When a command fails the stack, mode and
//! display settings are exactly what they were before it ran; only the
//! error slot of the next render changes.

use crate::display::{format_value, DisplaySettings, DisplayState, Notation};
use crate::eval::{CalcError, Mode, ModeEngine, Operator};
use crate::lexer::{self, Token};
use crate::resolver::{self, Command, MetaCommand, StackCommand};
use crate::settings::{Config, ConfigError};
use crate::stack::Stack;
use crate::value::{self, Base, BitWidth, CoercionPolicy, NumericValue};
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct Session {
    width: BitWidth,
    engine: ModeEngine,
    stack: Stack,
    settings: DisplaySettings,
    coercion: CoercionPolicy,
    undo_depth: usize,
    /// Stacks as they were before each recorded command, newest last
    history: VecDeque<Vec<NumericValue>>,
    message: Option<String>,
    error: Option<CalcError>,
    help: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Basic mode, empty stack, decimal base, normal notation
    pub fn new() -> Self {
        Self::from_valid_config(&Config::default(), BitWidth::DEFAULT)
    }

    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let width = config.width()?;
        Ok(Self::from_valid_config(&config, width))
    }

    fn from_valid_config(config: &Config, width: BitWidth) -> Self {
        Session {
            width,
            engine: ModeEngine::for_mode(config.mode),
            stack: Stack::new(),
            settings: config.display_settings(),
            coercion: config.coercion,
            undo_depth: config.undo_depth,
            history: VecDeque::new(),
            message: None,
            error: None,
            help: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn bit_width(&self) -> BitWidth {
        self.width
    }

    pub fn last_error(&self) -> Option<&CalcError> {
        self.error.as_ref()
    }

    /// The live settings worth persisting between runs
    pub fn preferences(&self) -> Config {
        Config {
            bit_width: self.width.bits(),
            mode: self.mode(),
            base: self.settings.base,
            notation: self.settings.notation,
            precision: self.settings.precision,
            coercion: self.coercion,
            undo_depth: self.undo_depth,
            group_digits: self.settings.group_digits,
        }
    }

    /// Process one token and return the render that follows it
    pub fn handle_input(&mut self, input: &str) -> DisplayState {
        self.handle_token(lexer::classify(input))
    }

    pub fn handle_token(&mut self, token: Token) -> DisplayState {
        self.help = None;
        self.message = None;
        self.error = self.dispatch(&token).err();
        self.display_state()
    }

    /// Process one token, reporting failure as a `Result`
    pub fn execute(&mut self, input: &str) -> Result<(), CalcError> {
        self.help = None;
        self.message = None;
        let result = self.dispatch(&lexer::classify(input));
        self.error = result.clone().err();
        result
    }

    /// Process a whitespace-separated line, stopping at the first error.
    /// Tokens before the failing one stay applied.
    pub fn execute_line(&mut self, line: &str) -> Result<(), CalcError> {
        let tokens = lexer::lex(line).map_err(|e| CalcError::Parse(e.to_string()))?;
        self.help = None;
        self.message = None;
        self.error = None;
        for token in &tokens {
            if let Err(err) = self.dispatch(token) {
                self.error = Some(err.clone());
                return Err(err);
            }
        }
        Ok(())
    }

    /// Read-only render of the current state
    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            mode: self.mode(),
            base: self.settings.base,
            notation: self.settings.notation,
            stack: self
                .stack
                .iter()
                .map(|v| format_value(v, &self.settings))
                .collect(),
            message: self.message.clone(),
            error: self.error.clone(),
            help: self.help.clone(),
        }
    }

    fn dispatch(&mut self, token: &Token) -> Result<(), CalcError> {
        let mode = self.mode();
        debug!(?token, %mode, "dispatch");

        let result = match token {
            Token::Meta(name) => match resolver::resolve_meta(name) {
                Some(meta) => self.run_meta(meta, name),
                None => Err(self.unknown(format!(":{}", name))),
            },
            Token::Word(word) if word.is_empty() => Ok(()),
            // Hex digits win over command words like `a` or `add`
            Token::Word(word) if self.is_hex_literal(word) => self.push_literal(word),
            Token::Word(word) => match resolver::resolve(mode, word) {
                Some(Command::Operator(op)) => self.run_operator(op),
                Some(Command::Stack(cmd)) => self.run_stack_command(cmd),
                None if resolver::is_known(word) => Err(self.unknown(word.clone())),
                None => self.push_literal(word),
            },
        };

        if let Err(err) = &result {
            debug!(%err, "command rejected");
        }
        result
    }

    fn is_hex_literal(&self, word: &str) -> bool {
        self.mode() == Mode::Programmer
            && self.settings.base == Base::Hex
            && lexer::integer_literal(word, Base::Hex).is_some()
    }

    fn unknown(&self, token: String) -> CalcError {
        CalcError::UnknownCommand {
            token,
            mode: self.mode(),
        }
    }

    fn record(&mut self, before: Vec<NumericValue>) {
        if self.undo_depth == 0 {
            return;
        }
        trace!(depth = before.len(), "undo snapshot");
        self.history.push_back(before);
        while self.history.len() > self.undo_depth {
            self.history.pop_front();
        }
    }

    fn run_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        let before = self.stack.snapshot();
        self.engine.apply(op, &mut self.stack)?;
        self.record(before);
        self.message = Some(op.formula().to_string());
        Ok(())
    }

    fn push_literal(&mut self, word: &str) -> Result<(), CalcError> {
        let value = match self.mode() {
            Mode::Programmer => value::parse_integer(word, self.settings.base, self.width)?,
            Mode::Scientific => value::parse_real(word, true)?,
            Mode::Basic | Mode::Statistics => value::parse_real(word, false)?,
        };
        let before = self.stack.snapshot();
        self.stack.push(value);
        self.record(before);
        Ok(())
    }

    fn run_stack_command(&mut self, cmd: StackCommand) -> Result<(), CalcError> {
        let before = self.stack.snapshot();
        match cmd {
            StackCommand::Undo => {
                let previous = self.history.pop_back().ok_or(CalcError::NothingToUndo)?;
                self.stack.replace_all(previous);
                return Ok(());
            }
            StackCommand::Help => {
                self.help = Some(resolver::help_text(self.mode()));
                return Ok(());
            }
            StackCommand::Clear => self.stack.clear(),
            StackCommand::Swap => self.stack.swap_top()?,
            StackCommand::Drop => {
                self.stack.pop()?;
            }
        }
        self.record(before);
        Ok(())
    }

    fn run_meta(&mut self, meta: MetaCommand, name: &str) -> Result<(), CalcError> {
        match meta {
            MetaCommand::SwitchMode(target) => self.switch_mode(target),
            MetaCommand::SwitchBase(base) => {
                if self.mode() != Mode::Programmer {
                    return Err(self.unknown(format!(":{}", name)));
                }
                self.set_base(base);
                Ok(())
            }
            MetaCommand::SwitchNotation(notation) => {
                if self.mode() != Mode::Scientific {
                    return Err(self.unknown(format!(":{}", name)));
                }
                self.set_notation(notation);
                Ok(())
            }
        }
    }

    fn set_base(&mut self, base: Base) {
        debug!(from = ?self.settings.base, to = ?base, "base change");
        self.settings.base = base;
    }

    fn set_notation(&mut self, notation: Notation) {
        debug!(from = ?self.settings.notation, to = ?notation, "notation change");
        self.settings.notation = notation;
    }

    /// Re-coerce every resident value into the target mode's kind. If any
    /// value does not fit, nothing changes.
    fn switch_mode(&mut self, target: Mode) -> Result<(), CalcError> {
        let current = self.mode();
        if target == current {
            return Ok(());
        }

        if target.uses_integers() != current.uses_integers() {
            let coerced = self
                .stack
                .iter()
                .map(|v| {
                    if target.uses_integers() {
                        v.to_integer(self.settings.base, self.width, self.coercion)
                    } else {
                        Ok(v.to_real())
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.stack.replace_all(coerced);
        }

        debug!(from = %current, to = %target, "mode change");
        self.engine = ModeEngine::for_mode(target);
        self.history.clear();
        Ok(())
    }
}
