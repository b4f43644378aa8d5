//! Tokenization for rpncalc
//!
//! The front end hands the core one token at a time, but lines typed at the
//! REPL or passed with `-c` hold several whitespace-separated tokens.
//! `:name` tokens are meta-commands (mode, base and notation switches);
//! everything else is a word that is resolved against the active mode's
//! command table and, failing that, parsed as a literal.

use crate::value::Base;
use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt},
    sequence::{pair, preceded},
    IResult,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Operator, stack command or literal
    Word(String),
    /// Meta-command: `:name`
    Meta(String),
}

#[derive(Error, Debug)]
pub enum LexError {
    #[error("Unexpected input: {0}")]
    Unexpected(String),
}

/// Parse a meta-command: :name
fn meta(input: &str) -> IResult<&str, Token> {
    map(
        preceded(char(':'), take_while1(|c: char| !c.is_whitespace())),
        |s: &str| Token::Meta(s.to_string()),
    )(input)
}

/// Parse a word (operator, command or literal)
fn word(input: &str) -> IResult<&str, Token> {
    map(take_while1(|c: char| !c.is_whitespace()), |s: &str| {
        Token::Word(s.to_string())
    })(input)
}

/// Parse any single token
fn token(input: &str) -> IResult<&str, Token> {
    alt((meta, word))(input)
}

/// Split a line into tokens
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, _) = multispace0::<&str, nom::error::Error<&str>>(remaining)
            .map_err(|_| LexError::Unexpected(remaining.to_string()))?;
        if rest.is_empty() {
            break;
        }
        let (rest, tok) =
            token(rest).map_err(|_| LexError::Unexpected(rest.chars().take(16).collect()))?;
        tokens.push(tok);
        remaining = rest;
    }

    Ok(tokens)
}

/// Classify a single token handed over by the front end
pub fn classify(input: &str) -> Token {
    let trimmed = input.trim();
    match all_consuming(token)(trimmed) {
        Ok((_, tok)) => tok,
        Err(_) => Token::Word(trimmed.to_string()),
    }
}

/// Integer literal in `base`: optional `-`, optional base prefix, digits
/// with optional `_` separators. Returns the sign and the bare digits.
pub(crate) fn integer_literal(input: &str, base: Base) -> Option<(bool, String)> {
    let radix = base.radix();
    let result: IResult<&str, (Option<char>, &str)> = all_consuming(pair(
        opt(char('-')),
        preceded(
            opt(tag_no_case(base.prefix())),
            take_while1(|c: char| c.is_digit(radix) || c == '_'),
        ),
    ))(input);

    let (_, (sign, digits)) = result.ok()?;
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return None;
    }
    Some((sign.is_some(), digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_words_and_meta() {
        let tokens = lex("  3 4 + :P  ").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("3".into()),
                Token::Word("4".into()),
                Token::Word("+".into()),
                Token::Meta("P".into()),
            ]
        );
    }

    #[test]
    fn lex_empty_line() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("   \t ").unwrap().is_empty());
    }

    #[test]
    fn classify_single_tokens() {
        assert_eq!(classify(":hex"), Token::Meta("hex".into()));
        assert_eq!(classify(":"), Token::Word(":".into()));
        assert_eq!(classify(" 12 "), Token::Word("12".into()));
    }

    #[test]
    fn integer_literal_prefixes() {
        assert_eq!(integer_literal("0xFF", Base::Hex), Some((false, "FF".into())));
        assert_eq!(integer_literal("0b1010", Base::Bin), Some((false, "1010".into())));
        assert_eq!(integer_literal("-1_000", Base::Dec), Some((true, "1000".into())));
        // 0b1 is a plain hex number, not a binary prefix
        assert_eq!(integer_literal("0b1", Base::Hex), Some((false, "0b1".into())));
    }

    #[test]
    fn integer_literal_rejects() {
        assert_eq!(integer_literal("0x", Base::Hex), None);
        assert_eq!(integer_literal("___", Base::Dec), None);
        assert_eq!(integer_literal("1.5", Base::Dec), None);
        assert_eq!(integer_literal("G", Base::Hex), None);
    }
}
