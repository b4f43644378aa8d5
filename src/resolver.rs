//! Command tables
//!
//! The single source of truth for which tokens mean what in each mode.
//! Every mode sees the fundamental stack commands and the basic
//! arithmetic, plus its own group. Lookup walks the groups in order, so a
//! symbol can mean different things in different modes (`^` is XOR in
//! programmer mode and power in scientific mode).

use crate::display::Notation;
use crate::eval::{Mode, Operator};
use crate::value::Base;

/// Commands that manage the stack itself rather than compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCommand {
    Undo,
    Clear,
    Swap,
    Drop,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Operator(Operator),
    Stack(StackCommand),
}

/// `:name` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaCommand {
    SwitchMode(Mode),
    SwitchBase(Base),
    SwitchNotation(Notation),
}

pub struct Entry {
    pub tokens: &'static [&'static str],
    pub command: Command,
    pub help: &'static str,
}

const fn op(tokens: &'static [&'static str], op: Operator, help: &'static str) -> Entry {
    Entry {
        tokens,
        command: Command::Operator(op),
        help,
    }
}

const fn stack(tokens: &'static [&'static str], cmd: StackCommand, help: &'static str) -> Entry {
    Entry {
        tokens,
        command: Command::Stack(cmd),
        help,
    }
}

static FUNDAMENTAL: &[Entry] = &[
    stack(&["U", "undo"], StackCommand::Undo, "Undo: retrieve the previous stack"),
    stack(&["X", "clear"], StackCommand::Clear, "Clear the stack"),
    stack(&["S", "swap"], StackCommand::Swap, "Swap the last two values on the stack"),
    stack(&["x", "drop"], StackCommand::Drop, "Pop the last value and discard it"),
    stack(&["?", "help"], StackCommand::Help, "Display this help screen"),
];

static BASIC: &[Entry] = &[
    op(&["+", "add"], Operator::Add, "Add x+y"),
    op(&["-", "sub"], Operator::Subtract, "Subtract x-y"),
    op(&["*", "mul"], Operator::Multiply, "Multiply x*y"),
    op(&["/", "div"], Operator::Divide, "Divide x/y"),
    op(&["%", "mod"], Operator::Modulo, "Remainder of x/y"),
    op(&["n", "neg"], Operator::Negate, "Negate the current value: -x"),
];

static PROGRAMMER: &[Entry] = &[
    op(&["|", "or"], Operator::Or, "Bitwise OR: x | y"),
    op(&["&", "and"], Operator::And, "Bitwise AND: x & y"),
    op(&["^", "xor"], Operator::Xor, "Bitwise XOR: x ^ y"),
    op(&["~", "not"], Operator::Not, "Bitwise NOT: ~x"),
    op(&["$", "bits"], Operator::BitField, "Field of bits: x[y:z]"),
    op(&[",", "shl1"], Operator::ShiftLeftOne, "Shift left: x << 1"),
    op(&[".", "shr1"], Operator::ShiftRightOne, "Shift right: x >> 1"),
    op(&["<", "shl"], Operator::ShiftLeft, "Shift left: x << y"),
    op(&[">", "shr"], Operator::ShiftRight, "Shift right: x >> y"),
];

static SCIENTIFIC: &[Entry] = &[
    op(&["^", "pow"], Operator::Power, "Exponent: x^y"),
    op(&["!", "fact"], Operator::Factorial, "Factorial: x!"),
    op(&["q", "sq"], Operator::Square, "Square: x^2"),
    op(&["r", "sqrt"], Operator::SquareRoot, "Square root: sqrt(x)"),
    op(&["l", "log2"], Operator::Log2, "log2(x)"),
    op(&["L", "logn"], Operator::LogN, "Logarithm of y in base x"),
    op(&["ln"], Operator::Ln, "Natural log: ln(x)"),
    op(&["I", "inv"], Operator::Inverse, "Inverse: 1/x"),
];

static STATISTICS: &[Entry] = &[
    op(&["s", "sum"], Operator::Sum, "Sum of all values in the stack"),
    op(&["a", "avg"], Operator::Average, "Mean of all values in the stack"),
    op(&["m", "median"], Operator::Median, "Median of all values in the stack"),
];

const NONE: &[Entry] = &[];

const SCIENTIFIC_EXTRA_HELP: &str = "    E : Exponential notation (1.5E3)\n    e : Euler's number (2.71828)\n    p : pi (3.14159)\n";

/// Command groups visible in `mode`, in lookup order
pub fn groups(mode: Mode) -> [(&'static str, &'static [Entry]); 3] {
    let own = match mode {
        Mode::Basic => ("Basic Commands", BASIC),
        Mode::Programmer => ("Programmer Commands", PROGRAMMER),
        Mode::Scientific => ("Scientific Commands", SCIENTIFIC),
        Mode::Statistics => ("Statistical Commands", STATISTICS),
    };
    if mode == Mode::Basic {
        [("Fundamental Commands", FUNDAMENTAL), own, ("", NONE)]
    } else {
        [
            ("Fundamental Commands", FUNDAMENTAL),
            ("Basic Commands", BASIC),
            own,
        ]
    }
}

/// Resolve a word in the given mode
pub fn resolve(mode: Mode, token: &str) -> Option<Command> {
    groups(mode)
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .find(|e| e.tokens.contains(&token))
        .map(|e| e.command)
}

/// Whether any mode knows this word
pub fn is_known(token: &str) -> bool {
    [FUNDAMENTAL, BASIC, PROGRAMMER, SCIENTIFIC, STATISTICS]
        .iter()
        .any(|entries| entries.iter().any(|e| e.tokens.contains(&token)))
}

/// Resolve the name of a `:name` meta-command
pub fn resolve_meta(name: &str) -> Option<MetaCommand> {
    let cmd = match name {
        "b" | "basic" => MetaCommand::SwitchMode(Mode::Basic),
        "P" | "programmer" => MetaCommand::SwitchMode(Mode::Programmer),
        "S" | "scientific" => MetaCommand::SwitchMode(Mode::Scientific),
        "s" | "stats" | "statistics" => MetaCommand::SwitchMode(Mode::Statistics),
        "D" | "dec" => MetaCommand::SwitchBase(Base::Dec),
        "H" | "hex" => MetaCommand::SwitchBase(Base::Hex),
        "O" | "oct" => MetaCommand::SwitchBase(Base::Oct),
        "B" | "bin" => MetaCommand::SwitchBase(Base::Bin),
        "R" | "reg" | "normal" => MetaCommand::SwitchNotation(Notation::Normal),
        "E" | "eng" => MetaCommand::SwitchNotation(Notation::Engineering),
        _ => return None,
    };
    Some(cmd)
}

/// Help screen for `mode`: every visible command, grouped
pub fn help_text(mode: Mode) -> String {
    let mut text = format!("{:^30}\n\n", "RPN Commands");
    for (title, entries) in groups(mode).iter() {
        if entries.is_empty() {
            continue;
        }
        text.push_str(&format!("{:<30}\n", title));
        for entry in entries.iter() {
            text.push_str(&format!("\t{} : {}\n", entry.tokens.join(", "), entry.help));
        }
        text.push('\n');
    }
    if mode == Mode::Scientific {
        text.push_str(SCIENTIFIC_EXTRA_HELP);
    }
    text.push_str(&format!(
        "\n{:<30}\n\t:b :P :S :s  basic, programmer, scientific, statistics\n",
        "Mode Commands"
    ));
    match mode {
        Mode::Programmer => text.push_str("\t:D :H :O :B  decimal, hex, octal, binary\n"),
        Mode::Scientific => text.push_str("\t:R :E        regular, engineering notation\n"),
        Mode::Basic | Mode::Statistics => {}
    }
    text
}

/// Every word and meta-command, for completion
pub fn all_words() -> Vec<&'static str> {
    let mut words: Vec<&'static str> = [FUNDAMENTAL, BASIC, PROGRAMMER, SCIENTIFIC, STATISTICS]
        .iter()
        .flat_map(|entries| entries.iter())
        .flat_map(|e| e.tokens.iter().copied())
        .filter(|t| t.len() > 1)
        .collect();
    words.extend([
        ":basic",
        ":programmer",
        ":scientific",
        ":stats",
        ":dec",
        ":hex",
        ":oct",
        ":bin",
        ":reg",
        ":eng",
    ]);
    words.sort_unstable();
    words.dedup();
    words
}
