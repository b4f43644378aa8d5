//! Integration tests for basic mode

#[path = "common/mod.rs"]
mod common;
#[allow(unused_imports)]
use common::{eval, eval_err, eval_top, CalcError, Mode, Session};

#[test]
fn test_add() {
    assert_eq!(eval_top("3 4 +"), "7");
}

#[test]
fn test_operand_order() {
    assert_eq!(eval_top("10 4 -"), "6");
    assert_eq!(eval_top("10 4 /"), "2.5");
}

#[test]
fn test_chained_expression() {
    // (2 + 3) * 4
    assert_eq!(eval_top("2 3 + 4 *"), "20");
}

#[test]
fn test_negate_and_modulo() {
    assert_eq!(eval_top("5 n"), "-5");
    assert_eq!(eval_top("-7 3 %"), "2");
}

#[test]
fn test_divide_by_zero_keeps_stack() {
    let (err, stack) = eval_err("5 0", "/");
    assert_eq!(err, CalcError::DivisionByZero);
    assert_eq!(stack, vec!["5", "0"]);
}

#[test]
fn test_binary_op_depth() {
    let stack = eval("1 2 3 *").unwrap();
    assert_eq!(stack, vec!["1", "6"]);
}

#[test]
fn test_empty_stack_error() {
    let (err, stack) = eval_err("1", "+");
    assert_eq!(
        err,
        CalcError::EmptyStack {
            required: 2,
            available: 1
        }
    );
    assert_eq!(stack, vec!["1"]);
}

#[test]
fn test_parse_error_leaves_stack() {
    let (err, stack) = eval_err("1", "1.2.3");
    assert!(matches!(err, CalcError::Parse(_)));
    assert_eq!(stack, vec!["1"]);
}

#[test]
fn test_other_mode_command_is_unknown() {
    let (err, _) = eval_err("2 3", "^");
    assert_eq!(
        err,
        CalcError::UnknownCommand {
            token: "^".into(),
            mode: Mode::Basic
        }
    );
}

#[test]
fn test_word_aliases() {
    assert_eq!(eval_top("6 7 mul"), "42");
    assert_eq!(eval("1 2 swap").unwrap(), vec!["2", "1"]);
    assert_eq!(eval("1 2 drop").unwrap(), vec!["1"]);
}

#[test]
fn test_handle_input_render() {
    let mut session = Session::new();
    session.handle_input("5");
    session.handle_input("0");
    let state = session.handle_input("/");
    assert_eq!(state.error, Some(CalcError::DivisionByZero));
    let text = state.to_string();
    assert!(text.starts_with(".....BASIC"));
    assert!(text.contains("ERROR:  Division by zero"));
    assert!(text.ends_with("0> 5\n1> 0\n2> "));
}

#[test]
fn test_display_state_is_read_only() {
    let mut session = Session::new();
    session.handle_input("9");
    let a = session.display_state();
    let b = session.display_state();
    assert_eq!(a, b);
    assert_eq!(session.stack().depth(), 1);
}
