//! Integration tests for statistics mode

#[path = "common/mod.rs"]
mod common;
#[allow(unused_imports)]
use common::{eval, eval_err, eval_top, CalcError, Mode, Session};

#[test]
fn test_median_even() {
    assert_eq!(eval_top(":s 1 2 3 4 m"), "2.5");
}

#[test]
fn test_median_odd_unsorted() {
    assert_eq!(eval_top(":s 3 1 2 m"), "2");
}

#[test]
fn test_sum_keeps_operands() {
    assert_eq!(eval(":s 2 4 6 s").unwrap(), vec!["2", "4", "6", "12"]);
}

#[test]
fn test_sum_then_average_composes() {
    // The average includes the pushed sum: (2 + 4 + 6 + 12) / 4
    assert_eq!(
        eval(":s 2 4 6 s a").unwrap(),
        vec!["2", "4", "6", "12", "6"]
    );
}

#[test]
fn test_average() {
    assert_eq!(eval_top(":stats 1 2 3 4 avg"), "2.5");
}

#[test]
fn test_empty_stack() {
    let (err, stack) = eval_err(":s", "s");
    assert_eq!(
        err,
        CalcError::EmptyStack {
            required: 1,
            available: 0
        }
    );
    assert!(stack.is_empty());
}

#[test]
fn test_basic_ops_available() {
    assert_eq!(eval_top(":s 2 3 +"), "5");
}

#[test]
fn test_undo_reduction() {
    let mut session = Session::new();
    session.execute_line(":s 1 2 3 s").unwrap();
    session.execute("U").unwrap();
    assert_eq!(session.display_state().stack, vec!["1", "2", "3"]);
}

#[test]
fn test_scientific_command_unknown() {
    let (err, _) = eval_err(":s 4", "r");
    assert_eq!(
        err,
        CalcError::UnknownCommand {
            token: "r".into(),
            mode: Mode::Statistics
        }
    );
}
