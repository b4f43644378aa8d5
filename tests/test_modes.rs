//! Integration tests for mode switching and coercion

#[path = "common/mod.rs"]
mod common;
#[allow(unused_imports)]
use common::{eval, eval_err, eval_top, session_from, CalcError, Mode, Session};

#[test]
fn test_initial_mode() {
    let session = Session::new();
    assert_eq!(session.mode(), Mode::Basic);
    assert!(session.stack().is_empty());
}

#[test]
fn test_switch_keeps_stack() {
    assert_eq!(eval("1 2 :S").unwrap(), vec!["1", "2"]);
    assert_eq!(eval("1 2 :s :b").unwrap(), vec!["1", "2"]);
}

#[test]
fn test_real_truncates_into_programmer() {
    assert_eq!(eval(":b 3.5 :P").unwrap(), vec!["3"]);
    assert_eq!(eval("3.9 n :P :H").unwrap(), vec!["FFFFFFFFFFFD"]);
}

#[test]
fn test_strict_rejects_out_of_range() {
    let mut session = session_from("bit_width = 8");
    session.execute_line("1 300").unwrap();
    let err = session.execute(":P").unwrap_err();
    assert!(matches!(err, CalcError::Overflow(_)));
    // Nothing changed: still basic, both values intact
    assert_eq!(session.mode(), Mode::Basic);
    assert_eq!(session.display_state().stack, vec!["1", "300"]);
}

#[test]
fn test_strict_in_range_truncates() {
    let mut session = session_from("bit_width = 8");
    session.execute_line("3.5 255 :P").unwrap();
    assert_eq!(session.display_state().stack, vec!["3", "255"]);
}

#[test]
fn test_saturate_clamps() {
    let mut session = session_from("bit_width = 8\ncoercion = \"saturate\"");
    session.execute_line("3.5 300 :P").unwrap();
    assert_eq!(session.mode(), Mode::Programmer);
    assert_eq!(session.display_state().stack, vec!["3", "255"]);
}

#[test]
fn test_saturate_clamps_negatives_to_most_negative() {
    let mut session = session_from("bit_width = 8\ncoercion = \"saturate\"");
    session.execute_line("-1000 -3.5 :P").unwrap();
    // 0x80 is -128 as a signed byte; in-range values truncate as usual
    assert_eq!(session.display_state().stack, vec!["128", "253"]);
    session.execute(":H").unwrap();
    assert_eq!(session.display_state().stack, vec!["80", "FD"]);
}

#[test]
fn test_integer_to_real_is_unsigned() {
    assert_eq!(eval(":P :H FF :b").unwrap(), vec!["255"]);
    let mut session = session_from("bit_width = 8\nmode = \"programmer\"");
    session.execute_line("-1 :b").unwrap();
    assert_eq!(session.display_state().stack, vec!["255"]);
}

#[test]
fn test_round_trip_through_programmer() {
    assert_eq!(eval_top("2 10 :P :b /"), "0.2");
}

#[test]
fn test_unknown_meta_command() {
    let (err, _) = eval_err("", ":frob");
    assert_eq!(
        err,
        CalcError::UnknownCommand {
            token: ":frob".into(),
            mode: Mode::Basic
        }
    );
}

#[test]
fn test_switch_to_same_mode_keeps_history() {
    let mut session = Session::new();
    session.execute_line("1 :b").unwrap();
    session.execute("U").unwrap();
    assert!(session.stack().is_empty());
}

#[test]
fn test_isolated_sessions() {
    let mut a = Session::new();
    let mut b = Session::new();
    a.execute_line("1 :P").unwrap();
    b.execute("2").unwrap();
    assert_eq!(a.mode(), Mode::Programmer);
    assert_eq!(b.mode(), Mode::Basic);
    assert_eq!(b.display_state().stack, vec!["2"]);
}
