//! Tests for statement evaluation.

use pretty_assertions::assert_eq;

use super::*;
use crate::var::arith::DivPrecision;

fn eval(session: &mut Session, input: &str) -> String {
    session
        .eval(input)
        .unwrap_or_else(|err| panic!("{input:?} failed: {err:?}"))
        .to_string()
}

#[test]
fn test_typed_literals_and_widening() {
    let mut session = Session::new();
    let result = session.eval("int8(5) + uint32(10)").unwrap();
    assert_eq!(result.kind(), CvType::Uint32);
    assert_eq!(result.to_string(), "15");
}

#[test]
fn test_host_primitives_get_default_kinds() {
    let mut session = Session::new();
    assert_eq!(session.eval("42").unwrap().kind(), CvType::Int64);
    assert_eq!(session.eval("1.5").unwrap().kind(), CvType::Dec64);
    assert_eq!(session.eval(r#""text""#).unwrap().kind(), CvType::String);
    assert_eq!(eval(&mut session, "1 + 2 * 3"), "7");
    assert_eq!(eval(&mut session, "(1 + 2) * 3"), "9");
    assert_eq!(eval(&mut session, "2.0 / 4"), "0.5");
}

#[test]
fn test_assignment_and_reference() {
    let mut session = Session::new();
    let stored = session.eval("x = uint8(7)").unwrap();
    assert_eq!(stored.name(), Some("x"));
    session.eval(r#"y = "hello""#).unwrap();

    assert_eq!(eval(&mut session, "$x * 2"), "14");
    assert_eq!(eval(&mut session, r#"$y + " world""#), "hello world");
    assert_eq!(session.vars().keys().collect::<Vec<_>>(), vec!["x", "y"]);

    // Reassignment replaces in place and may change the kind.
    session.eval("x = ipv4addr(10.0.0.1)").unwrap();
    assert_eq!(session.vars().len(), 2);
    assert_eq!(session.vars().get(0).unwrap().kind(), CvType::Ipv4Addr);
}

#[test]
fn test_compound_assignment_widens_in_place() {
    let mut session = Session::new();
    session.eval("x = int8(100)").unwrap();
    let result = session.eval("x += int16(100)").unwrap();
    assert_eq!(result.kind(), CvType::Int16);
    assert_eq!(result.name(), Some("x"));
    assert_eq!(session.vars().get("x").unwrap().to_string(), "200");

    session.eval("x += $x").unwrap();
    assert_eq!(eval(&mut session, "$x"), "400");
    session.eval("x *= int32(100)").unwrap();
    assert_eq!(session.vars().get("x").unwrap().kind(), CvType::Int32);
    assert_eq!(eval(&mut session, "$x"), "40000");
}

#[test]
fn test_failed_compound_assignment_keeps_value() {
    let mut session = Session::new();
    session.eval("n = uint8(3)").unwrap();
    let err = session.eval("n -= 5").unwrap_err();
    assert_eq!(err.code, codes::VALUE);
    assert!(err.cause.as_ref().is_some_and(crate::Error::is_parse));
    assert_eq!(err.span, Span::new(0, 6));
    assert_eq!(eval(&mut session, "$n"), "3");
}

#[test]
fn test_string_concatenation_with_numbers() {
    let mut session = Session::new();
    assert_eq!(eval(&mut session, r#"decimal64(1.50) + string(a)"#), "1.50a");
    assert_eq!(eval(&mut session, r#""port " + uint16(22)"#), "port 22");
}

#[test]
fn test_division_precision_option() {
    crate::test_utils::init_test_logging();
    let mut session = Session::new();
    assert_eq!(eval(&mut session, "decimal64(10.00) / 4"), "2.50");
    assert_eq!(eval(&mut session, "decimal64(1.0) / decimal64(3.000)"), "0.3");

    session.set_options(ArithOptions {
        div_precision: DivPrecision::Max,
    });
    assert_eq!(eval(&mut session, "decimal64(1.0) / decimal64(3.000)"), "0.333");
}

#[test]
fn test_errors_carry_spans() {
    let mut session = Session::new();

    let err = session.eval("1 + $missing").unwrap_err();
    assert_eq!(err.code, codes::UNDEFINED);
    assert_eq!(err.span, Span::new(4, 12));
    assert_eq!(err.message, "undefined variable 'missing'");

    let err = session.eval("missing += 1").unwrap_err();
    assert_eq!(err.code, codes::UNDEFINED);

    let err = session.eval("1 + uint8(300)").unwrap_err();
    assert_eq!(err.code, codes::VALUE);
    assert_eq!(err.span, Span::new(4, 14));
    assert_eq!(err.message, "invalid format for type 'uint8': `300`");
    assert_eq!(err.help.as_deref(), Some("expected integer in 0..=255"));

    let err = session.eval("ipv4addr(10.0.0.1) - 1").unwrap_err();
    assert_eq!(err.span, Span::new(0, 22));
    assert!(matches!(
        err.cause,
        Some(crate::Error::UnsupportedOperation { op: '-', .. })
    ));

    let err = session.eval("int8(1) / 0").unwrap_err();
    assert_eq!(err.cause, Some(crate::Error::DivisionByZero));
}

#[test]
fn test_parse_errors_leave_session_untouched() {
    let mut session = Session::new();
    session.eval("x = 1").unwrap();
    assert!(session.eval("x = ").is_err());
    assert!(session.eval("y = nosuchtype(1)").is_err());
    assert_eq!(session.vars().len(), 1);
    assert_eq!(eval(&mut session, "$x"), "1");
}
