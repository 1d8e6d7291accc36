#![allow(clippy::unwrap_used, reason = "tests")]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use xel_diagnostic::ErrorCode;

use crate::{lex, normalize_operators, LexErrorKind};

#[test]
fn int_out_of_range() {
    let err = lex("1 + 2147483648").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::NumberOutOfRange {
            text: "2147483648".to_owned(),
            ty: "int"
        }
    );
    assert_eq!(err.position(), 4);
    assert_eq!(err.code(), ErrorCode::E1003);
}

#[test]
fn long_suffix_accepts_wider_values() {
    assert!(lex("2147483648L").is_ok());
}

#[test]
fn unterminated_string_points_at_opening_quote() {
    let err = lex("name == 'abc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.position(), 8);
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn malformed_hex() {
    let err = lex("0x + 1").unwrap_err();
    assert_eq!(
        err.kind,
        LexErrorKind::MalformedNumber {
            text: "0x".to_owned()
        }
    );
}

#[test]
fn lone_pipe_is_invalid() {
    let err = lex("a | b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidCharacter { found: '|' });
    assert_eq!(err.position(), 2);
}

#[test]
fn normalize_pointcut_text() {
    assert_eq!(
        normalize_operators("execution(* *(..)) and args(String)").unwrap(),
        "execution(* *(..)) && args(String)"
    );
    assert_eq!(
        normalize_operators("a OR b And c").unwrap(),
        "a || b && c"
    );
}

#[test]
fn normalize_keeps_strings_and_properties() {
    assert_eq!(
        normalize_operators("'black and white' or x.and").unwrap(),
        "'black and white' || x.and"
    );
    assert_eq!(normalize_operators("android or order").unwrap(), "android || order");
}

#[test]
fn normalize_reports_lex_errors() {
    assert!(normalize_operators("a and 'b").is_err());
}

proptest! {
    #[test]
    fn lexing_never_panics(source in "[ -~]{0,64}") {
        let _ = lex(&source);
    }

    #[test]
    fn tokens_are_ordered_and_within_source(source in "[a-z0-9 +*/()<>=!.#{},:?'-]{0,48}") {
        if let Ok(tokens) = lex(&source) {
            let mut last_end = 0;
            for token in tokens.iter() {
                prop_assert!(token.start() >= last_end);
                prop_assert!(token.end() as usize <= source.len());
                last_end = token.end();
            }
        }
    }
}
