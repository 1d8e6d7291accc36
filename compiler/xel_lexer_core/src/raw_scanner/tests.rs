use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::{tokenize, RawTag};

/// Tags without whitespace.
fn tags(source: &str) -> Vec<RawTag> {
    tokenize(source)
        .into_iter()
        .map(|t| t.tag)
        .filter(|&t| t != RawTag::Whitespace)
        .collect()
}

fn total_len(source: &str) -> u32 {
    tokenize(source).iter().map(|t| t.len).sum()
}

// ─── Numbers ────────────────────────────────────────────────────

#[test]
fn integer_forms() {
    assert_eq!(tags("42"), vec![RawTag::Int]);
    assert_eq!(tags("42L 42l"), vec![RawTag::Long, RawTag::Long]);
    assert_eq!(tags("0xFF"), vec![RawTag::HexInt]);
    assert_eq!(tags("0x7fL"), vec![RawTag::HexLong]);
}

#[test]
fn real_forms() {
    assert_eq!(tags("1.5"), vec![RawTag::Real]);
    assert_eq!(tags("1.5f 2F"), vec![RawTag::RealFloat, RawTag::RealFloat]);
    assert_eq!(tags("2d 1e10 1.5E-3"), vec![RawTag::Real, RawTag::Real, RawTag::Real]);
}

#[test]
fn dot_after_integer_is_navigation() {
    assert_eq!(tags("1.toString"), vec![RawTag::Int, RawTag::Dot, RawTag::Ident]);
}

#[test]
fn malformed_numbers() {
    assert_eq!(tags("0x"), vec![RawTag::MalformedNumber]);
    assert_eq!(tags("1e"), vec![RawTag::MalformedNumber]);
    assert_eq!(tags("1.5L"), vec![RawTag::MalformedNumber]);
}

// ─── Strings ────────────────────────────────────────────────────

#[test]
fn strings_with_doubled_quotes() {
    let tokens = tokenize("'It''s' \"say \"\"hi\"\"\"");
    assert_eq!(tokens[0].tag, RawTag::String);
    assert_eq!(tokens[0].len, 7);
    assert_eq!(tokens[2].tag, RawTag::String);
    assert_eq!(tokens[2].len, 12);
}

#[test]
fn other_quote_needs_no_escape() {
    assert_eq!(tags("'say \"hi\"'"), vec![RawTag::String]);
}

#[test]
fn unterminated_string_runs_to_end() {
    let tokens = tokenize("'abc");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].tag, RawTag::UnterminatedString);
    assert_eq!(tokens[0].len, 4);
}

#[test]
fn multibyte_inside_string() {
    assert_eq!(tags("'héllo'"), vec![RawTag::String]);
    assert_eq!(total_len("'héllo'"), 8);
}

// ─── Operators ──────────────────────────────────────────────────

#[test]
fn navigation_operators() {
    assert_eq!(
        tags("a?.b?[c]![d]^[e]$[f]"),
        vec![
            RawTag::Ident,
            RawTag::QuestionDot,
            RawTag::Ident,
            RawTag::QuestionBracket,
            RawTag::Ident,
            RawTag::RightBracket,
            RawTag::BangBracket,
            RawTag::Ident,
            RawTag::RightBracket,
            RawTag::CaretBracket,
            RawTag::Ident,
            RawTag::RightBracket,
            RawTag::DollarBracket,
            RawTag::Ident,
            RawTag::RightBracket,
        ]
    );
}

#[test]
fn comparison_and_logic() {
    assert_eq!(
        tags("== != <= >= < > && || ! ="),
        vec![
            RawTag::EqualEqual,
            RawTag::BangEqual,
            RawTag::LessEqual,
            RawTag::GreaterEqual,
            RawTag::Less,
            RawTag::Greater,
            RawTag::AmpAmp,
            RawTag::PipePipe,
            RawTag::Bang,
            RawTag::Equal,
        ]
    );
}

#[test]
fn elvis_and_ternary() {
    assert_eq!(
        tags("a ?: b ? c : d"),
        vec![
            RawTag::Ident,
            RawTag::QuestionColon,
            RawTag::Ident,
            RawTag::Question,
            RawTag::Ident,
            RawTag::Colon,
            RawTag::Ident,
        ]
    );
}

#[test]
fn dollar_identifiers() {
    assert_eq!(tags("$foo"), vec![RawTag::Ident]);
    assert_eq!(tokenize("$foo")[0].len, 4);
}

#[test]
fn invalid_bytes() {
    assert_eq!(tags("a | b"), vec![RawTag::Ident, RawTag::Pipe, RawTag::Ident]);
    assert_eq!(tags("é"), vec![RawTag::InvalidByte]);
    assert_eq!(tags("a\0b"), vec![RawTag::Ident, RawTag::InvalidByte, RawTag::Ident]);
}

// ─── Property Tests ─────────────────────────────────────────────

proptest! {
    #[test]
    fn lengths_cover_ascii_input(source in "[ -~\t\n]{0,64}") {
        prop_assert_eq!(total_len(&source) as usize, source.len());
    }

    #[test]
    fn lengths_cover_unicode_input(source in "\\PC{0,32}") {
        prop_assert_eq!(total_len(&source) as usize, source.len());
    }

    #[test]
    fn no_empty_tokens(source in "[ -~]{0,64}") {
        prop_assert!(tokenize(&source).iter().all(|t| t.len > 0));
    }
}
