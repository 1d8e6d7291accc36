//! Alternative textual spellings of operators.
//!
//! `div`, `eq`, `ge`, `gt`, `le`, `lt`, `mod`, `ne`, `not` are matched
//! case-insensitively. `and`/`or` are deliberately absent: they stay
//! identifiers and the parser treats them as logical operators.

use xel_ir::TokenKind;

/// Sorted by spelling for binary search.
const ALTERNATIVES: [(&str, TokenKind); 9] = [
    ("DIV", TokenKind::Div),
    ("EQ", TokenKind::Eq),
    ("GE", TokenKind::Ge),
    ("GT", TokenKind::Gt),
    ("LE", TokenKind::Le),
    ("LT", TokenKind::Lt),
    ("MOD", TokenKind::Mod),
    ("NE", TokenKind::Ne),
    ("NOT", TokenKind::Not),
];

/// Operator kind for an alternative spelling, if `text` is one.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    if !(2..=3).contains(&text.len()) {
        return None;
    }
    let mut upper = [0u8; 3];
    for (dst, src) in upper.iter_mut().zip(text.bytes()) {
        *dst = src.to_ascii_uppercase();
    }
    let key = std::str::from_utf8(&upper[..text.len()]).ok()?;
    ALTERNATIVES
        .binary_search_by(|(spelling, _)| (*spelling).cmp(key))
        .ok()
        .map(|i| ALTERNATIVES[i].1)
}
