//! Construction-time constant folding.
//!
//! Folding is an optimisation only: anything that cannot be folded stays
//! a plain node and is evaluated normally.

use xel_ir::{ExprArena, ExprId, MapKey, Token, TokenKind, UnaryOp, Value, ValueMap};
use xel_lexer::literal::{
    cook_float, cook_hex_int, cook_hex_long, cook_int, cook_long, cook_real, cook_string,
};
use xel_lexer::LexErrorKind;

use crate::{ParseError, ParseErrorKind};

/// Value of a literal token.
///
/// The lexer already validated the text, so a conversion failure here means
/// the token kinds and the literal cookers disagree.
pub(crate) fn literal(token: Token<'_>) -> Result<Value, ParseError> {
    let text = token.text;
    let value = match token.kind {
        TokenKind::IntLiteral => cook_int(text).map(Value::Int),
        TokenKind::LongLiteral => cook_long(text).map(Value::Long),
        TokenKind::HexIntLiteral => cook_hex_int(text).map(Value::Int),
        TokenKind::HexLongLiteral => cook_hex_long(text).map(Value::Long),
        TokenKind::RealLiteral => cook_real(text).map(Value::Double),
        TokenKind::RealFloatLiteral => cook_float(text).map(Value::Float),
        TokenKind::StringLiteral => Some(Value::string(cook_string(text))),
        _ => None,
    };
    value.ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::Lex(LexErrorKind::MalformedNumber {
                text: text.to_owned(),
            }),
            token.span,
        )
    })
}

/// `-c` and `+c` over a numeric constant.
pub(crate) fn unary(op: UnaryOp, operand: Option<&Value>) -> Option<Value> {
    let operand = operand.filter(|v| v.is_numeric())?;
    match op {
        UnaryOp::Neg => operand.negate(),
        UnaryOp::Plus => Some(operand.clone()),
        UnaryOp::Not => None,
    }
}

/// Inline list whose items are all constant.
pub(crate) fn list(arena: &ExprArena, items: &[ExprId]) -> Option<Value> {
    items
        .iter()
        .map(|&id| arena.get_expr(id).constant.clone())
        .collect::<Option<Vec<_>>>()
        .map(Value::list)
}

/// Inline map whose keys and values are all constant; `entries` interleaves
/// keys and values. Keys that cannot be map keys leave the map unfolded.
pub(crate) fn map(arena: &ExprArena, entries: &[ExprId]) -> Option<Value> {
    let mut map = ValueMap::with_capacity(entries.len() / 2);
    for pair in entries.chunks_exact(2) {
        let key = arena.get_expr(pair[0]).constant.as_ref()?;
        let value = arena.get_expr(pair[1]).constant.clone()?;
        map.insert(MapKey::from_value(key)?, value);
    }
    Some(Value::map(map))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;
    use xel_ir::Span;

    #[test]
    fn literal_kinds() {
        let tok = |kind, text| Token::new(kind, text, Span::DUMMY);
        assert_eq!(literal(tok(TokenKind::IntLiteral, "42")).unwrap(), Value::Int(42));
        assert_eq!(literal(tok(TokenKind::LongLiteral, "42L")).unwrap(), Value::Long(42));
        assert_eq!(literal(tok(TokenKind::HexIntLiteral, "0xFF")).unwrap(), Value::Int(255));
        assert_eq!(literal(tok(TokenKind::RealFloatLiteral, "1.5f")).unwrap(), Value::Float(1.5));
        assert_eq!(
            literal(tok(TokenKind::StringLiteral, "'It''s'")).unwrap(),
            Value::string("It's")
        );
    }

    #[test]
    fn negation_widens_instead_of_failing() {
        assert_eq!(
            unary(UnaryOp::Neg, Some(&Value::Int(i32::MIN))),
            Some(Value::Long(2_147_483_648))
        );
        assert_eq!(unary(UnaryOp::Not, Some(&Value::Bool(true))), None);
        assert_eq!(unary(UnaryOp::Neg, Some(&Value::string("x"))), None);
    }
}
