//! Operator matching helpers.
//!
//! Word operators (`and`, `or`, `instanceof`, `matches`, `between`) lex as
//! identifiers and are recognised here, case-insensitively.

use xel_ir::{BinaryOp, TokenKind, UnaryOp};

use crate::Parser;

impl Parser<'_> {
    pub(crate) fn match_or_op(&self) -> Option<BinaryOp> {
        let token = self.current();
        (token.kind == TokenKind::SymbolicOr || token.is_word("or")).then_some(BinaryOp::Or)
    }

    pub(crate) fn match_and_op(&self) -> Option<BinaryOp> {
        let token = self.current();
        (token.kind == TokenKind::SymbolicAnd || token.is_word("and")).then_some(BinaryOp::And)
    }

    pub(crate) fn match_relational_op(&self) -> Option<BinaryOp> {
        let token = self.current();
        match token.kind {
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::Ne => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            TokenKind::Identifier if token.is_word("instanceof") => Some(BinaryOp::InstanceOf),
            TokenKind::Identifier if token.is_word("matches") => Some(BinaryOp::Matches),
            TokenKind::Identifier if token.is_word("between") => Some(BinaryOp::Between),
            _ => None,
        }
    }

    pub(crate) fn match_additive_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub(crate) fn match_multiplicative_op(&self) -> Option<BinaryOp> {
        match self.current_kind() {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Div => Some(BinaryOp::Div),
            TokenKind::Mod => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    pub(crate) fn match_unary_op(&self) -> Option<UnaryOp> {
        match self.current_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }

    /// Words that only ever appear in operator position.
    pub(crate) fn at_operator_word(&self) -> bool {
        let token = self.current();
        ["and", "or", "instanceof", "matches", "between"]
            .iter()
            .any(|word| token.is_word(word))
    }
}
