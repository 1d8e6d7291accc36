//! Parse errors.
//!
//! Every error carries the span of the token that triggered it. Operand
//! errors point at the operator, so `1 >` reports position 2.

use xel_diagnostic::{Diagnostic, ErrorCode};
use xel_ir::Span;
use xel_lexer::{LexError, LexErrorKind};

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum ParseErrorKind {
    /// Input ended before a production completed.
    #[error("unexpected end of expression")]
    OutOfData,
    #[error("expected {expected}, found `{found}`")]
    UnexpectedToken { expected: &'static str, found: String },
    /// A complete expression was followed by more tokens.
    #[error("unexpected `{found}` after the end of the expression")]
    MoreInput { found: String },
    #[error("left operand missing for `{op}`")]
    LeftOperandMissing { op: String },
    #[error("right operand missing for `{op}`")]
    RightOperandMissing { op: String },
    #[error("invalid qualified name: `{found}` is not an identifier")]
    InvalidQualifiedId { found: String },
    #[error("operator `{op}` is not supported")]
    UnsupportedOperator { op: String },
    /// Checked before lexing.
    #[error("expression is {length} characters long; the maximum is {max}")]
    ExpressionTooLong { length: usize, max: usize },
    #[error(transparent)]
    Lex(LexErrorKind),
}

impl ParseError {
    #[cold]
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            ParseErrorKind::OutOfData => ErrorCode::E2002,
            ParseErrorKind::UnexpectedToken { .. } | ParseErrorKind::UnsupportedOperator { .. } => {
                ErrorCode::E2001
            }
            ParseErrorKind::MoreInput { .. } => ErrorCode::E2003,
            ParseErrorKind::LeftOperandMissing { .. } => ErrorCode::E2004,
            ParseErrorKind::RightOperandMissing { .. } => ErrorCode::E2005,
            ParseErrorKind::InvalidQualifiedId { .. } => ErrorCode::E2006,
            ParseErrorKind::ExpressionTooLong { .. } => ErrorCode::E2007,
            ParseErrorKind::Lex(kind) => LexError::new(kind.clone(), self.span).code(),
        }
    }

    /// Byte offset the error is reported at.
    pub fn position(&self) -> u32 {
        self.span.start
    }

    pub fn is_lex_error(&self) -> bool {
        matches!(self.kind, ParseErrorKind::Lex(_))
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.code(), self.kind.to_string(), self.span)
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span)
    }
}
