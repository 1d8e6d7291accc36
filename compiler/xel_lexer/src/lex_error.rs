//! Lexer errors.

use xel_diagnostic::{Diagnostic, ErrorCode};
use xel_ir::Span;

/// A lexer error. Lexing is all-or-nothing: the first error ends it.
#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unexpected character `{found}`")]
    InvalidCharacter { found: char },
    #[error("malformed numeric literal `{text}`")]
    MalformedNumber { text: String },
    #[error("literal `{text}` does not fit in {ty}")]
    NumberOutOfRange { text: String, ty: &'static str },
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E1001,
            LexErrorKind::InvalidCharacter { .. } => ErrorCode::E1002,
            LexErrorKind::MalformedNumber { .. } | LexErrorKind::NumberOutOfRange { .. } => {
                ErrorCode::E1003
            }
        }
    }

    /// Byte offset of the offending text.
    pub fn position(&self) -> u32 {
        self.span.start
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(self.code(), self.kind.to_string(), self.span)
    }
}
