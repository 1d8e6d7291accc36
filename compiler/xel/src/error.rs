//! Facade error: either stage of parse-then-evaluate.

use xel_diagnostic::{Diagnostic, ErrorCode};
use xel_eval::EvalError;
use xel_parse::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl ExpressionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExpressionError::Parse(err) => err.code(),
            ExpressionError::Eval(err) => err.code(),
        }
    }

    /// Byte offset in the expression text.
    pub fn position(&self) -> u32 {
        match self {
            ExpressionError::Parse(err) => err.position(),
            ExpressionError::Eval(err) => err.position(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ExpressionError::Parse(err) => err.to_diagnostic(),
            ExpressionError::Eval(err) => err.to_diagnostic(),
        }
    }
}
