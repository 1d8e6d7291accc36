//! Diagnostics shared by every pipeline stage.
//!
//! Each stage keeps its own error type (`LexError`, `ParseError`,
//! `EvalError`); all of them map to a stable [`ErrorCode`] and convert into
//! a [`Diagnostic`] for display.

mod diagnostic;
mod error_code;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
