//! Evaluation errors and their constructors.
//!
//! Constructors return errors without a location; the interpreter attaches
//! the span of the innermost node that failed as the error propagates.

use xel_diagnostic::{Diagnostic, ErrorCode};
use xel_ir::{HostError, Span, Value};

pub type EvalResult<T = Value> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Span of the node that failed; `None` until the interpreter attaches it.
    pub span: Option<Span>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: &'static str, found: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("operator `{op}` is not supported between {left} and {right}")]
    OperatorNotSupported {
        op: &'static str,
        left: String,
        right: String,
    },
    #[error("cannot compare {left} with {right}")]
    NotComparable { left: String, right: String },
    #[error("cannot read property `{name}` of null")]
    PropertyReadOnNull { name: String },
    #[error("cannot call method `{name}` on null")]
    MethodCallOnNull { name: String },
    #[error("cannot index into null")]
    IndexOnNull,
    #[error("property `{name}` not found on {type_name}")]
    PropertyNotFound { name: String, type_name: String },
    #[error("method `{name}` with {arity} argument(s) not found on {type_name}")]
    MethodNotFound {
        name: String,
        arity: usize,
        type_name: String,
    },
    #[error("function `#{name}` not found")]
    FunctionNotFound { name: String },
    #[error("type `{name}` not found")]
    TypeNotFound { name: String },
    #[error("no constructor of `{type_name}` takes {arity} argument(s) of those types")]
    ConstructorNotFound { type_name: String, arity: usize },
    #[error("bean `{name}` not found")]
    BeanNotFound { name: String },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("{type_name} cannot be indexed")]
    NotIndexable { type_name: String },
    #[error("projection is not supported on {type_name}")]
    ProjectionNotSupported { type_name: String },
    #[error("selection is not supported on {type_name}")]
    SelectionNotSupported { type_name: String },
    #[error("selection criteria must evaluate to a boolean, found {found}")]
    SelectionCriteriaNotBoolean { found: String },
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("`{target}` cannot be assigned to")]
    NotAssignable { target: String },
    #[error("{message}")]
    Host { message: String },
    #[error("{type_name} cannot be used as a map key")]
    InvalidMapKey { type_name: String },
    #[error("cannot convert {value} to {target}")]
    NumericConversion { value: String, target: &'static str },
    #[error("{what} would exceed {limit} {unit}")]
    ResultTooLarge {
        what: &'static str,
        limit: u64,
        unit: &'static str,
    },
}

impl EvalError {
    #[cold]
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Attach `span` unless an inner node already did.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            EvalErrorKind::TypeMismatch { .. } => ErrorCode::E3001,
            EvalErrorKind::DivisionByZero => ErrorCode::E3002,
            EvalErrorKind::OperatorNotSupported { .. } => ErrorCode::E3003,
            EvalErrorKind::NotComparable { .. } => ErrorCode::E3004,
            EvalErrorKind::PropertyReadOnNull { .. }
            | EvalErrorKind::MethodCallOnNull { .. }
            | EvalErrorKind::IndexOnNull => ErrorCode::E3005,
            EvalErrorKind::PropertyNotFound { .. } => ErrorCode::E3006,
            EvalErrorKind::MethodNotFound { .. } => ErrorCode::E3007,
            EvalErrorKind::FunctionNotFound { .. } => ErrorCode::E3008,
            EvalErrorKind::TypeNotFound { .. } => ErrorCode::E3009,
            EvalErrorKind::ConstructorNotFound { .. } => ErrorCode::E3010,
            EvalErrorKind::BeanNotFound { .. } => ErrorCode::E3011,
            EvalErrorKind::IndexOutOfBounds { .. } | EvalErrorKind::NotIndexable { .. } => {
                ErrorCode::E3012
            }
            EvalErrorKind::ProjectionNotSupported { .. } => ErrorCode::E3013,
            EvalErrorKind::SelectionNotSupported { .. } => ErrorCode::E3014,
            EvalErrorKind::SelectionCriteriaNotBoolean { .. } => ErrorCode::E3015,
            EvalErrorKind::InvalidPattern { .. } => ErrorCode::E3016,
            EvalErrorKind::NotAssignable { .. } => ErrorCode::E3017,
            EvalErrorKind::Host { .. } => ErrorCode::E3018,
            EvalErrorKind::InvalidMapKey { .. } => ErrorCode::E3019,
            EvalErrorKind::NumericConversion { .. } => ErrorCode::E3020,
            EvalErrorKind::ResultTooLarge { .. } => ErrorCode::E3021,
        }
    }

    /// Byte offset of the failing node, or 0 when no node was attached.
    pub fn position(&self) -> u32 {
        self.span.map_or(0, |span| span.start)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            self.code(),
            self.kind.to_string(),
            self.span.unwrap_or(Span::DUMMY),
        )
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

impl From<HostError> for EvalError {
    fn from(err: HostError) -> Self {
        EvalError::new(EvalErrorKind::Host {
            message: err.message,
        })
    }
}

impl From<&EvalError> for Diagnostic {
    fn from(err: &EvalError) -> Self {
        err.to_diagnostic()
    }
}

// Operand and operator errors

#[cold]
pub fn type_mismatch(expected: &'static str, found: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::TypeMismatch {
        expected,
        found: found.type_name(),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::new(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn operator_not_supported(op: &'static str, left: &Value, right: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::OperatorNotSupported {
        op,
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn not_comparable(left: &Value, right: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::NotComparable {
        left: left.type_name(),
        right: right.type_name(),
    })
}

#[cold]
pub fn numeric_conversion(value: &impl ToString, target: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::NumericConversion {
        value: value.to_string(),
        target,
    })
}

#[cold]
pub fn result_too_large(what: &'static str, limit: u64, unit: &'static str) -> EvalError {
    EvalError::new(EvalErrorKind::ResultTooLarge { what, limit, unit })
}

// Navigation errors

#[cold]
pub fn property_read_on_null(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::PropertyReadOnNull {
        name: name.to_owned(),
    })
}

#[cold]
pub fn method_call_on_null(name: &str) -> EvalError {
    EvalError::new(EvalErrorKind::MethodCallOnNull {
        name: name.to_owned(),
    })
}

#[cold]
pub fn property_not_found(name: &str, target: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::PropertyNotFound {
        name: name.to_owned(),
        type_name: target.type_name(),
    })
}

#[cold]
pub fn method_not_found(name: &str, arity: usize, target: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::MethodNotFound {
        name: name.to_owned(),
        arity,
        type_name: target.type_name(),
    })
}

#[cold]
pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalError::new(EvalErrorKind::IndexOutOfBounds { index, len })
}

#[cold]
pub fn invalid_map_key(key: &Value) -> EvalError {
    EvalError::new(EvalErrorKind::InvalidMapKey {
        type_name: key.type_name(),
    })
}

#[cold]
pub fn not_assignable(target: &str) -> EvalError {
    EvalError::new(EvalErrorKind::NotAssignable {
        target: target.to_owned(),
    })
}
