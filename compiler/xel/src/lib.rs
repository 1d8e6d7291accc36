//! xel: an embeddable expression language.
//!
//! ```text
//! let parser = ExpressionParser::new(ParserConfig::default());
//! let expr = parser.parse("#order.total * 1.2 > 100")?;
//!
//! let mut ctx = StandardEvaluationContext::new();
//! ctx.set_variable("order", order);
//! let over = expr.value(&mut ctx)?;
//! ```
//!
//! # Pipeline
//!
//! - `xel_lexer`: text to tokens, alternative operator spellings
//! - `xel_parse`: tokens to an immutable [`Ast`] with folded constants
//! - `xel_eval`: tree-walking interpreter over an [`EvaluationContext`]
//! - `xel_compile`: type-specialised fast path for hot expressions
//!
//! [`Expression`] ties the last two together according to the
//! [`CompilerMode`] in its parser's [`ParserConfig`].

mod config;
mod error;
mod expression;
mod parser;
mod tracing_setup;

pub use config::{CompilerMode, ParserConfig, UnknownCompilerMode};
pub use error::ExpressionError;
pub use expression::Expression;
pub use parser::ExpressionParser;
pub use tracing_setup::init_tracing;

pub use xel_diagnostic::{Diagnostic, ErrorCode};
pub use xel_eval::{
    EvalError, EvalErrorKind, EvaluationContext, HostType, OperatorOverloader, PatternCache,
    StandardEvaluationContext, StandardOperatorOverloader, StandardTypeComparator,
    TypeComparator,
};
pub use xel_ir::{
    ArrayValue, Ast, Function, HostError, HostObject, MapKey, TypeDesc, TypeRef, TypedValue,
    Value, ValueMap,
};
pub use xel_lexer::{normalize_operators, LexError};
pub use xel_parse::{ParseError, ParseErrorKind};

/// Parse `source` with the default configuration and evaluate it once.
pub fn evaluate(
    source: &str,
    context: &mut dyn EvaluationContext,
) -> Result<TypedValue, ExpressionError> {
    let expression = ExpressionParser::default().parse(source)?;
    Ok(expression.evaluate(context)?)
}
