//! Tree-walking interpreter for xel expressions.
//!
//! Evaluates a parsed [`Ast`] against a host [`EvaluationContext`]:
//!
//! ```text
//! let ast = xel_parse::parse("name.toUpperCase() + '!'", 10_000)?;
//! let mut ctx = StandardEvaluationContext::new().with_root(person);
//! let result = xel_eval::evaluate(&ast, &mut ctx, &PatternCache::new())?;
//! ```
//!
//! The AST is never mutated; every call builds its own
//! [`EvaluationState`], so one AST can be evaluated from several threads.

mod builtins;
mod comparator;
mod context;
pub mod errors;
mod interpreter;
pub mod numeric;
mod operators;
mod pattern_cache;
mod profile;
mod state;

pub use comparator::{
    OperatorOverloader, StandardOperatorOverloader, StandardTypeComparator, TypeComparator,
};
pub use context::{EvaluationContext, HostType, StandardEvaluationContext};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{read_property, Interpreter};
pub use pattern_cache::PatternCache;
pub use profile::{ProfileSlot, TypeProfile};
pub use state::EvaluationState;

use xel_ir::{Ast, TypedValue};

/// Evaluate `ast` once.
#[tracing::instrument(level = "debug", skip_all)]
pub fn evaluate(
    ast: &Ast,
    context: &mut dyn EvaluationContext,
    patterns: &PatternCache,
) -> EvalResult<TypedValue> {
    Interpreter::new(ast, context, patterns).evaluate()
}

/// Evaluate `ast` once, recording node descriptors into `profile`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn evaluate_profiled(
    ast: &Ast,
    context: &mut dyn EvaluationContext,
    patterns: &PatternCache,
    profile: &mut TypeProfile,
) -> EvalResult<TypedValue> {
    Interpreter::new(ast, context, patterns)
        .with_profile(profile)
        .evaluate()
}
