//! A parsed expression and its compiled fast path.
//!
//! The [`Ast`] never changes after parsing. Everything an `Expression`
//! learns while being evaluated lives beside it:
//!
//! - a [`TypeProfile`] of the descriptors each node produced, filled in by
//!   interpreted evaluations under a mutex;
//! - at most one [`CompiledExpression`], swapped in and out under a
//!   read-write lock.
//!
//! Compiled code that meets a value it was not specialised for reports a
//! deoptimisation; the compiled unit is dropped, the profile starts over and
//! the same evaluation is re-run by the interpreter.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::debug;
use xel_compile::{CompiledExpression, Deopt};
use xel_eval::{EvalError, EvaluationContext, PatternCache, TypeProfile};
use xel_ir::{Ast, TypedValue, Value};

use crate::config::{CompilerMode, ParserConfig};

pub struct Expression {
    ast: Ast,
    config: ParserConfig,
    patterns: Arc<PatternCache>,
    profile: Mutex<TypeProfile>,
    compiled: RwLock<Option<Arc<CompiledExpression>>>,
    failed_compilations: AtomicU32,
}

impl Expression {
    pub(crate) fn new(ast: Ast, config: ParserConfig, patterns: Arc<PatternCache>) -> Self {
        let profile = TypeProfile::new(ast.node_count());
        Expression {
            ast,
            config,
            patterns,
            profile: Mutex::new(profile),
            compiled: RwLock::new(None),
            failed_compilations: AtomicU32::new(0),
        }
    }

    /// Evaluate against `context`, through compiled code when available.
    #[tracing::instrument(level = "debug", skip_all, fields(expression = self.ast.source()))]
    pub fn evaluate(&self, context: &mut dyn EvaluationContext) -> Result<TypedValue, EvalError> {
        let compiled = self.compiled.read().clone();
        if let Some(compiled) = compiled {
            match compiled.execute(&*context) {
                Ok(result) => return Ok(result),
                Err(deopt) => self.deoptimise(&compiled, &deopt),
            }
        }
        self.interpret(context)
    }

    pub fn value(&self, context: &mut dyn EvaluationContext) -> Result<Value, EvalError> {
        self.evaluate(context).map(TypedValue::into_value)
    }

    /// Canonical form, with alternative operator spellings normalised.
    pub fn to_source_string(&self) -> String {
        self.ast.to_source_string()
    }

    /// The text this expression was parsed from.
    pub fn expression_string(&self) -> &str {
        self.ast.source()
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    /// Try to compile from the descriptors observed so far, whatever the
    /// configured mode. `false` when some node is not compilable yet.
    pub fn compile(&self) -> bool {
        let profile = self.profile.lock();
        self.try_compile(&profile)
    }

    /// Drop compiled code and start profiling from scratch.
    pub fn revert_to_interpreted(&self) {
        *self.compiled.write() = None;
        self.failed_compilations.store(0, Ordering::Relaxed);
        self.profile.lock().reset();
        debug!(expression = self.ast.source(), "reverted to interpreted");
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.read().is_some()
    }

    /// Rejected or deoptimised compilations since the last revert.
    pub fn failed_compilations(&self) -> u32 {
        self.failed_compilations.load(Ordering::Relaxed)
    }

    fn interpret(&self, context: &mut dyn EvaluationContext) -> Result<TypedValue, EvalError> {
        if self.compilation_exhausted() {
            return xel_eval::evaluate(&self.ast, context, &self.patterns);
        }
        // Another thread is profiling; this evaluation goes unrecorded.
        let Some(mut profile) = self.profile.try_lock() else {
            return xel_eval::evaluate(&self.ast, context, &self.patterns);
        };
        let result = xel_eval::evaluate_profiled(&self.ast, context, &self.patterns, &mut profile)?;
        if self.should_compile(&profile) {
            self.try_compile(&profile);
        }
        Ok(result)
    }

    fn should_compile(&self, profile: &TypeProfile) -> bool {
        let threshold = match self.config.compiler_mode {
            CompilerMode::Off => return false,
            CompilerMode::Immediate => 1,
            CompilerMode::Mixed => self.config.compile_threshold,
        };
        profile.evaluations() >= threshold && !self.is_compiled()
    }

    fn compilation_exhausted(&self) -> bool {
        self.failed_compilations() >= self.config.max_failed_compilations
    }

    fn try_compile(&self, profile: &TypeProfile) -> bool {
        if let Some(compiled) = xel_compile::compile(&self.ast, profile) {
            *self.compiled.write() = Some(Arc::new(compiled));
            true
        } else {
            self.failed_compilations.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    fn deoptimise(&self, compiled: &Arc<CompiledExpression>, deopt: &Deopt) {
        debug!(expression = self.ast.source(), %deopt, "deoptimised");
        {
            let mut slot = self.compiled.write();
            // A concurrent evaluation may already have replaced it.
            if slot
                .as_ref()
                .is_some_and(|current| Arc::ptr_eq(current, compiled))
            {
                *slot = None;
            }
        }
        self.failed_compilations.fetch_add(1, Ordering::Relaxed);
        self.profile.lock().reset();
    }
}

impl std::fmt::Debug for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expression")
            .field("source", &self.ast.source())
            .field("compiled", &self.is_compiled())
            .field("failed_compilations", &self.failed_compilations())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
