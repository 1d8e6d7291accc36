//! Parser and compilation settings.

use std::str::FromStr;

use tracing::warn;
use xel_parse::DEFAULT_MAX_EXPRESSION_LENGTH;

/// When expressions switch to compiled mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompilerMode {
    /// Always interpret. [`crate::Expression::compile`] still works on
    /// request.
    #[default]
    Off,
    /// Compile after the first successful interpreted evaluation.
    Immediate,
    /// Interpret until `compile_threshold` evaluations have been profiled,
    /// then compile.
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown compiler mode `{0}` (expected off, immediate or mixed)")]
pub struct UnknownCompilerMode(pub String);

impl FromStr for CompilerMode {
    type Err = UnknownCompilerMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(CompilerMode::Off),
            "immediate" => Ok(CompilerMode::Immediate),
            "mixed" => Ok(CompilerMode::Mixed),
            _ => Err(UnknownCompilerMode(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Longest accepted expression, in characters. Checked before lexing.
    pub max_expression_length: usize,
    pub compiler_mode: CompilerMode,
    /// Interpreted evaluations a `Mixed` expression needs before it is
    /// compiled.
    pub compile_threshold: u64,
    /// Rejected or deoptimised compilations after which an expression
    /// stays interpreted.
    pub max_failed_compilations: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            compiler_mode: CompilerMode::Off,
            compile_threshold: 100,
            max_failed_compilations: 100,
        }
    }
}

impl ParserConfig {
    #[must_use]
    pub fn with_max_expression_length(mut self, max: usize) -> Self {
        self.max_expression_length = max;
        self
    }

    #[must_use]
    pub fn with_compiler_mode(mut self, mode: CompilerMode) -> Self {
        self.compiler_mode = mode;
        self
    }

    #[must_use]
    pub fn with_compile_threshold(mut self, threshold: u64) -> Self {
        self.compile_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_failed_compilations(mut self, max: u32) -> Self {
        self.max_failed_compilations = max;
        self
    }

    /// Defaults overridden by `XEL_COMPILER_MODE` and
    /// `XEL_MAX_EXPRESSION_LENGTH`. Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup("XEL_COMPILER_MODE") {
            match raw.parse() {
                Ok(mode) => self.compiler_mode = mode,
                Err(err) => warn!(%err, "ignoring XEL_COMPILER_MODE"),
            }
        }
        if let Some(raw) = lookup("XEL_MAX_EXPRESSION_LENGTH") {
            match raw.trim().parse() {
                Ok(max) => self.max_expression_length = max,
                Err(err) => warn!(value = %raw, %err, "ignoring XEL_MAX_EXPRESSION_LENGTH"),
            }
        }
        self
    }
}
