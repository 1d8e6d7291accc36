//! Parser entry point.

use std::sync::Arc;

use xel_eval::PatternCache;
use xel_parse::ParseError;

use crate::config::ParserConfig;
use crate::expression::Expression;

/// Parses expression text into [`Expression`]s sharing one configuration
/// and one `matches` pattern cache.
#[derive(Debug, Default)]
pub struct ExpressionParser {
    config: ParserConfig,
    patterns: Arc<PatternCache>,
}

impl ExpressionParser {
    pub fn new(config: ParserConfig) -> Self {
        ExpressionParser {
            config,
            patterns: Arc::new(PatternCache::new()),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `text`. The length limit is checked before anything is
    /// lexed.
    pub fn parse(&self, text: &str) -> Result<Expression, ParseError> {
        let ast = xel_parse::parse(text, self.config.max_expression_length)?;
        Ok(Expression::new(
            ast,
            self.config.clone(),
            Arc::clone(&self.patterns),
        ))
    }
}
