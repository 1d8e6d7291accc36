//! Recursive-descent parser for xel expressions.
//!
//! The grammar is a descending chain of precedence levels:
//!
//! ```text
//! expression  := logicalOr ( '=' expression | '?:' expression | '?' expression ':' expression )?
//! logicalOr   := logicalAnd ( ('||' | 'or') logicalAnd )*
//! logicalAnd  := relational ( ('&&' | 'and') relational )*
//! relational  := sum ( relOp sum )?
//! sum         := product ( ('+' | '-') product )*
//! product     := power ( ('*' | '/' | '%') power )*
//! power       := unary ( '^' power )?
//! unary       := ('+' | '-' | '!') unary | primary
//! primary     := startNode navigation*
//! ```
//!
//! Every level returns `Option<ExprId>`: `None` means "no operand here",
//! which lets the binary levels report a missing left or right operand at
//! the operator token instead of a generic unexpected-token error.

mod cursor;
mod error;
mod fold;
mod grammar;

use std::sync::Arc;

use tracing::debug;
use xel_ir::{Ast, ExprArena, Span, Token, TokenKind, TokenList};

pub use error::{ParseError, ParseErrorKind};

/// Default maximum expression length, in characters.
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 10_000;

/// Parse `source` into an immutable [`Ast`].
///
/// The length check runs before the lexer sees the input, so an
/// over-long expression only ever reports `ExpressionTooLong`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str, max_length: usize) -> Result<Ast, ParseError> {
    check_length(source, max_length)?;
    let tokens = xel_lexer::lex(source)?;
    let ast = Parser::new(source, tokens).parse_root()?;
    debug!(nodes = ast.node_count(), "parsed expression");
    Ok(ast)
}

fn check_length(source: &str, max_length: usize) -> Result<(), ParseError> {
    // Byte length bounds character length; count only when it might matter.
    if source.len() <= max_length {
        return Ok(());
    }
    let length = source.chars().count();
    if length > max_length {
        return Err(ParseError::new(
            ParseErrorKind::ExpressionTooLong {
                length,
                max: max_length,
            },
            Span::point(0),
        ));
    }
    Ok(())
}

/// Parser session for one expression: token cursor plus the arena the
/// nodes are allocated into.
pub struct Parser<'src> {
    source: &'src str,
    tokens: TokenList<'src>,
    pos: usize,
    eof: Token<'src>,
    arena: ExprArena,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: TokenList<'src>) -> Self {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "expressions are length-checked far below u32::MAX"
        )]
        let end = source.len() as u32;
        let eof = Token::new(TokenKind::Eof, "", Span::point(end));
        Parser {
            source,
            tokens,
            pos: 0,
            eof,
            arena: ExprArena::new(),
        }
    }

    /// Parse the whole token stream as one expression.
    pub fn parse_root(mut self) -> Result<Ast, ParseError> {
        let root = self.parse_expression()?;
        let token = self.current();
        match root {
            Some(root) if self.is_at_end() => {
                Ok(Ast::new(self.arena, root, Arc::from(self.source)))
            }
            None if self.is_at_end() => Err(ParseError::new(ParseErrorKind::OutOfData, token.span)),
            _ => Err(ParseError::new(
                ParseErrorKind::MoreInput {
                    found: token.text.to_owned(),
                },
                token.span,
            )),
        }
    }
}

#[cfg(test)]
mod tests;
