//! Navigation steps: property and method access, indexing, projection and
//! selection, each optionally null-safe.

use std::sync::Arc;

use xel_ir::{Expr, ExprId, ExprKind, SelectionKind, TokenKind};

use super::ParseResult;
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// One navigation step after a start node, or `None` when the chain ends.
    pub(crate) fn parse_navigation_step(&mut self) -> ParseResult {
        match self.current_kind() {
            TokenKind::Dot => {
                self.advance();
                self.parse_dotted_step(false).map(Some)
            }
            TokenKind::SafeNavigator => {
                self.advance();
                if self.check(TokenKind::LSquare) {
                    return self.parse_indexer(true).map(Some);
                }
                self.parse_dotted_step(true).map(Some)
            }
            TokenKind::LSquare => self.parse_indexer(false).map(Some),
            _ => Ok(None),
        }
    }

    fn parse_dotted_step(&mut self, null_safe: bool) -> Result<ExprId, ParseError> {
        match self.current_kind() {
            TokenKind::Identifier => self.parse_method_or_property(null_safe),
            TokenKind::Project => {
                let open = self.advance();
                let (body, close) = self.parse_bracketed_body()?;
                let kind = ExprKind::Projection { body, null_safe };
                Ok(self
                    .arena
                    .alloc_expr(Expr::new(kind, open.span.merge(close))))
            }
            TokenKind::Select | TokenKind::SelectFirst | TokenKind::SelectLast => {
                let open = self.advance();
                let kind = match open.kind {
                    TokenKind::SelectFirst => SelectionKind::First,
                    TokenKind::SelectLast => SelectionKind::Last,
                    _ => SelectionKind::All,
                };
                let (body, close) = self.parse_bracketed_body()?;
                let kind = ExprKind::Selection {
                    kind,
                    body,
                    null_safe,
                };
                Ok(self
                    .arena
                    .alloc_expr(Expr::new(kind, open.span.merge(close))))
            }
            _ => Err(self.unexpected("property, method, projection or selection")),
        }
    }

    /// `name` or `name(args)` against the active context object.
    pub(crate) fn parse_method_or_property(&mut self, null_safe: bool) -> Result<ExprId, ParseError> {
        let name = self.advance();
        if self.check(TokenKind::LParen) {
            let (args, close) = self.parse_arguments()?;
            let kind = ExprKind::MethodCall {
                name: Arc::from(name.text),
                args,
                null_safe,
            };
            return Ok(self
                .arena
                .alloc_expr(Expr::new(kind, name.span.merge(close))));
        }
        let kind = ExprKind::PropertyOrField {
            name: Arc::from(name.text),
            null_safe,
        };
        Ok(self.arena.alloc_expr(Expr::new(kind, name.span)))
    }

    /// `'[' expression ']'`, starting at the `[`.
    pub(crate) fn parse_indexer(&mut self, null_safe: bool) -> Result<ExprId, ParseError> {
        let open = self.advance();
        let index = self
            .parse_expression()?
            .ok_or_else(|| self.unexpected("index expression"))?;
        let close = self.expect(TokenKind::RSquare, "`]`")?;
        let kind = ExprKind::Indexer { index, null_safe };
        Ok(self
            .arena
            .alloc_expr(Expr::new(kind, open.span.merge(close.span))))
    }

    /// Body of a projection or selection after its opening token, through `]`.
    fn parse_bracketed_body(&mut self) -> Result<(ExprId, xel_ir::Span), ParseError> {
        let body = self
            .parse_expression()?
            .ok_or_else(|| self.unexpected("expression"))?;
        let close = self.expect(TokenKind::RSquare, "`]`")?;
        Ok((body, close.span))
    }
}
