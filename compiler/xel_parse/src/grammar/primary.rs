//! Start nodes: literals, references, constructors and inline collections.

use std::sync::Arc;

use xel_ir::{Expr, ExprId, ExprKind, ExprRange, Span, Token, TokenKind, Value};

use super::ParseResult;
use crate::{fold, ParseError, ParseErrorKind, Parser};

impl Parser<'_> {
    /// `primary := startNode navigation*`
    pub(crate) fn parse_primary(&mut self) -> ParseResult {
        let Some(start) = self.parse_start_node()? else {
            return Ok(None);
        };
        let mut steps = vec![start];
        while let Some(step) = self.parse_navigation_step()? {
            steps.push(step);
        }
        self.reject_inc_dec()?;
        if steps.len() == 1 {
            return Ok(Some(start));
        }
        let first = start;
        let last = steps[steps.len() - 1];
        let range = self.arena.alloc_expr_list(steps);
        Ok(Some(self.alloc_between(ExprKind::Compound(range), first, last)))
    }

    fn parse_start_node(&mut self) -> ParseResult {
        let token = self.current();
        match token.kind {
            kind if kind.is_literal() => {
                self.advance();
                let value = fold::literal(token)?;
                Ok(Some(self.alloc_constant(ExprKind::Literal, token.span, value)))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self
                    .parse_expression()?
                    .ok_or_else(|| self.unexpected("expression"))?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(Some(inner))
            }
            TokenKind::Hash => self.parse_hash_reference().map(Some),
            TokenKind::BeanRef | TokenKind::FactoryBeanRef => self.parse_bean_reference().map(Some),
            TokenKind::LCurly => self.parse_inline_collection().map(Some),
            TokenKind::LSquare => self.parse_indexer(false).map(Some),
            TokenKind::Identifier => self.parse_identifier_start(token),
            _ => Ok(None),
        }
    }

    fn parse_identifier_start(&mut self, token: Token<'_>) -> ParseResult {
        let constant = match token.text {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            "null" => Some(Value::Null),
            _ => None,
        };
        if let Some(value) = constant {
            self.advance();
            return Ok(Some(self.alloc_constant(ExprKind::Literal, token.span, value)));
        }
        if token.text == "T" && self.peek_kind() == TokenKind::LParen {
            self.advance();
            self.advance();
            let name = self.parse_qualified_id()?;
            let close = self.expect(TokenKind::RParen, "`)` after type name")?;
            let span = token.span.merge(close.span);
            return Ok(Some(self.arena.alloc_expr(Expr::new(ExprKind::TypeRef(name), span))));
        }
        if token.text == "new" && self.peek_kind() == TokenKind::Identifier {
            self.advance();
            let type_name = self.parse_qualified_id()?;
            let (args, close) = self.parse_arguments()?;
            let span = token.span.merge(close);
            return Ok(Some(self.arena.alloc_expr(Expr::new(
                ExprKind::Constructor { type_name, args },
                span,
            ))));
        }
        if self.at_operator_word() {
            return Ok(None);
        }
        self.parse_method_or_property(false).map(Some)
    }

    /// `#this`, `#root`, `#name` or `#name(args)`.
    fn parse_hash_reference(&mut self) -> Result<ExprId, ParseError> {
        let hash = self.advance();
        let name = self.expect(TokenKind::Identifier, "variable name after `#`")?;
        if self.check(TokenKind::LParen) {
            let (args, close) = self.parse_arguments()?;
            let kind = ExprKind::FunctionCall {
                name: Arc::from(name.text),
                args,
            };
            return Ok(self.arena.alloc_expr(Expr::new(kind, hash.span.merge(close))));
        }
        let kind = match name.text {
            "this" => ExprKind::This,
            "root" => ExprKind::Root,
            other => ExprKind::Variable(Arc::from(other)),
        };
        Ok(self
            .arena
            .alloc_expr(Expr::new(kind, hash.span.merge(name.span))))
    }

    /// `@name`, `@'quoted name'`, and the `&` factory forms.
    fn parse_bean_reference(&mut self) -> Result<ExprId, ParseError> {
        let marker = self.advance();
        let factory = marker.kind == TokenKind::FactoryBeanRef;
        let token = self.current();
        let name: Arc<str> = match token.kind {
            TokenKind::Identifier => Arc::from(token.text),
            TokenKind::StringLiteral => Arc::from(xel_lexer::literal::cook_string(token.text)),
            _ => return Err(self.unexpected("bean name")),
        };
        self.advance();
        let kind = ExprKind::BeanRef { name, factory };
        Ok(self
            .arena
            .alloc_expr(Expr::new(kind, marker.span.merge(token.span))))
    }

    /// `{}` list, `{:}` map, `{a, b}` list or `{k: v, ...}` map.
    fn parse_inline_collection(&mut self) -> Result<ExprId, ParseError> {
        let open = self.advance();
        if let Some(close) = self.eat(TokenKind::RCurly) {
            let range = self.arena.alloc_expr_list([]);
            return Ok(self.alloc_constant(
                ExprKind::InlineList(range),
                open.span.merge(close.span),
                Value::list(Vec::new()),
            ));
        }
        if self.check(TokenKind::Colon) && self.peek_kind() == TokenKind::RCurly {
            self.advance();
            let close = self.advance();
            let range = self.arena.alloc_expr_list([]);
            return Ok(self.alloc_constant(
                ExprKind::InlineMap(range),
                open.span.merge(close.span),
                Value::map(xel_ir::ValueMap::new()),
            ));
        }

        let first = self.parse_collection_element()?;
        if self.check(TokenKind::Colon) {
            return self.parse_inline_map(open.span, first);
        }
        let mut items = vec![first];
        while self.eat(TokenKind::Comma).is_some() {
            items.push(self.parse_collection_element()?);
        }
        let close = self.expect(TokenKind::RCurly, "`,` or `}` in inline list")?;
        let span = open.span.merge(close.span);
        let constant = fold::list(&self.arena, &items);
        let range = self.arena.alloc_expr_list(items);
        Ok(self.alloc_maybe_constant(ExprKind::InlineList(range), span, constant))
    }

    fn parse_inline_map(&mut self, open: Span, first_key: ExprId) -> Result<ExprId, ParseError> {
        let mut entries = vec![first_key];
        loop {
            self.expect(TokenKind::Colon, "`:` after map key")?;
            let value = self
                .parse_expression()?
                .ok_or_else(|| self.unexpected("map value"))?;
            entries.push(value);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
            entries.push(self.parse_collection_element()?);
        }
        let close = self.expect(TokenKind::RCurly, "`,` or `}` in inline map")?;
        let span = open.merge(close.span);
        let constant = fold::map(&self.arena, &entries);
        let range = self.arena.alloc_expr_list(entries);
        Ok(self.alloc_maybe_constant(ExprKind::InlineMap(range), span, constant))
    }

    /// A list item or map key. A bare identifier directly followed by `:`
    /// is a string key.
    fn parse_collection_element(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        if token.kind == TokenKind::Identifier && self.peek_kind() == TokenKind::Colon {
            self.advance();
            return Ok(self.alloc_constant(
                ExprKind::Literal,
                token.span,
                Value::string(token.text),
            ));
        }
        self.parse_expression()?
            .ok_or_else(|| self.unexpected("expression"))
    }

    /// `identifier ( '.' identifier )*` for type references and constructors.
    ///
    /// Each segment must consist of letters, digits, `_` or `$`; any other
    /// token (including `)` in `T()`) is an invalid qualified id.
    pub(crate) fn parse_qualified_id(&mut self) -> Result<Arc<str>, ParseError> {
        let mut name = String::new();
        loop {
            let token = self.current();
            if token.kind == TokenKind::Eof {
                return Err(ParseError::new(ParseErrorKind::OutOfData, token.span));
            }
            if !is_qualified_segment(token.text) {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidQualifiedId {
                        found: token.text.to_owned(),
                    },
                    token.span,
                ));
            }
            self.advance();
            name.push_str(token.text);
            if self.eat(TokenKind::Dot).is_none() {
                return Ok(Arc::from(name));
            }
            name.push('.');
        }
    }

    /// `'(' ( expression (',' expression)* )? ')'`; returns the argument
    /// list and the span of the closing parenthesis.
    pub(crate) fn parse_arguments(&mut self) -> Result<(ExprRange, Span), ParseError> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut args = Vec::new();
        if let Some(close) = self.eat(TokenKind::RParen) {
            return Ok((self.arena.alloc_expr_list(args), close.span));
        }
        loop {
            let arg = self
                .parse_expression()?
                .ok_or_else(|| self.unexpected("argument"))?;
            args.push(arg);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let close = self.expect(TokenKind::RParen, "`,` or `)` in argument list")?;
        Ok((self.arena.alloc_expr_list(args), close.span))
    }

    fn alloc_constant(&mut self, kind: ExprKind, span: Span, value: Value) -> ExprId {
        self.arena.alloc_expr(Expr::with_constant(kind, span, value))
    }

    fn alloc_maybe_constant(&mut self, kind: ExprKind, span: Span, value: Option<Value>) -> ExprId {
        match value {
            Some(value) => self.alloc_constant(kind, span, value),
            None => self.arena.alloc_expr(Expr::new(kind, span)),
        }
    }
}

fn is_qualified_segment(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
