//! Grammar productions, one precedence level per method.

mod operators;
mod postfix;
mod primary;

use xel_ir::{BinaryOp, Expr, ExprId, ExprKind, Token, TokenKind};
use xel_stack::ensure_sufficient_stack;

use crate::{fold, ParseError, ParseErrorKind, Parser};

/// Result of one production: `Ok(None)` when no operand starts here.
pub(crate) type ParseResult = Result<Option<ExprId>, ParseError>;

impl Parser<'_> {
    /// `expression := logicalOr ( '=' expression | '?:' expression | '?' expression ':' expression )?`
    pub(crate) fn parse_expression(&mut self) -> ParseResult {
        ensure_sufficient_stack(|| self.parse_expression_inner())
    }

    fn parse_expression_inner(&mut self) -> ParseResult {
        let left = self.parse_logical_or()?;
        let token = self.current();
        match token.kind {
            TokenKind::Assign => {
                self.advance();
                let target = require_left(left, token)?;
                let value = self.require_right(token)?;
                Ok(Some(self.alloc_between(
                    ExprKind::Assign { target, value },
                    target,
                    value,
                )))
            }
            TokenKind::Elvis => {
                self.advance();
                let left = require_left(left, token)?;
                let right = self.require_right(token)?;
                Ok(Some(
                    self.alloc_between(ExprKind::Elvis { left, right }, left, right),
                ))
            }
            TokenKind::Question => {
                self.advance();
                let cond = require_left(left, token)?;
                let then_expr = self.require_right(token)?;
                let colon = self.current();
                self.expect(TokenKind::Colon, "`:` in ternary expression")?;
                let else_expr = self.require_right(colon)?;
                Ok(Some(self.alloc_between(
                    ExprKind::Ternary {
                        cond,
                        then_expr,
                        else_expr,
                    },
                    cond,
                    else_expr,
                )))
            }
            _ => Ok(left),
        }
    }

    /// Full expression on the right of `op`, or `RightOperandMissing`.
    fn require_right(&mut self, op: Token<'_>) -> Result<ExprId, ParseError> {
        self.parse_expression()?
            .ok_or_else(|| right_missing(op))
    }

    /// `logicalOr := logicalAnd ( ('||' | 'or') logicalAnd )*`
    fn parse_logical_or(&mut self) -> ParseResult {
        self.parse_left_assoc(Self::parse_logical_and, Self::match_or_op)
    }

    /// `logicalAnd := relational ( ('&&' | 'and') relational )*`
    fn parse_logical_and(&mut self) -> ParseResult {
        self.parse_left_assoc(Self::parse_relational, Self::match_and_op)
    }

    /// `relational := sum ( relOp sum )?`
    ///
    /// Non-chainable: `a < b < c` stops after `a < b` and the root reports
    /// the second `<` as more input.
    fn parse_relational(&mut self) -> ParseResult {
        let left = self.parse_sum()?;
        let Some(op) = self.match_relational_op() else {
            return Ok(left);
        };
        let token = self.advance();
        let right = self.parse_sum()?;
        self.make_binary(op, token, left, right).map(Some)
    }

    /// `sum := product ( ('+' | '-') product )*`
    fn parse_sum(&mut self) -> ParseResult {
        self.parse_left_assoc(Self::parse_product, Self::match_additive_op)
    }

    /// `product := power ( ('*' | '/' | '%') power )*`
    fn parse_product(&mut self) -> ParseResult {
        self.parse_left_assoc(Self::parse_power, Self::match_multiplicative_op)
    }

    /// `power := unary ( '^' power )?`
    fn parse_power(&mut self) -> ParseResult {
        let left = self.parse_unary()?;
        if !self.check(TokenKind::Power) {
            return Ok(left);
        }
        let token = self.advance();
        let right = ensure_sufficient_stack(|| self.parse_power())?;
        self.make_binary(BinaryOp::Pow, token, left, right).map(Some)
    }

    /// `unary := ('+' | '-' | '!') unary | primary`
    fn parse_unary(&mut self) -> ParseResult {
        if let Some(op) = self.match_unary_op() {
            let token = self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?
                .ok_or_else(|| right_missing(token))?;
            let operand_expr = self.arena.get_expr(operand);
            let span = token.span.merge(operand_expr.span);
            let kind = ExprKind::Unary { op, operand };
            let expr = match fold::unary(op, operand_expr.constant.as_ref()) {
                Some(value) => Expr::with_constant(kind, span, value),
                None => Expr::new(kind, span),
            };
            return Ok(Some(self.arena.alloc_expr(expr)));
        }
        self.reject_inc_dec()?;
        self.parse_primary()
    }

    /// `++` and `--` lex but are not part of the language.
    pub(crate) fn reject_inc_dec(&self) -> Result<(), ParseError> {
        let token = self.current();
        if matches!(token.kind, TokenKind::Inc | TokenKind::Dec) {
            return Err(ParseError::new(
                ParseErrorKind::UnsupportedOperator {
                    op: token.text.to_owned(),
                },
                token.span,
            ));
        }
        Ok(())
    }

    /// Loop `next (op next)*` for one left-associative level.
    fn parse_left_assoc(
        &mut self,
        next: fn(&mut Self) -> ParseResult,
        matcher: fn(&Self) -> Option<BinaryOp>,
    ) -> ParseResult {
        let mut left = next(self)?;
        while let Some(op) = matcher(self) {
            let token = self.advance();
            let right = next(self)?;
            left = Some(self.make_binary(op, token, left, right)?);
        }
        Ok(left)
    }

    /// Build a binary node, reporting a missing operand at the operator.
    fn make_binary(
        &mut self,
        op: BinaryOp,
        token: Token<'_>,
        left: Option<ExprId>,
        right: Option<ExprId>,
    ) -> Result<ExprId, ParseError> {
        let left = require_left(left, token)?;
        let right = right.ok_or_else(|| right_missing(token))?;
        Ok(self.alloc_between(ExprKind::Binary { op, left, right }, left, right))
    }

    /// Allocate a node spanning from `first` to `last`.
    pub(crate) fn alloc_between(&mut self, kind: ExprKind, first: ExprId, last: ExprId) -> ExprId {
        let span = self
            .arena
            .get_expr(first)
            .span
            .merge(self.arena.get_expr(last).span);
        self.arena.alloc_expr(Expr::new(kind, span))
    }
}

fn require_left(left: Option<ExprId>, op: Token<'_>) -> Result<ExprId, ParseError> {
    left.ok_or_else(|| {
        ParseError::new(
            ParseErrorKind::LeftOperandMissing {
                op: op.text.to_owned(),
            },
            op.span,
        )
    })
}

#[cold]
fn right_missing(op: Token<'_>) -> ParseError {
    ParseError::new(
        ParseErrorKind::RightOperandMissing {
            op: op.text.to_owned(),
        },
        op.span,
    )
}
