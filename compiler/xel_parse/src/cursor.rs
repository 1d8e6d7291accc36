//! Token cursor operations on the parser session.

use xel_ir::{Token, TokenKind};

use crate::{ParseError, ParseErrorKind, Parser};

impl<'src> Parser<'src> {
    /// Current token; `Eof` once the stream is exhausted.
    #[inline]
    pub(crate) fn current(&self) -> Token<'src> {
        self.tokens.get(self.pos).copied().unwrap_or(self.eof)
    }

    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Kind of the token after the current one.
    #[inline]
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Consume and return the current token. Never moves past `Eof`.
    #[inline]
    pub(crate) fn advance(&mut self) -> Token<'src> {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    /// Consume the current token if it is `kind`.
    #[inline]
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token<'src>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume `kind` or fail: `OutOfData` at the end, otherwise `UnexpectedToken`.
    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
    ) -> Result<Token<'src>, ParseError> {
        match self.eat(kind) {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    /// Error for the current token when `expected` was wanted.
    #[cold]
    pub(crate) fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            ParseError::new(ParseErrorKind::OutOfData, token.span)
        } else {
            ParseError::new(
                ParseErrorKind::UnexpectedToken {
                    expected,
                    found: token.text.to_owned(),
                },
                token.span,
            )
        }
    }
}
