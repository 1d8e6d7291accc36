//! Cooking layer: raw `(tag, len)` pairs to validated [`Token`]s.
//!
//! Skips whitespace, resolves alternative operator spellings, checks numeric
//! literal ranges and turns error tags into [`LexError`]s.

use xel_ir::{Span, Token, TokenKind, TokenList};
use xel_lexer_core::{RawScanner, RawTag, SourceBuffer};

use crate::{alt_operators, literal, LexError, LexErrorKind};

pub(crate) struct TokenCooker<'src> {
    tokens: TokenList<'src>,
    /// Last significant kind; `x.lt` names a property, not an operator.
    previous: Option<TokenKind>,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(capacity_hint: usize) -> Self {
        TokenCooker {
            tokens: TokenList::with_capacity(capacity_hint),
            previous: None,
        }
    }

    pub(crate) fn run(mut self, source: &'src str) -> Result<TokenList<'src>, LexError> {
        let buf = SourceBuffer::new(source);
        let mut scanner = RawScanner::new(buf.cursor());
        loop {
            let start = scanner.pos();
            let raw = scanner.next_token();
            let end = start + raw.len;
            let span = Span::new(start, end);
            // Slice from `source` rather than the buffer so tokens outlive it.
            let text = source.get(start as usize..end as usize).unwrap_or("");

            let kind = match raw.tag {
                RawTag::Eof => {
                    self.tokens.push(Token::new(TokenKind::Eof, "", span));
                    return Ok(self.tokens);
                }
                tag => match self.cook(tag, text, span)? {
                    Some(kind) => kind,
                    None => continue,
                },
            };
            self.previous = Some(kind);
            self.tokens.push(Token::new(kind, text, span));
        }
    }

    /// `None` for trivia, which produces no token.
    fn cook(&self, tag: RawTag, text: &str, span: Span) -> Result<Option<TokenKind>, LexError> {
        Ok(Some(match tag {
            RawTag::Ident => self.identifier(text),
            RawTag::Int => number(literal::cook_int(text), TokenKind::IntLiteral, text, "int", span)?,
            RawTag::Long => {
                number(literal::cook_long(text), TokenKind::LongLiteral, text, "long", span)?
            }
            RawTag::HexInt => {
                number(literal::cook_hex_int(text), TokenKind::HexIntLiteral, text, "int", span)?
            }
            RawTag::HexLong => number(
                literal::cook_hex_long(text),
                TokenKind::HexLongLiteral,
                text,
                "long",
                span,
            )?,
            RawTag::Real => {
                number(literal::cook_real(text), TokenKind::RealLiteral, text, "double", span)?
            }
            RawTag::RealFloat => number(
                literal::cook_float(text),
                TokenKind::RealFloatLiteral,
                text,
                "float",
                span,
            )?,
            RawTag::String => TokenKind::StringLiteral,

            RawTag::Plus => TokenKind::Plus,
            RawTag::PlusPlus => TokenKind::Inc,
            RawTag::Minus => TokenKind::Minus,
            RawTag::MinusMinus => TokenKind::Dec,
            RawTag::Star => TokenKind::Star,
            RawTag::Slash => TokenKind::Div,
            RawTag::Percent => TokenKind::Mod,
            RawTag::Caret => TokenKind::Power,
            RawTag::Bang => TokenKind::Not,
            RawTag::BangEqual => TokenKind::Ne,
            RawTag::Equal => TokenKind::Assign,
            RawTag::EqualEqual => TokenKind::Eq,
            RawTag::Less => TokenKind::Lt,
            RawTag::LessEqual => TokenKind::Le,
            RawTag::Greater => TokenKind::Gt,
            RawTag::GreaterEqual => TokenKind::Ge,
            RawTag::AmpAmp => TokenKind::SymbolicAnd,
            RawTag::PipePipe => TokenKind::SymbolicOr,
            RawTag::Question => TokenKind::Question,
            RawTag::QuestionColon => TokenKind::Elvis,
            RawTag::QuestionDot => TokenKind::SafeNavigator,
            RawTag::QuestionBracket => TokenKind::Select,
            RawTag::CaretBracket => TokenKind::SelectFirst,
            RawTag::DollarBracket => TokenKind::SelectLast,
            RawTag::BangBracket => TokenKind::Project,

            RawTag::LeftParen => TokenKind::LParen,
            RawTag::RightParen => TokenKind::RParen,
            RawTag::LeftBracket => TokenKind::LSquare,
            RawTag::RightBracket => TokenKind::RSquare,
            RawTag::LeftBrace => TokenKind::LCurly,
            RawTag::RightBrace => TokenKind::RCurly,
            RawTag::Comma => TokenKind::Comma,
            RawTag::Colon => TokenKind::Colon,
            RawTag::Dot => TokenKind::Dot,
            RawTag::Hash => TokenKind::Hash,
            RawTag::At => TokenKind::BeanRef,
            RawTag::Amp => TokenKind::FactoryBeanRef,

            RawTag::UnterminatedString => {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    Span::new(span.start, span.start + 1),
                ))
            }
            RawTag::MalformedNumber => {
                return Err(LexError::new(
                    LexErrorKind::MalformedNumber {
                        text: text.to_owned(),
                    },
                    span,
                ))
            }
            RawTag::InvalidByte | RawTag::Pipe => {
                return Err(LexError::new(
                    LexErrorKind::InvalidCharacter {
                        found: text.chars().next().unwrap_or('\0'),
                    },
                    span,
                ))
            }
            RawTag::Whitespace | RawTag::Eof => return Ok(None),
        }))
    }

    fn identifier(&self, text: &str) -> TokenKind {
        let after_dot = matches!(
            self.previous,
            Some(TokenKind::Dot | TokenKind::SafeNavigator)
        );
        if after_dot {
            return TokenKind::Identifier;
        }
        alt_operators::lookup(text).unwrap_or(TokenKind::Identifier)
    }
}

#[inline]
fn number<T>(
    value: Option<T>,
    kind: TokenKind,
    text: &str,
    ty: &'static str,
    span: Span,
) -> Result<TokenKind, LexError> {
    match value {
        Some(_) => Ok(kind),
        None => Err(LexError::new(
            LexErrorKind::NumberOutOfRange {
                text: text.to_owned(),
                ty,
            },
            span,
        )),
    }
}
