//! Tokens produced by `xel_lexer` and consumed by `xel_parse`.

use crate::Span;

/// A cooked token: kind, the exact source text it covers, and its span.
///
/// Tokens borrow the expression text and are never mutated after lexing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Span,
}

impl<'src> Token<'src> {
    #[inline]
    pub fn new(kind: TokenKind, text: &'src str, span: Span) -> Self {
        Token { kind, text, span }
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.span.end
    }

    /// `true` for an identifier whose text equals `word`, ignoring ASCII case.
    ///
    /// Textual operators (`and`, `or`, `instanceof`, `matches`, `between`)
    /// stay identifiers in the token stream; the parser recognises them in
    /// operator position with this check.
    #[inline]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text.eq_ignore_ascii_case(word)
    }
}

/// Token kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Literals ===
    /// Decimal `int` literal: `42`
    IntLiteral,
    /// Decimal `long` literal: `42L`
    LongLiteral,
    /// Hex `int` literal: `0xFF`
    HexIntLiteral,
    /// Hex `long` literal: `0xFFL`
    HexLongLiteral,
    /// Double-precision real: `1.5`, `1e3`, `2d`
    RealLiteral,
    /// Single-precision real: `1.5f`
    RealFloatLiteral,
    /// Single- or double-quoted string; `text` keeps the quotes.
    StringLiteral,

    Identifier,

    // === Punctuation ===
    LParen,
    RParen,
    LSquare,
    RSquare,
    LCurly,
    RCurly,
    Comma,
    Colon,
    Dot,
    Hash,
    /// `@` bean reference
    BeanRef,
    /// `&` factory bean reference
    FactoryBeanRef,
    /// `?` (ternary)
    Question,

    // === Operators ===
    Plus,
    Minus,
    Star,
    Div,
    Mod,
    Power,
    Not,
    Assign,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    SymbolicAnd,
    SymbolicOr,
    Inc,
    Dec,
    /// `?:`
    Elvis,
    /// `?.`
    SafeNavigator,
    /// `?[`
    Select,
    /// `^[`
    SelectFirst,
    /// `$[`
    SelectLast,
    /// `![`
    Project,

    Eof,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "integer literal",
            TokenKind::LongLiteral => "long literal",
            TokenKind::HexIntLiteral => "hex integer literal",
            TokenKind::HexLongLiteral => "hex long literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::RealFloatLiteral => "float literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Identifier => "identifier",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LSquare => "`[`",
            TokenKind::RSquare => "`]`",
            TokenKind::LCurly => "`{`",
            TokenKind::RCurly => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Colon => "`:`",
            TokenKind::Dot => "`.`",
            TokenKind::Hash => "`#`",
            TokenKind::BeanRef => "`@`",
            TokenKind::FactoryBeanRef => "`&`",
            TokenKind::Question => "`?`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Div => "`/`",
            TokenKind::Mod => "`%`",
            TokenKind::Power => "`^`",
            TokenKind::Not => "`!`",
            TokenKind::Assign => "`=`",
            TokenKind::Eq => "`==`",
            TokenKind::Ne => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::Le => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::Ge => "`>=`",
            TokenKind::SymbolicAnd => "`&&`",
            TokenKind::SymbolicOr => "`||`",
            TokenKind::Inc => "`++`",
            TokenKind::Dec => "`--`",
            TokenKind::Elvis => "`?:`",
            TokenKind::SafeNavigator => "`?.`",
            TokenKind::Select => "`?[`",
            TokenKind::SelectFirst => "`^[`",
            TokenKind::SelectLast => "`$[`",
            TokenKind::Project => "`![`",
            TokenKind::Eof => "end of expression",
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::LongLiteral
                | TokenKind::HexIntLiteral
                | TokenKind::HexLongLiteral
                | TokenKind::RealLiteral
                | TokenKind::RealFloatLiteral
                | TokenKind::StringLiteral
        )
    }
}

/// Token stream for one expression, always terminated by an `Eof` token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenList<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token<'src>> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token<'src>> {
        self.tokens.iter()
    }

    /// Kinds only, for tests and tracing.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|t| t.kind).collect()
    }
}
