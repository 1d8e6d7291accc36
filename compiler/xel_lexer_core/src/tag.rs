//! Raw token tags.

/// Raw token: tag plus byte length. The start position is implicit (the
/// sum of preceding lengths).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

/// What the scanner saw. Error conditions are tags, not `Err`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Identifiers & literals ===
    Ident,
    Int,
    Long,
    HexInt,
    HexLong,
    Real,
    RealFloat,
    String,

    // === Operators ===
    Plus,
    PlusPlus,
    Minus,
    MinusMinus,
    Star,
    Slash,
    Percent,
    Caret,
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    Question,
    QuestionColon,
    QuestionDot,
    QuestionBracket,
    CaretBracket,
    DollarBracket,
    BangBracket,

    // === Delimiters ===
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Comma,
    Colon,
    Dot,
    Hash,
    At,
    Amp,

    // === Trivia ===
    Whitespace,

    // === Errors ===
    /// Byte that cannot start a token (control, non-ASCII, interior null).
    InvalidByte,
    /// A lone `|`.
    Pipe,
    UnterminatedString,
    /// `0x` without digits, exponent without digits, bad suffix.
    MalformedNumber,

    Eof,
}

impl RawTag {
    /// Fixed source text for punctuation and operators.
    pub fn lexeme(self) -> Option<&'static str> {
        Some(match self {
            RawTag::Plus => "+",
            RawTag::PlusPlus => "++",
            RawTag::Minus => "-",
            RawTag::MinusMinus => "--",
            RawTag::Star => "*",
            RawTag::Slash => "/",
            RawTag::Percent => "%",
            RawTag::Caret => "^",
            RawTag::Bang => "!",
            RawTag::BangEqual => "!=",
            RawTag::Equal => "=",
            RawTag::EqualEqual => "==",
            RawTag::Less => "<",
            RawTag::LessEqual => "<=",
            RawTag::Greater => ">",
            RawTag::GreaterEqual => ">=",
            RawTag::AmpAmp => "&&",
            RawTag::PipePipe => "||",
            RawTag::Question => "?",
            RawTag::QuestionColon => "?:",
            RawTag::QuestionDot => "?.",
            RawTag::QuestionBracket => "?[",
            RawTag::CaretBracket => "^[",
            RawTag::DollarBracket => "$[",
            RawTag::BangBracket => "![",
            RawTag::LeftParen => "(",
            RawTag::RightParen => ")",
            RawTag::LeftBracket => "[",
            RawTag::RightBracket => "]",
            RawTag::LeftBrace => "{",
            RawTag::RightBrace => "}",
            RawTag::Comma => ",",
            RawTag::Colon => ":",
            RawTag::Dot => ".",
            RawTag::Hash => "#",
            RawTag::At => "@",
            RawTag::Amp => "&",
            RawTag::Pipe => "|",
            _ => return None,
        })
    }

    pub fn is_error(self) -> bool {
        matches!(
            self,
            RawTag::InvalidByte | RawTag::Pipe | RawTag::UnterminatedString | RawTag::MalformedNumber
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_is_one_byte() {
        assert_eq!(std::mem::size_of::<RawTag>(), 1);
    }

    #[test]
    fn lexemes() {
        assert_eq!(RawTag::QuestionColon.lexeme(), Some("?:"));
        assert_eq!(RawTag::DollarBracket.lexeme(), Some("$["));
        assert_eq!(RawTag::Ident.lexeme(), None);
        assert_eq!(RawTag::Eof.lexeme(), None);
    }

    #[test]
    fn error_tags() {
        assert!(RawTag::UnterminatedString.is_error());
        assert!(RawTag::Pipe.is_error());
        assert!(!RawTag::PipePipe.is_error());
    }
}
