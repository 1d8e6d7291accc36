//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! Main dispatch covers all 256 byte values. Each arm calls a focused
//! method that advances the cursor and returns a [`RawToken`]. The sentinel
//! byte dispatches to `eof()`. No allocation, no keyword lookup, no
//! numeric conversion.

use crate::char_class::{is_digit, is_hex_digit, is_ident_continue};
use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        RawScanner { cursor }
    }

    /// Current byte offset (start of the next token).
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Source text between two token boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.cursor.slice(start, end)
    }

    /// Produce the next raw token. Returns `Eof` (len 0) forever once the
    /// input is exhausted.
    #[inline]
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | b'\r' | b'\n' => self.whitespace(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'$' => self.dollar(start),
            b'0'..=b'9' => self.number(start),
            b'\'' | b'"' => self.string(start),
            b'+' => self.one_or_two(start, b'+', RawTag::Plus, RawTag::PlusPlus),
            b'-' => self.one_or_two(start, b'-', RawTag::Minus, RawTag::MinusMinus),
            b'*' => self.single(start, RawTag::Star),
            b'/' => self.single(start, RawTag::Slash),
            b'%' => self.single(start, RawTag::Percent),
            b'^' => self.one_or_two(start, b'[', RawTag::Caret, RawTag::CaretBracket),
            b'!' => self.bang(start),
            b'=' => self.one_or_two(start, b'=', RawTag::Equal, RawTag::EqualEqual),
            b'<' => self.one_or_two(start, b'=', RawTag::Less, RawTag::LessEqual),
            b'>' => self.one_or_two(start, b'=', RawTag::Greater, RawTag::GreaterEqual),
            b'&' => self.one_or_two(start, b'&', RawTag::Amp, RawTag::AmpAmp),
            b'|' => self.one_or_two(start, b'|', RawTag::Pipe, RawTag::PipePipe),
            b'?' => self.question(start),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'[' => self.single(start, RawTag::LeftBracket),
            b']' => self.single(start, RawTag::RightBracket),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b',' => self.single(start, RawTag::Comma),
            b':' => self.single(start, RawTag::Colon),
            b'.' => self.single(start, RawTag::Dot),
            b'#' => self.single(start, RawTag::Hash),
            b'@' => self.single(start, RawTag::At),
            1..=8
            | 11..=12
            | 14..=31
            | b';'
            | b'`'
            | b'~'
            | b'\\'
            | 127..=255 => self.invalid_byte(start),
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    // ─── EOF & Errors ───────────────────────────────────────────────

    fn eof(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // Interior null byte.
            self.cursor.advance();
            self.token(start, RawTag::InvalidByte)
        }
    }

    fn invalid_byte(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        self.token(start, RawTag::InvalidByte)
    }

    // ─── Trivia ─────────────────────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(start, RawTag::Whitespace)
    }

    // ─── Identifiers ────────────────────────────────────────────────

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::Ident)
    }

    /// `$[` starts a last-match selection; otherwise `$` starts an identifier.
    fn dollar(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() == b'[' {
            self.cursor.advance_n(2);
            self.token(start, RawTag::DollarBracket)
        } else {
            self.identifier(start)
        }
    }

    // ─── Numbers ────────────────────────────────────────────────────

    fn number(&mut self, start: u32) -> RawToken {
        if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            return self.hex_number(start);
        }

        self.cursor.eat_while(is_digit);
        let mut is_real = false;

        // A `.` only belongs to the number when a digit follows: `1.toString()`.
        if self.cursor.current() == b'.' && is_digit(self.cursor.peek()) {
            is_real = true;
            self.cursor.advance();
            self.cursor.eat_while(is_digit);
        }

        if matches!(self.cursor.current(), b'e' | b'E') {
            is_real = true;
            self.cursor.advance();
            if matches!(self.cursor.current(), b'+' | b'-') {
                self.cursor.advance();
            }
            if !is_digit(self.cursor.current()) {
                return self.malformed_number(start);
            }
            self.cursor.eat_while(is_digit);
        }

        let tag = match self.cursor.current() {
            b'f' | b'F' => {
                self.cursor.advance();
                RawTag::RealFloat
            }
            b'd' | b'D' => {
                self.cursor.advance();
                RawTag::Real
            }
            b'l' | b'L' if !is_real => {
                self.cursor.advance();
                RawTag::Long
            }
            b'l' | b'L' => return self.malformed_number(start),
            _ if is_real => RawTag::Real,
            _ => RawTag::Int,
        };
        self.token(start, tag)
    }

    fn hex_number(&mut self, start: u32) -> RawToken {
        self.cursor.advance_n(2);
        if !is_hex_digit(self.cursor.current()) {
            return self.malformed_number(start);
        }
        self.cursor.eat_while(is_hex_digit);
        if matches!(self.cursor.current(), b'l' | b'L') {
            self.cursor.advance();
            self.token(start, RawTag::HexLong)
        } else {
            self.token(start, RawTag::HexInt)
        }
    }

    /// Swallow the rest of the alphanumeric run so the error covers it.
    fn malformed_number(&mut self, start: u32) -> RawToken {
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::MalformedNumber)
    }

    // ─── Strings ────────────────────────────────────────────────────

    /// Single- or double-quoted; the quote is escaped by doubling it.
    fn string(&mut self, start: u32) -> RawToken {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            let b = self.cursor.current();
            if b == quote {
                if self.cursor.peek() == quote {
                    self.cursor.advance_n(2);
                    continue;
                }
                self.cursor.advance();
                return self.token(start, RawTag::String);
            }
            if self.cursor.is_eof() {
                return self.token(start, RawTag::UnterminatedString);
            }
            self.cursor.advance_char();
        }
    }

    // ─── Operators ──────────────────────────────────────────────────

    #[inline]
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// `one` alone, or `two` when followed by `next`.
    #[inline]
    fn one_or_two(&mut self, start: u32, next: u8, one: RawTag, two: RawTag) -> RawToken {
        if self.cursor.peek() == next {
            self.cursor.advance_n(2);
            self.token(start, two)
        } else {
            self.single(start, one)
        }
    }

    fn bang(&mut self, start: u32) -> RawToken {
        match self.cursor.peek() {
            b'=' => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::BangEqual)
            }
            b'[' => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::BangBracket)
            }
            _ => self.single(start, RawTag::Bang),
        }
    }

    fn question(&mut self, start: u32) -> RawToken {
        let tag = match self.cursor.peek() {
            b':' => RawTag::QuestionColon,
            b'.' => RawTag::QuestionDot,
            b'[' => RawTag::QuestionBracket,
            _ => return self.single(start, RawTag::Question),
        };
        self.cursor.advance_n(2);
        self.token(start, tag)
    }
}

#[cfg(test)]
mod tests;
