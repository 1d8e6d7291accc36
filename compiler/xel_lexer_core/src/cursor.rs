//! Cursor over a sentinel-terminated buffer.
//!
//! EOF is the sentinel byte at `pos >= source_len`; a `0x00` before that is
//! an interior null and scans as an invalid byte.

use crate::char_class;

/// Byte cursor. [`Copy`], so saving a position for lookahead is free.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str, buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!((source_len as usize) < buf.len(), "sentinel must be within buffer bounds");
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Cursor {
            source,
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source text between two token boundaries.
    ///
    /// Boundaries produced by the scanner always fall on character
    /// boundaries; anything else yields `""`.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        self.source.get(start as usize..end as usize).unwrap_or("")
    }

    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds. `pred(0)` must be `false`.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(char_class::is_whitespace);
    }

    /// Width in bytes of the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one whole UTF-8 character, never past the sentinel.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.source_len);
    }
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 40);
