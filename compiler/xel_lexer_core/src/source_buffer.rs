//! Sentinel-terminated source buffer.
//!
//! The buffer guarantees a `0x00` sentinel byte after the expression text so
//! the scanner detects the end without bounds checks. The total size is
//! rounded up to a 64-byte boundary, which also gives `peek()` and `peek2()`
//! zero padding to read near the end.

use crate::Cursor;

const CACHE_LINE: usize = 64;

/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer<'src> {
    source: &'src str,
    buf: Vec<u8>,
    source_len: u32,
}

impl<'src> SourceBuffer<'src> {
    /// Copy `source` into a padded buffer with the sentinel appended.
    ///
    /// Expressions are length-checked before they reach the lexer; lengths
    /// past `u32::MAX` saturate.
    pub fn new(source: &'src str) -> Self {
        let bytes = source.as_bytes();
        let padded_len = (bytes.len() + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..bytes.len()].copy_from_slice(bytes);
        SourceBuffer {
            source,
            buf,
            source_len: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
        }
    }

    /// Cursor positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self.source, &self.buf, self.source_len)
    }

    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Full buffer including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }
}
