//! Raw scanning layer of the xel tokenizer.
//!
//! Produces `(RawTag, len)` pairs over a sentinel-terminated buffer. Keyword
//! and alternative-operator resolution, literal validation and error
//! reporting happen one layer up in `xel_lexer`.

mod char_class;
mod cursor;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use char_class::{is_digit, is_hex_digit, is_ident_continue, is_ident_start, is_whitespace};
pub use cursor::Cursor;
pub use raw_scanner::RawScanner;
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};

/// Scan `source` into raw tokens, excluding the final `Eof`.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = SourceBuffer::new(source);
    let mut scanner = RawScanner::new(buf.cursor());
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        if token.tag == RawTag::Eof {
            return tokens;
        }
        tokens.push(token);
    }
}
