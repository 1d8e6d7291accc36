//! 256-entry character classification table.
//!
//! Bytes `>= 0x80` have no class, so non-ASCII input never classifies as a
//! digit or identifier character.

const DIGIT: u8 = 1 << 0;
const HEX: u8 = 1 << 1;
const IDENT_START: u8 = 1 << 2;
const IDENT_CONTINUE: u8 = 1 << 3;
const WHITESPACE: u8 = 1 << 4;

static CHAR_CLASS: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 128 {
        #[allow(clippy::cast_possible_truncation, reason = "i < 128")]
        let b = i as u8;
        let mut class = 0;
        if b.is_ascii_digit() {
            class |= DIGIT | HEX | IDENT_CONTINUE;
        }
        if matches!(b, b'a'..=b'f' | b'A'..=b'F') {
            class |= HEX;
        }
        if b.is_ascii_alphabetic() || b == b'_' || b == b'$' {
            class |= IDENT_START | IDENT_CONTINUE;
        }
        if matches!(b, b' ' | b'\t' | b'\r' | b'\n') {
            class |= WHITESPACE;
        }
        table[i] = class;
        i += 1;
    }
    table
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    CHAR_CLASS[b as usize] & DIGIT != 0
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    CHAR_CLASS[b as usize] & HEX != 0
}

#[inline]
pub fn is_ident_start(b: u8) -> bool {
    CHAR_CLASS[b as usize] & IDENT_START != 0
}

#[inline]
pub fn is_ident_continue(b: u8) -> bool {
    CHAR_CLASS[b as usize] & IDENT_CONTINUE != 0
}

#[inline]
pub fn is_whitespace(b: u8) -> bool {
    CHAR_CLASS[b as usize] & WHITESPACE != 0
}

#[cfg(test)]
mod tests;
