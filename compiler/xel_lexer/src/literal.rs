//! Literal text to value conversion.
//!
//! The lexer runs these to validate literals; the parser runs them again to
//! build constant values, so a token that lexed always converts.

/// Decimal `int`: must fit `i32`.
pub fn cook_int(text: &str) -> Option<i32> {
    text.parse().ok()
}

/// Decimal `long` with `L`/`l` suffix: must fit `i64`.
pub fn cook_long(text: &str) -> Option<i64> {
    strip_suffix(text, &['l', 'L']).parse().ok()
}

/// `0x` hex `int`: must fit `i32` (no two's-complement reinterpretation).
pub fn cook_hex_int(text: &str) -> Option<i32> {
    i32::from_str_radix(hex_digits(text), 16).ok()
}

/// `0x` hex `long` with `L`/`l` suffix: must fit `i64`.
pub fn cook_hex_long(text: &str) -> Option<i64> {
    i64::from_str_radix(hex_digits(strip_suffix(text, &['l', 'L'])), 16).ok()
}

/// Double-precision real, optional `d`/`D` suffix.
pub fn cook_real(text: &str) -> Option<f64> {
    strip_suffix(text, &['d', 'D'])
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Single-precision real with `f`/`F` suffix.
pub fn cook_float(text: &str) -> Option<f32> {
    strip_suffix(text, &['f', 'F'])
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Quoted string: strip the quotes and collapse doubled quote characters.
pub fn cook_string(text: &str) -> String {
    let Some(quote) = text.chars().next() else {
        return String::new();
    };
    let inner = text
        .strip_prefix(quote)
        .and_then(|s| s.strip_suffix(quote))
        .unwrap_or("");
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}

fn strip_suffix<'a>(text: &'a str, suffixes: &[char]) -> &'a str {
    text.strip_suffix(suffixes).unwrap_or(text)
}

fn hex_digits(text: &str) -> &str {
    text.get(2..).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ints() {
        assert_eq!(cook_int("2147483647"), Some(i32::MAX));
        assert_eq!(cook_int("2147483648"), None);
        assert_eq!(cook_long("2147483648L"), Some(2_147_483_648));
        assert_eq!(cook_long("9223372036854775808L"), None);
    }

    #[test]
    fn hex() {
        assert_eq!(cook_hex_int("0xFF"), Some(255));
        assert_eq!(cook_hex_int("0x7FFFFFFF"), Some(i32::MAX));
        assert_eq!(cook_hex_int("0xFFFFFFFF"), None);
        assert_eq!(cook_hex_long("0xFFFFFFFFL"), Some(0xFFFF_FFFF));
    }

    #[test]
    fn reals() {
        assert_eq!(cook_real("1.5"), Some(1.5));
        assert_eq!(cook_real("2d"), Some(2.0));
        assert_eq!(cook_real("1e3"), Some(1000.0));
        assert_eq!(cook_real("1e400"), None);
        assert_eq!(cook_float("1.5f"), Some(1.5));
    }

    #[test]
    fn strings() {
        assert_eq!(cook_string("'It''s'"), "It's");
        assert_eq!(cook_string("\"say \"\"hi\"\"\""), "say \"hi\"");
        assert_eq!(cook_string("'a\"b'"), "a\"b");
        assert_eq!(cook_string("''"), "");
    }
}
