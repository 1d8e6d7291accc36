use super::*;

#[test]
fn table_agrees_with_std_for_ascii() {
    for b in 0u8..128 {
        assert_eq!(is_digit(b), b.is_ascii_digit(), "digit {b}");
        assert_eq!(is_hex_digit(b), b.is_ascii_hexdigit(), "hex {b}");
        assert_eq!(
            is_ident_continue(b),
            b.is_ascii_alphanumeric() || b == b'_' || b == b'$',
            "ident {b}"
        );
    }
}

#[test]
fn high_bytes_have_no_class() {
    for b in 128u8..=255 {
        assert!(!is_digit(b));
        assert!(!is_hex_digit(b));
        assert!(!is_ident_start(b));
        assert!(!is_ident_continue(b));
        assert!(!is_whitespace(b));
    }
}

#[test]
fn sentinel_has_no_class() {
    assert!(!is_ident_continue(0));
    assert!(!is_whitespace(0));
    assert!(!is_digit(0));
}
