//! Tokenizer for xel expressions.
//!
//! Two layers:
//! - `xel_lexer_core` scans bytes into `(RawTag, len)` pairs
//! - this crate cooks them into [`Token`]s: whitespace dropped, alternative
//!   operator spellings (`ne`, `gt`, `div`, ...) resolved, literals validated
//!
//! Lexing is all-or-nothing: the first malformed literal, unterminated
//! string or invalid character aborts with a [`LexError`].

mod alt_operators;
mod cooker;
mod lex_error;
pub mod literal;

#[cfg(test)]
mod tests;

use tracing::trace;
use xel_ir::TokenList;
use xel_lexer_core::{RawScanner, RawTag, SourceBuffer};

pub use lex_error::{LexError, LexErrorKind};

/// Tokenize an expression. The returned list always ends with `Eof`.
pub fn lex(source: &str) -> Result<TokenList<'_>, LexError> {
    let tokens = cooker::TokenCooker::new(source.len() / 2 + 1).run(source)?;
    trace!(tokens = tokens.len(), "lexed expression");
    Ok(tokens)
}

/// Rewrite the textual logical operators `and`/`or` (any case) to `&&`/`||`,
/// keeping every other byte of `text` as written.
///
/// Works on anything that tokenizes, including text that is not a complete
/// expression, such as pointcut designators:
/// `execution(* *(..)) and args(String)` becomes
/// `execution(* *(..)) && args(String)`.
pub fn normalize_operators(text: &str) -> Result<String, LexError> {
    // Validate first so malformed input reports the same error as `lex`.
    lex(text)?;

    let buf = SourceBuffer::new(text);
    let mut scanner = RawScanner::new(buf.cursor());
    let mut out = String::with_capacity(text.len());
    let mut previous = RawTag::Eof;
    loop {
        let start = scanner.pos();
        let raw = scanner.next_token();
        if raw.tag == RawTag::Eof {
            return Ok(out);
        }
        let piece = scanner.slice(start, start + raw.len);
        let after_dot = matches!(previous, RawTag::Dot | RawTag::QuestionDot);
        match raw.tag {
            RawTag::Ident if !after_dot && piece.eq_ignore_ascii_case("and") => out.push_str("&&"),
            RawTag::Ident if !after_dot && piece.eq_ignore_ascii_case("or") => out.push_str("||"),
            _ => out.push_str(piece),
        }
        if raw.tag != RawTag::Whitespace {
            previous = raw.tag;
        }
    }
}
