use std::fmt;
use std::fmt::Write as _;

use xel_ir::Span;

use crate::ErrorCode;

/// A rendered-on-demand error report: code, message and source location.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        Diagnostic {
            code,
            message: message.into(),
            span,
        }
    }

    /// Render with the offending source line and a caret underline.
    ///
    /// ```text
    /// error[XEL2005]: right operand missing for `>`
    ///   |
    /// 1 | 1 >
    ///   |   ^
    /// ```
    pub fn render(&self, source: &str) -> String {
        let mut out = format!("error[{}]: {}\n", self.code, self.message);

        let start = floor_char_boundary(source, self.span.start as usize);
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let line_end = source[start..]
            .find('\n')
            .map_or(source.len(), |i| start + i);
        let line_no = source[..line_start].matches('\n').count() + 1;
        let gutter = " ".repeat(line_no.to_string().len());

        let column = source[line_start..start].chars().count();
        let end = floor_char_boundary(source, self.span.end as usize).clamp(start, line_end);
        let width = source[start..end].chars().count().max(1);

        let _ = writeln!(out, "{gutter} |");
        let _ = writeln!(out, "{line_no} | {}", &source[line_start..line_end]);
        let _ = write!(
            out,
            "{gutter} | {}{}",
            " ".repeat(column),
            "^".repeat(width)
        );
        out
    }
}

fn floor_char_boundary(source: &str, pos: usize) -> usize {
    let mut pos = pos.min(source.len());
    while !source.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error[{}] at position {}: {}",
            self.code, self.span.start, self.message
        )
    }
}
