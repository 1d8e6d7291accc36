use std::fmt;

/// Stable codes for all diagnostics.
///
/// Format: XEL#### where the first digit is the phase:
/// - XEL1xxx: lexer
/// - XEL2xxx: parser
/// - XEL3xxx: evaluation
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E1xxx)
    /// Unterminated string literal
    E1001,
    /// Character that cannot start any token
    E1002,
    /// Malformed or out-of-range numeric literal
    E1003,

    // Parser Errors (E2xxx)
    /// Unexpected token
    E2001,
    /// Input ended before the expression was complete
    E2002,
    /// Input left over after a complete expression
    E2003,
    /// Binary operator without a left operand
    E2004,
    /// Operator without a right operand
    E2005,
    /// Malformed qualified name in `T(...)` or `new`
    E2006,
    /// Expression longer than the configured maximum
    E2007,

    // Evaluation Errors (E3xxx)
    /// Operand has the wrong type
    E3001,
    /// Division or modulus by zero
    E3002,
    /// Operator not supported for the operand types
    E3003,
    /// Operands cannot be ordered
    E3004,
    /// Navigation on a null value
    E3005,
    /// Property or field not found
    E3006,
    /// Method not found
    E3007,
    /// Function not found
    E3008,
    /// Type not found
    E3009,
    /// No constructor for the type and arguments
    E3010,
    /// Bean not found
    E3011,
    /// Index out of bounds or not indexable
    E3012,
    /// Projection on an unsupported target
    E3013,
    /// Selection on an unsupported target
    E3014,
    /// Selection predicate did not produce a boolean
    E3015,
    /// Invalid regular expression in `matches`
    E3016,
    /// Target of `=` is not assignable
    E3017,
    /// Failure reported by host code
    E3018,
    /// Value cannot be used as a map key
    E3019,
    /// Numeric conversion failed
    E3020,
    /// Result would exceed the evaluator's size limit
    E3021,
}

impl ErrorCode {
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("XEL1")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("XEL2")
    }

    pub fn is_eval_error(&self) -> bool {
        self.as_str().starts_with("XEL3")
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "XEL1001",
            ErrorCode::E1002 => "XEL1002",
            ErrorCode::E1003 => "XEL1003",
            ErrorCode::E2001 => "XEL2001",
            ErrorCode::E2002 => "XEL2002",
            ErrorCode::E2003 => "XEL2003",
            ErrorCode::E2004 => "XEL2004",
            ErrorCode::E2005 => "XEL2005",
            ErrorCode::E2006 => "XEL2006",
            ErrorCode::E2007 => "XEL2007",
            ErrorCode::E3001 => "XEL3001",
            ErrorCode::E3002 => "XEL3002",
            ErrorCode::E3003 => "XEL3003",
            ErrorCode::E3004 => "XEL3004",
            ErrorCode::E3005 => "XEL3005",
            ErrorCode::E3006 => "XEL3006",
            ErrorCode::E3007 => "XEL3007",
            ErrorCode::E3008 => "XEL3008",
            ErrorCode::E3009 => "XEL3009",
            ErrorCode::E3010 => "XEL3010",
            ErrorCode::E3011 => "XEL3011",
            ErrorCode::E3012 => "XEL3012",
            ErrorCode::E3013 => "XEL3013",
            ErrorCode::E3014 => "XEL3014",
            ErrorCode::E3015 => "XEL3015",
            ErrorCode::E3016 => "XEL3016",
            ErrorCode::E3017 => "XEL3017",
            ErrorCode::E3018 => "XEL3018",
            ErrorCode::E3019 => "XEL3019",
            ErrorCode::E3020 => "XEL3020",
            ErrorCode::E3021 => "XEL3021",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
