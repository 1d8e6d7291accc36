//! Parser tests.
//!
//! - `parser`: precedence, navigation, references and inline collections
//! - `errors`: error kinds and the positions they report
