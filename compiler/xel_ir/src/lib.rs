//! Shared data for the xel expression pipeline.
//!
//! - [`Token`] / [`TokenList`]: output of `xel_lexer`
//! - [`ExprArena`] / [`Ast`]: output of `xel_parse`, immutable once built
//! - [`Value`] / [`TypedValue`] / [`TypeDesc`]: runtime values shared by the
//!   interpreter (`xel_eval`) and the compiled backend (`xel_compile`)

mod ast;
mod expr_id;
mod printer;
mod span;
mod token;
pub mod value;

pub use ast::{Ast, BinaryOp, Expr, ExprArena, ExprKind, SelectionKind, UnaryOp};
pub use expr_id::{ExprId, ExprRange};
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use value::{
    ArrayValue, Function, HostError, HostObject, MapKey, TypeDesc, TypeRef, TypedValue, Value,
    ValueMap,
};
