//! Flat AST: expressions live in an [`ExprArena`] and refer to each other
//! by [`ExprId`].
//!
//! A node's constant value is decided when the parser allocates it and is
//! never written again; once the arena is wrapped in an [`Ast`] the whole
//! tree is immutable and can be shared across threads.

use std::sync::Arc;

use crate::{ExprId, ExprRange, Span, Value};

/// Binary operators, including the relational keywords.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    InstanceOf,
    Matches,
    Between,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    /// Canonical spelling used by `to_source_string`.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::Matches => "matches",
            BinaryOp::Between => "between",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "^",
        }
    }

    /// Binding strength (higher binds tighter).
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge
            | BinaryOp::InstanceOf
            | BinaryOp::Matches
            | BinaryOp::Between => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 6,
            BinaryOp::Pow => 7,
        }
    }

    pub fn is_relational(self) -> bool {
        self.precedence() == 4
    }

    pub fn is_right_associative(self) -> bool {
        self == BinaryOp::Pow
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::Not => "!",
        }
    }
}

/// Which matches a selection keeps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SelectionKind {
    /// `?[...]`
    All,
    /// `^[...]`
    First,
    /// `$[...]`
    Last,
}

impl SelectionKind {
    pub fn as_symbol(self) -> &'static str {
        match self {
            SelectionKind::All => "?[",
            SelectionKind::First => "^[",
            SelectionKind::Last => "$[",
        }
    }
}

/// Expression node kinds.
///
/// Navigation steps (`PropertyOrField`, `MethodCall`, `Indexer`,
/// `Projection`, `Selection`) evaluate against the active context object;
/// `Compound` threads the result of each child into the next as the new
/// active context.
#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Literal; the value is the node's constant.
    Literal,
    /// `#this`
    This,
    /// `#root`
    Root,
    /// `#name`
    Variable(Arc<str>),
    /// `#name(args)`
    FunctionCall { name: Arc<str>, args: ExprRange },
    PropertyOrField { name: Arc<str>, null_safe: bool },
    MethodCall {
        name: Arc<str>,
        args: ExprRange,
        null_safe: bool,
    },
    Indexer { index: ExprId, null_safe: bool },
    /// `.![body]`
    Projection { body: ExprId, null_safe: bool },
    /// `.?[body]`, `.^[body]`, `.$[body]`
    Selection {
        kind: SelectionKind,
        body: ExprId,
        null_safe: bool,
    },
    /// Start node followed by navigation steps.
    Compound(ExprRange),
    /// `T(qualified.Name)`
    TypeRef(Arc<str>),
    /// `new qualified.Name(args)`
    Constructor { type_name: Arc<str>, args: ExprRange },
    /// `@name`, or `&name` when `factory`.
    BeanRef { name: Arc<str>, factory: bool },
    /// `{a, b, c}`
    InlineList(ExprRange),
    /// `{k1: v1, k2: v2}`; the range holds keys and values interleaved.
    InlineMap(ExprRange),
    Unary { op: UnaryOp, operand: ExprId },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Ternary {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    /// `left ?: right`
    Elvis { left: ExprId, right: ExprId },
    /// `target = value`
    Assign { target: ExprId, value: ExprId },
}

/// One AST node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Folded value, present when every input to the node is a literal.
    pub constant: Option<Value>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            constant: None,
        }
    }

    pub fn with_constant(kind: ExprKind, span: Span, value: Value) -> Self {
        Expr {
            kind,
            span,
            constant: Some(value),
        }
    }
}

/// Node storage for one parsed expression.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "expression length is bounded far below u32::MAX nodes"
    )]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "expression length is bounded far below u32::MAX nodes"
    )]
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(ids);
        let len = self.expr_lists.len() as u32 - start;
        ExprRange::new(start, len)
    }

    #[inline]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        let start = range.start as usize;
        &self.expr_lists[start..start + range.len()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}

/// A parsed expression: immutable arena, root node, and the source text.
#[derive(Clone, Debug)]
pub struct Ast {
    arena: ExprArena,
    root: ExprId,
    source: Arc<str>,
}

impl Ast {
    pub fn new(arena: ExprArena, root: ExprId, source: Arc<str>) -> Self {
        Ast {
            arena,
            root,
            source,
        }
    }

    #[inline]
    pub fn arena(&self) -> &ExprArena {
        &self.arena
    }

    #[inline]
    pub fn root(&self) -> ExprId {
        self.root
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by a node.
    pub fn text(&self, id: ExprId) -> &str {
        let span = self.arena.get_expr(id).span;
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Number of nodes; profile tables are sized by this.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }
}
