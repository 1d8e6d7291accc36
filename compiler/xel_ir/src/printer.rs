//! Canonical re-serialization of an [`Ast`].
//!
//! Operators are printed in their symbolic spelling (`and` becomes `&&`,
//! `gt` becomes `>`), binary operators get single spaces, and parentheses
//! appear only where precedence or associativity needs them. Literals keep
//! their source spelling.

use xel_stack::ensure_sufficient_stack;

use crate::{Ast, BinaryOp, ExprId, ExprKind, ExprRange};

/// Assignment, Elvis and ternary.
const PREC_CONDITIONAL: u8 = 1;
const PREC_UNARY: u8 = 8;
const PREC_PRIMARY: u8 = 9;

impl Ast {
    /// Canonical source form of the expression.
    pub fn to_source_string(&self) -> String {
        let mut printer = Printer {
            ast: self,
            out: String::with_capacity(self.source().len()),
        };
        printer.expr(self.root());
        printer.out
    }
}

struct Printer<'a> {
    ast: &'a Ast,
    out: String,
}

impl Printer<'_> {
    fn precedence(&self, id: ExprId) -> u8 {
        match &self.ast.arena().get_expr(id).kind {
            ExprKind::Ternary { .. } | ExprKind::Elvis { .. } | ExprKind::Assign { .. } => {
                PREC_CONDITIONAL
            }
            ExprKind::Binary { op, .. } => op.precedence(),
            ExprKind::Unary { .. } => PREC_UNARY,
            _ => PREC_PRIMARY,
        }
    }

    /// Print `id`, parenthesised when it binds looser than `min`.
    fn operand(&mut self, id: ExprId, min: u8) {
        if self.precedence(id) < min {
            self.out.push('(');
            self.expr(id);
            self.out.push(')');
        } else {
            self.expr(id);
        }
    }

    fn list(&mut self, range: ExprRange) {
        let ast = self.ast;
        let ids = ast.arena().get_expr_list(range);
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(id);
        }
    }

    fn args(&mut self, range: ExprRange) {
        self.out.push('(');
        self.list(range);
        self.out.push(')');
    }

    fn expr(&mut self, id: ExprId) {
        ensure_sufficient_stack(|| self.expr_inner(id));
    }

    fn expr_inner(&mut self, id: ExprId) {
        let ast = self.ast;
        let expr = ast.arena().get_expr(id);
        match &expr.kind {
            ExprKind::Literal => self.out.push_str(ast.text(id)),
            ExprKind::This => self.out.push_str("#this"),
            ExprKind::Root => self.out.push_str("#root"),
            ExprKind::Variable(name) => {
                self.out.push('#');
                self.out.push_str(name);
            }
            ExprKind::FunctionCall { name, args } => {
                self.out.push('#');
                self.out.push_str(name);
                self.args(*args);
            }
            ExprKind::PropertyOrField { name, .. } => self.out.push_str(name),
            ExprKind::MethodCall { name, args, .. } => {
                self.out.push_str(name);
                self.args(*args);
            }
            ExprKind::Indexer { index, .. } => {
                self.out.push('[');
                self.expr(*index);
                self.out.push(']');
            }
            ExprKind::Projection { body, .. } => {
                self.out.push_str("![");
                self.expr(*body);
                self.out.push(']');
            }
            ExprKind::Selection { kind, body, .. } => {
                self.out.push_str(kind.as_symbol());
                self.expr(*body);
                self.out.push(']');
            }
            ExprKind::Compound(steps) => self.compound(*steps),
            ExprKind::TypeRef(name) => {
                self.out.push_str("T(");
                self.out.push_str(name);
                self.out.push(')');
            }
            ExprKind::Constructor { type_name, args } => {
                self.out.push_str("new ");
                self.out.push_str(type_name);
                self.args(*args);
            }
            ExprKind::BeanRef { name, factory } => {
                self.out.push(if *factory { '&' } else { '@' });
                if is_plain_identifier(name) {
                    self.out.push_str(name);
                } else {
                    self.out.push('\'');
                    self.out.push_str(&name.replace('\'', "''"));
                    self.out.push('\'');
                }
            }
            ExprKind::InlineList(items) => {
                self.out.push('{');
                self.list(*items);
                self.out.push('}');
            }
            ExprKind::InlineMap(pairs) => self.inline_map(*pairs),
            ExprKind::Unary { op, operand } => {
                self.out.push_str(op.as_symbol());
                // `- -1` must not print as the `--` token.
                if ast.text(*operand).starts_with(['-', '+'])
                    && self.precedence(*operand) >= PREC_UNARY
                {
                    self.out.push(' ');
                }
                self.operand(*operand, PREC_UNARY);
            }
            ExprKind::Binary { op, left, right } => self.binary(*op, *left, *right),
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            } => {
                self.operand(*cond, PREC_CONDITIONAL + 1);
                self.out.push_str(" ? ");
                self.expr(*then_expr);
                self.out.push_str(" : ");
                self.expr(*else_expr);
            }
            ExprKind::Elvis { left, right } => {
                self.operand(*left, PREC_CONDITIONAL + 1);
                self.out.push_str(" ?: ");
                self.expr(*right);
            }
            ExprKind::Assign { target, value } => {
                self.operand(*target, PREC_CONDITIONAL + 1);
                self.out.push_str(" = ");
                self.expr(*value);
            }
        }
    }

    fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) {
        let prec = op.precedence();
        // Relational operators do not chain, so neither side may share their level.
        let (left_min, right_min) = if op.is_relational() {
            (prec + 1, prec + 1)
        } else if op.is_right_associative() {
            (prec + 1, prec)
        } else {
            (prec, prec + 1)
        };
        self.operand(left, left_min);
        self.out.push(' ');
        self.out.push_str(op.as_symbol());
        self.out.push(' ');
        self.operand(right, right_min);
    }

    fn compound(&mut self, steps: ExprRange) {
        let ast = self.ast;
        let ids = ast.arena().get_expr_list(steps);
        let Some((&first, rest)) = ids.split_first() else {
            return;
        };
        self.operand(first, PREC_PRIMARY);
        for &step in rest {
            match &ast.arena().get_expr(step).kind {
                ExprKind::Indexer {
                    null_safe: false, ..
                } => {}
                ExprKind::Indexer { null_safe: true, .. }
                | ExprKind::PropertyOrField { null_safe: true, .. }
                | ExprKind::MethodCall { null_safe: true, .. }
                | ExprKind::Projection { null_safe: true, .. }
                | ExprKind::Selection { null_safe: true, .. } => self.out.push_str("?."),
                _ => self.out.push('.'),
            }
            self.expr(step);
        }
    }

    fn inline_map(&mut self, pairs: ExprRange) {
        let ast = self.ast;
        let ids = ast.arena().get_expr_list(pairs);
        if ids.is_empty() {
            self.out.push_str("{:}");
            return;
        }
        self.out.push('{');
        for (i, pair) in ids.chunks_exact(2).enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.expr(pair[0]);
            self.out.push_str(": ");
            self.expr(pair[1]);
        }
        self.out.push('}');
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
