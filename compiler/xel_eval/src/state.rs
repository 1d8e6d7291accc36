//! Per-evaluation mutable state.
//!
//! One [`EvaluationState`] exists per evaluation call and is dropped when
//! the call returns, so an [`xel_ir::Ast`] can be evaluated from several
//! threads at once as long as each evaluation has its own state.

use xel_ir::TypedValue;

use crate::context::EvaluationContext;

/// Binding introduced by one projection or selection step: the element
/// currently being visited, visible as `#this`.
#[derive(Clone, Debug)]
struct Scope {
    element: TypedValue,
}

pub struct EvaluationState<'a> {
    context: &'a mut dyn EvaluationContext,
    root: TypedValue,
    /// Top is the implicit receiver for navigation and `#this`.
    active_contexts: Vec<TypedValue>,
    scopes: Vec<Scope>,
}

impl<'a> EvaluationState<'a> {
    pub fn new(context: &'a mut dyn EvaluationContext) -> Self {
        let root = context.root_object();
        EvaluationState {
            context,
            active_contexts: vec![root.clone()],
            root,
            scopes: Vec::new(),
        }
    }

    pub fn context(&self) -> &dyn EvaluationContext {
        &*self.context
    }

    pub fn context_mut(&mut self) -> &mut dyn EvaluationContext {
        &mut *self.context
    }

    /// Value of `#root`.
    pub fn root(&self) -> &TypedValue {
        &self.root
    }

    pub fn active_context(&self) -> &TypedValue {
        self.active_contexts.last().unwrap_or(&self.root)
    }

    pub fn push_active_context(&mut self, value: TypedValue) {
        self.active_contexts.push(value);
    }

    pub fn pop_active_context(&mut self) {
        self.active_contexts.pop();
    }

    /// Receiver for arguments and index expressions: the element of the
    /// innermost projection or selection, or the root outside of one.
    pub fn scope_root(&self) -> &TypedValue {
        self.scopes.last().map_or(&self.root, |scope| &scope.element)
    }

    pub fn enter_scope(&mut self, element: TypedValue) {
        self.active_contexts.push(element.clone());
        self.scopes.push(Scope { element });
    }

    pub fn exit_scope(&mut self) {
        self.scopes.pop();
        self.active_contexts.pop();
    }

    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn active_context_depth(&self) -> usize {
        self.active_contexts.len()
    }
}
