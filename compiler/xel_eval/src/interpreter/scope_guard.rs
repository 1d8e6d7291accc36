//! RAII guards for the active-context and scope stacks.
//!
//! Navigation steps push their receiver as the active context, and
//! projection/selection bodies push a scope for the element being visited.
//! Both must be popped on every exit path, including `?` returns, so the
//! push happens when a [`ScopedInterpreter`] is created and the pop in its
//! `Drop`.
//!
//! ```text
//! let mut scoped = self.with_active_context(receiver);
//! let value = scoped.eval(step)?;
//! // active context popped here
//! ```

use std::ops::{Deref, DerefMut};

use xel_ir::TypedValue;

use super::Interpreter;

enum Pushed {
    ActiveContext,
    Scope,
}

/// Guard that pops what it pushed when dropped.
///
/// Access the interpreter through this guard; it implements `Deref` and
/// `DerefMut`.
pub(crate) struct ScopedInterpreter<'guard, 'a> {
    interpreter: &'guard mut Interpreter<'a>,
    pushed: Pushed,
}

impl Drop for ScopedInterpreter<'_, '_> {
    fn drop(&mut self) {
        match self.pushed {
            Pushed::ActiveContext => self.interpreter.state.pop_active_context(),
            Pushed::Scope => self.interpreter.state.exit_scope(),
        }
    }
}

impl<'a> Deref for ScopedInterpreter<'_, 'a> {
    type Target = Interpreter<'a>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<'a> Interpreter<'a> {
    /// Make `receiver` the active context until the guard drops.
    pub(crate) fn with_active_context(&mut self, receiver: TypedValue) -> ScopedInterpreter<'_, 'a> {
        self.state.push_active_context(receiver);
        ScopedInterpreter {
            interpreter: self,
            pushed: Pushed::ActiveContext,
        }
    }

    /// Enter a projection/selection scope for `element` until the guard drops.
    pub(crate) fn with_element_scope(&mut self, element: TypedValue) -> ScopedInterpreter<'_, 'a> {
        self.state.enter_scope(element);
        ScopedInterpreter {
            interpreter: self,
            pushed: Pushed::Scope,
        }
    }
}

#[cfg(test)]
mod tests;
