//! RAII guards for interpreter environment management.
//!
//! [`ScopedInterpreter`] pushes a child scope and pops it on drop, so every
//! exit path out of a block (normal completion, a `Flow` signal, or an
//! `Err` propagated with `?`) restores the enclosing scope.
//!
//! ```text
//! let mut scoped = interpreter.scoped();
//! scoped.define(&name, value)?;
//! scoped.execute_block(body)?;
//! // scope popped here
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::Environment;

/// Guard that pops the scope it pushed when dropped.
///
/// Derefs to the interpreter, so it is used exactly like one.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a child scope that lives as long as the returned guard.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` with `frame` as the environment, then restore the caller's.
    ///
    /// Used for calls: the callee sees its closure chain, not the caller's
    /// scopes.
    pub(crate) fn with_frame<T, F>(&mut self, frame: Environment, f: F) -> T
    where
        F: FnOnce(&mut Interpreter) -> T,
    {
        let saved = std::mem::replace(&mut self.env, frame);
        let result = f(self);
        self.env = saved;
        result
    }
}
