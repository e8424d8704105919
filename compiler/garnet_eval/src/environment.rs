//! Lexical scopes for the interpreter.
//!
//! Scopes form a parent-linked chain of [`LocalScope`] handles. The
//! [`Environment`] keeps a stack of the scopes entered by the running frame
//! plus a fixed handle to the global scope. A closure keeps the scope it was
//! defined in alive by holding its handle.
//!
//! Naming rules:
//! - a name starting with an ASCII uppercase letter is a constant: it can
//!   only be bound in the global scope, and only once;
//! - a name starting with `$` is a global variable: defining it writes the
//!   value into every enclosing scope, and reading it unbound yields `nil`.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Value;

/// Returns `true` for constant names (`Pi`, `MAX`).
#[inline]
pub fn is_constant_name(name: &str) -> bool {
    name.as_bytes().first().is_some_and(u8::is_ascii_uppercase)
}

/// Returns `true` for global variable names (`$count`).
#[inline]
pub fn is_global_name(name: &str) -> bool {
    name.starts_with('$')
}

/// Error returned by `Scope::define`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefineError {
    /// Constant already bound in this scope.
    ConstantReassignment,
    /// Constant defined outside the global scope.
    DynamicConstant,
}

/// Error returned by `Scope::assign`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// The nearest binding is a constant.
    Constant,
    /// Variable not found in any scope.
    Undefined,
}

/// A single-threaded scope handle: `Rc<RefCell<T>>` behind one factory.
///
/// Scopes never cross threads, so `Rc` is enough.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether two handles point at the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single scope containing variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    /// Enclosing scope, `None` only for the global scope.
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    #[inline]
    pub fn is_global(&self) -> bool {
        self.parent.is_none()
    }

    /// Bind `name` in this scope, applying the constant and global rules.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), DefineError> {
        if is_global_name(name) {
            if let Some(parent) = &self.parent {
                parent.borrow_mut().define(name, value.clone())?;
            }
        } else if is_constant_name(name) {
            if self.bindings.contains_key(name) {
                return Err(DefineError::ConstantReassignment);
            }
            if !self.is_global() {
                return Err(DefineError::DynamicConstant);
            }
        }
        self.bindings.insert(name.to_owned(), value);
        Ok(())
    }

    /// Bind without any naming rules. Used to seed built-ins.
    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_owned(), value);
    }

    /// Look up a variable, walking outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    /// Overwrite the nearest existing binding.
    ///
    /// Global variables are written through every scope that holds a copy.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        let found = match self.bindings.get_mut(name) {
            Some(_) if is_constant_name(name) => return Err(AssignError::Constant),
            Some(slot) => {
                *slot = value.clone();
                true
            }
            None => false,
        };
        if found && !is_global_name(name) {
            return Ok(());
        }
        match &self.parent {
            Some(parent) => match parent.borrow_mut().assign(name, value) {
                Err(AssignError::Undefined) if found => Ok(()),
                result => result,
            },
            None if found => Ok(()),
            None => Err(AssignError::Undefined),
        }
    }
}

/// The scope stack of the running frame.
///
/// Function calls swap in a fresh `Environment` rooted at the callee's
/// closure; the global handle is shared by all of them.
pub struct Environment {
    /// Scopes entered by this frame, innermost last. Never empty.
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// An environment for a call frame whose outermost scope is `closure`.
    #[must_use]
    pub fn enclosed(&self, closure: LocalScope<Scope>) -> Self {
        Environment {
            scopes: vec![closure],
            global: self.global.clone(),
        }
    }

    /// Number of scopes entered by this frame.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the innermost scope. The frame's root scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Handle to the innermost scope, as captured by closures.
    #[inline]
    pub fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.global).clone()
    }

    #[inline]
    pub fn global(&self) -> &LocalScope<Scope> {
        &self.global
    }

    #[inline]
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), DefineError> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value)
    }

    /// Look up a variable. An unbound global variable reads as `nil`.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let found = self.scopes.last().unwrap_or(&self.global).borrow().lookup(name);
        found.or_else(|| is_global_name(name).then_some(Value::Nil))
    }

    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .assign(name, value)
    }

    /// Bind a built-in in the global scope.
    pub fn define_global(&mut self, name: &str, value: Value) {
        self.global.borrow_mut().insert(name, value);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
