#![allow(clippy::unwrap_used)]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn scope_define_lookup() {
    let mut scope = Scope::new();
    scope.define("x", Value::Int(42)).unwrap();
    assert_eq!(scope.lookup("x"), Some(Value::Int(42)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().define("x", Value::Int(1)).unwrap();

    let mut child = Scope::with_parent(parent.clone());
    child.define("x", Value::Int(2)).unwrap();

    assert_eq!(child.lookup("x"), Some(Value::Int(2)));
    assert_eq!(parent.borrow().lookup("x"), Some(Value::Int(1)));
}

#[test]
fn environment_push_pop() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1)).unwrap();

    env.push_scope();
    env.define("x", Value::Int(2)).unwrap();
    env.define("inner", Value::Nil).unwrap();
    assert_eq!(env.lookup("x"), Some(Value::Int(2)));
    assert_eq!(env.depth(), 2);

    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(Value::Int(1)));
    assert_eq!(env.lookup("inner"), None);
}

#[test]
fn root_scope_is_never_popped() {
    let mut env = Environment::new();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    env.define("x", Value::Int(1)).unwrap();
    assert_eq!(env.lookup("x"), Some(Value::Int(1)));
}

#[test]
fn assign_updates_nearest_binding() {
    let mut env = Environment::new();
    env.define("x", Value::Int(1)).unwrap();
    env.push_scope();
    env.assign("x", Value::Int(5)).unwrap();
    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(Value::Int(5)));
}

#[test]
fn assign_requires_existing_binding() {
    let mut env = Environment::new();
    assert_eq!(env.assign("nope", Value::Nil), Err(AssignError::Undefined));
}

#[test]
fn constant_cannot_be_rebound_in_same_scope() {
    let mut env = Environment::new();
    env.define("Max", Value::Int(1)).unwrap();
    assert_eq!(
        env.define("Max", Value::Int(2)),
        Err(DefineError::ConstantReassignment)
    );
    assert_eq!(env.assign("Max", Value::Int(2)), Err(AssignError::Constant));
    assert_eq!(env.lookup("Max"), Some(Value::Int(1)));
}

#[test]
fn constant_cannot_be_created_in_nested_scope() {
    let mut env = Environment::new();
    env.push_scope();
    assert_eq!(
        env.define("Pi", Value::Float(2.5)),
        Err(DefineError::DynamicConstant)
    );
}

#[test]
fn global_variable_writes_through_to_global_scope() {
    let mut env = Environment::new();
    env.push_scope();
    env.push_scope();
    env.define("$count", Value::Int(3)).unwrap();
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.lookup("$count"), Some(Value::Int(3)));
    assert_eq!(env.global().borrow().lookup("$count"), Some(Value::Int(3)));
}

#[test]
fn global_assign_updates_every_copy() {
    let mut env = Environment::new();
    env.push_scope();
    env.define("$g", Value::Int(1)).unwrap();
    env.assign("$g", Value::Int(2)).unwrap();
    assert_eq!(env.lookup("$g"), Some(Value::Int(2)));
    env.pop_scope();
    assert_eq!(env.lookup("$g"), Some(Value::Int(2)));
}

#[test]
fn unbound_global_reads_as_nil() {
    let env = Environment::new();
    assert_eq!(env.lookup("$missing"), Some(Value::Nil));
    assert_eq!(env.lookup("missing"), None);
}

#[test]
fn enclosed_frame_sees_closure_and_globals() {
    let mut env = Environment::new();
    env.define_global("clock", Value::Int(0));
    env.push_scope();
    env.define("captured", Value::Int(9)).unwrap();
    let closure = env.current_scope();
    env.pop_scope();

    let mut frame = env.enclosed(closure);
    frame.push_scope();
    assert_eq!(frame.lookup("captured"), Some(Value::Int(9)));
    assert_eq!(frame.lookup("clock"), Some(Value::Int(0)));
    assert!(frame.global().ptr_eq(env.global()));
}

#[test]
fn naming_rules() {
    assert!(is_constant_name("Foo"));
    assert!(!is_constant_name("foo"));
    assert!(!is_constant_name("$Foo"));
    assert!(!is_constant_name(""));
    assert!(is_global_name("$x"));
    assert!(!is_global_name("x"));
}
