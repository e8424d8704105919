use super::*;

fn native_zero(_: &[Value]) -> Result<Value, EvalErrorKind> {
    Ok(Value::Int(0))
}

#[test]
fn truthiness() {
    assert!(!Value::Nil.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Int(0).is_truthy());
    assert!(Value::Float(0.0).is_truthy());
    assert!(Value::string("").is_truthy());
    assert!(Value::list(vec![]).is_truthy());
}

#[test]
fn equality_promotes_numbers() {
    assert_eq!(Value::Int(3), Value::Float(3.0));
    assert_eq!(Value::Float(3.0), Value::Int(3));
    assert_ne!(Value::Int(3), Value::Float(3.5));
    assert_eq!(Value::Nil, Value::Nil);
    assert_ne!(Value::Nil, Value::Bool(false));
    assert_ne!(Value::Int(1), Value::string("1"));
}

#[test]
fn lists_compare_element_wise() {
    let a = Value::list(vec![Value::Int(1), Value::string("x")]);
    let b = Value::list(vec![Value::Float(1.0), Value::string("x")]);
    assert_eq!(a, b);
    assert_ne!(a, Value::list(vec![Value::Int(1)]));
}

#[test]
fn display_formats() {
    assert_eq!(Value::Nil.to_string(), "nil");
    assert_eq!(Value::Bool(true).to_string(), "true");
    assert_eq!(Value::Int(-4).to_string(), "-4");
    assert_eq!(Value::Float(3.0).to_string(), "3.0");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::string("hi").to_string(), "hi");
    assert_eq!(
        Value::list(vec![Value::Int(1), Value::Nil, Value::string("a")]).to_string(),
        r#"[1, nil, "a"]"#
    );
}

#[test]
fn native_display_and_identity() {
    let clock = Callable::Native(NativeFunction {
        name: "clock",
        arity: 0,
        func: native_zero,
    });
    assert_eq!(clock.to_string(), "<native fn clock>");
    assert_eq!(clock.arity(), 0);
    let value = Value::Callable(clock.clone());
    assert_eq!(value, Value::Callable(clock));
    assert_eq!(value.type_name(), "function");
}

#[test]
fn literal_conversion() {
    assert_eq!(Value::from(&Literal::Int(7)), Value::Int(7));
    assert_eq!(Value::from(&Literal::Nil), Value::Nil);
    assert_eq!(
        Value::from(&Literal::Str("s".to_owned())),
        Value::string("s")
    );
}
