// Copyright (c) 2025 - Cowboy AI, LLC.

use std::rc::Rc;

use cim_composite::{
    create_composite, Blueprint, Composite, CompositeError, Facet, FacetRef, Object, Resolution,
    Value,
};
use pretty_assertions::assert_eq;

fn greeter() -> FacetRef {
    Object::new("A").with_field("foo", "Hello ").into_facet()
}

#[test]
fn simple_composite_reads_both_sides() {
    let a = Object::new("a").with_field("foo", "hello").shared();
    let b = Object::new("b").with_field("bar", "world").shared();

    let composite = create_composite(a.clone(), b).unwrap();

    assert!(!std::ptr::addr_eq(composite.as_ptr(), Rc::as_ptr(&a)));
    assert_eq!(composite.value("foo"), Value::from("hello"));
    assert_eq!(composite.value("bar"), Value::from("world"));
}

#[test]
fn operator_members_are_write_protected() {
    let a = Object::new("a").with_field("foo", "hello").shared();
    let b = Object::new("b").with_field("bar", "world").shared();
    let composite = create_composite(a.clone(), b.clone()).unwrap();

    assert!(!composite.write("foo", "Hello"));
    assert!(composite.write("bar", "World"));

    assert_eq!(composite.value("foo"), Value::from("hello"));
    assert_eq!(composite.value("bar"), Value::from("World"));
    assert_eq!(a.field("foo"), Some(Value::from("hello")));
    assert!(!b.has("foo"));
}

#[test]
fn factory_operator_is_instantiated() {
    let b = Object::new("b").with_field("bar", "World");
    let composite = create_composite(Blueprint::factory("A", || Ok(greeter())), b).unwrap();

    assert_eq!(composite.value("foo"), Value::from("Hello "));
    assert_eq!(composite.value("bar"), Value::from("World"));
}

#[test]
fn factory_delegate_is_instantiated() {
    let b = Object::new("b").with_field("bar", "World");
    let composite = create_composite(b, Blueprint::factory("A", || Ok(greeter()))).unwrap();

    assert_eq!(composite.value("foo"), Value::from("Hello "));
    assert_eq!(composite.value("bar"), Value::from("World"));
}

/// A writes `data`, B appends to it; both see the composite as `this`
#[test]
fn function_cascade_shares_receiver() {
    let a = Object::new("A").with_method("a", |this, _| {
        this.set("data", Value::from("Hello "));
        Ok(Value::Undefined)
    });
    let b = Object::new("B").with_method("a", |this, _| {
        let data = this.value("data");
        this.set("data", Value::text(format!("{data}World")));
        Ok(Value::Undefined)
    });

    let composite = create_composite(a, b).unwrap();
    composite.invoke("a", vec![]).unwrap();

    assert_eq!(composite.value("data"), Value::from("Hello World"));
}

#[test]
fn hello_world_literal_scenario() {
    let operator = Object::new("O").with_method("a", |this, args| {
        this.set("data", Value::text(format!("hello {}", args[0])));
        Ok(Value::Undefined)
    });
    let delegate = Object::new("D").with_method("a", |this, _| {
        let data = this.value("data");
        this.set("data", Value::text(format!("{data}world")));
        Ok(Value::Undefined)
    });

    let composite = create_composite(operator, delegate).unwrap();
    composite.invoke("a", vec![Value::from("x")]).unwrap();

    // the delegate ignores its argument and appends to what the operator wrote
    assert_eq!(composite.value("data"), Value::from("hello xworld"));
}

fn single() -> Rc<Object> {
    Object::new("Single")
        .with_method("a", |this, args| {
            this.set("data", Value::text(format!("hello {}", args[0])));
            Ok(Value::Undefined)
        })
        .shared()
}

#[test]
fn shared_operator_keeps_delegates_independent() {
    let base = single();
    let d1 = create_composite(base.clone(), Object::new("d1")).unwrap();
    let d2 = create_composite(base.clone(), Object::new("d2")).unwrap();

    d1.invoke("a", vec![Value::from("world")]).unwrap();
    d2.invoke("a", vec![Value::from("mars")]).unwrap();

    assert_eq!(d1.value("data"), Value::from("hello world"));
    assert_eq!(d2.value("data"), Value::from("hello mars"));
    assert!(!base.has("data"));
}

#[test]
fn shared_delegate_observes_method_writes() {
    let base = single();
    let data = Object::new("data").shared();
    let d1 = create_composite(base, data.clone()).unwrap();

    d1.invoke("a", vec![Value::from("world")]).unwrap();

    assert_eq!(d1.value("data"), Value::from("hello world"));
    assert_eq!(data.field("data"), Some(Value::from("hello world")));
}

#[test]
fn shared_operator_changes_are_visible() {
    let base = single();
    let data = Object::new("data").shared();
    let d1 = create_composite(base.clone(), data.clone()).unwrap();

    base.set("hello", Value::from("foo"));
    d1.invoke("a", vec![Value::from("world")]).unwrap();

    assert_eq!(d1.value("data"), Value::from("hello world"));
    assert_eq!(data.field("data"), Some(Value::from("hello world")));
    assert_eq!(d1.value("hello"), Value::from("foo"));
}

#[test]
fn pipelining_cascade_forwards_operator_result() {
    let a = Object::new("A").with_method("a", |_, _| Ok(Value::from("Hello ")));
    let b = Object::new("B").with_method("a", |_, args| Ok(Value::text(format!("{}World", args[0]))));

    let composite = create_composite(a, b).unwrap();

    assert_eq!(composite.invoke("a", vec![]).unwrap(), Value::from("Hello World"));
}

#[test]
fn pipelining_cascade_spreads_list_results() {
    let a = Object::new("A").with_method("sum", |_, args| {
        Ok(Value::List(args.into_iter().rev().collect()))
    });
    let b = Object::new("B").with_method("sum", |_, args| {
        Ok(Value::text(args.iter().map(Value::to_string).collect::<Vec<_>>().join("-")))
    });

    let composite = create_composite(a, b).unwrap();
    let result = composite
        .invoke("sum", vec![Value::from(1), Value::from(2), Value::from(3)])
        .unwrap();

    assert_eq!(result, Value::from("3-2-1"));
}

#[test]
fn undefined_operator_result_keeps_original_arguments() {
    let a = Object::new("A").with_method("a", |this, args| {
        this.set("alpha", args[0].clone());
        Ok(Value::Undefined)
    });
    let b = Object::new("B").with_method("a", |this, args| {
        this.set("beta", args[0].clone());
        Ok(Value::Undefined)
    });

    let composite = create_composite(a, b).unwrap();
    composite.invoke("a", vec![Value::from("hello")]).unwrap();

    assert_eq!(composite.value("alpha"), Value::from("hello"));
    assert_eq!(composite.value("beta"), composite.value("alpha"));
}

#[test]
fn null_operator_result_is_forwarded() {
    let a = Object::new("A").with_method("a", |_, _| Ok(Value::Null));
    let b = Object::new("B").with_method("a", |_, args| Ok(Value::from(args.len() as i64)));

    let composite = create_composite(a, b).unwrap();
    let result = composite
        .invoke("a", vec![Value::from(1), Value::from(2)])
        .unwrap();

    assert_eq!(result, Value::from(1));
}

#[test]
fn unknown_members_fall_back() {
    let composite = create_composite(Object::new("O"), Object::new("D")).unwrap();

    assert_eq!(composite.resolution("z"), Resolution::Fallback);
    assert_eq!(composite.invoke("z", vec![]).unwrap(), Value::from(""));
    assert_eq!(composite.value("z").to_string(), "");
    assert_eq!(format!("{}!", composite.value("z")), "!");
}

#[test]
fn construction_trap_returns_composite() {
    let composite = create_composite(Object::new("O"), Object::new("D")).unwrap();
    let again = composite.construct();

    assert!(Composite::ptr_eq(&composite, &again));
}

#[test]
fn delegate_construction_error_is_untouched() {
    let err = create_composite(
        Object::new("O"),
        Blueprint::factory("NeedsArgs", || {
            Err(CompositeError::construction_failed("NeedsArgs", "argument required"))
        }),
    )
    .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Construction failed for NeedsArgs: argument required"
    );
}
