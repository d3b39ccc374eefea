use std::collections::BTreeMap;

use cim_composite::{create_composite, Facet, Object, Resolution, Value};
use proptest::prelude::*;

fn object_from(label: &str, fields: &BTreeMap<String, String>) -> std::rc::Rc<Object> {
    fields
        .iter()
        .fold(Object::new(label), |object, (name, value)| {
            object.with_field(name.clone(), value.as_str())
        })
        .shared()
}

fn member_name() -> impl Strategy<Value = String> {
    "[a-z]{1,8}".prop_filter("reserved name", |name| name != "delegate")
}

fn fields() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map(member_name(), "[a-zA-Z ]{0,12}", 0..8)
}

proptest! {
    #[test]
    fn disjoint_members_read_through(operator_fields in fields(), delegate_fields in fields()) {
        let delegate_fields: BTreeMap<_, _> = delegate_fields
            .into_iter()
            .filter(|(name, _)| !operator_fields.contains_key(name))
            .collect();
        let operator = object_from("O", &operator_fields);
        let delegate = object_from("D", &delegate_fields);
        let composite = create_composite(operator, delegate).unwrap();

        for (name, value) in &operator_fields {
            prop_assert_eq!(composite.value(name), Value::from(value.as_str()));
            prop_assert_eq!(composite.resolution(name), Resolution::Operator);
        }
        for (name, value) in &delegate_fields {
            prop_assert_eq!(composite.value(name), Value::from(value.as_str()));
            prop_assert_eq!(composite.resolution(name), Resolution::Delegate);
        }
    }

    #[test]
    fn operator_wins_overlapping_reads(name in member_name(), left in "[a-z]{0,6}", right in "[a-z]{0,6}") {
        let operator = Object::new("O").with_field(name.clone(), left.as_str());
        let delegate = Object::new("D").with_field(name.clone(), right.as_str());
        let composite = create_composite(operator, delegate).unwrap();

        prop_assert_eq!(composite.value(&name), Value::from(left.as_str()));
    }

    #[test]
    fn writes_respect_operator_ownership(
        operator_fields in fields(),
        name in member_name(),
        written in "[a-z]{1,6}",
    ) {
        let operator = object_from("O", &operator_fields);
        let delegate = Object::new("D").shared();
        let composite = create_composite(operator.clone(), delegate.clone()).unwrap();

        let accepted = composite.write(&name, written.as_str());

        if operator_fields.contains_key(&name) {
            prop_assert!(!accepted);
            prop_assert_eq!(operator.field(&name), Some(Value::from(operator_fields[&name].as_str())));
            prop_assert!(!delegate.has(&name));
        } else {
            prop_assert!(accepted);
            prop_assert_eq!(delegate.field(&name), Some(Value::from(written.as_str())));
            prop_assert!(!operator.has(&name));
        }
    }

    #[test]
    fn unknown_members_are_callable_empty(name in member_name()) {
        let composite = create_composite(Object::new("O"), Object::new("D")).unwrap();

        prop_assert!(composite.member(&name).is_fallback());
        prop_assert_eq!(composite.invoke(&name, vec![]).unwrap(), Value::from(""));
        prop_assert_eq!(composite.value(&name).to_string(), String::new());
    }

    #[test]
    fn cascade_pipes_operator_into_delegate(input in "[a-z]{0,8}", suffix in "[a-z]{1,4}") {
        let operator = Object::new("O").with_method("m", |_, args| {
            Ok(Value::text(format!("<{}>", args[0])))
        });
        let delegate_suffix = suffix.clone();
        let delegate = Object::new("D").with_method("m", move |_, args| {
            Ok(Value::text(format!("{}{}", args[0], delegate_suffix)))
        });
        let composite = create_composite(operator, delegate).unwrap();

        let result = composite.invoke("m", vec![Value::from(input.as_str())]).unwrap();
        prop_assert_eq!(result, Value::text(format!("<{input}>{suffix}")));
    }

    #[test]
    fn cached_members_are_stable(names in proptest::collection::vec(member_name(), 1..10)) {
        let composite = create_composite(Object::new("O"), Object::new("D")).unwrap();

        for name in &names {
            let first = composite.member(name);
            let second = composite.member(name);
            prop_assert!(first.same_as(&second));
        }
    }
}
