//! Plain backing objects with named fields and methods

use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::CompositeResult;
use crate::facet::{Facet, FacetRef};
use crate::member::{Member, Method};
use crate::value::Value;

#[derive(Clone)]
enum Slot {
    Field(Value),
    Method(Method),
}

/// A dynamic object: ordered named slots holding data or methods
///
/// Objects are built with `with_field`/`with_method` and then shared. Slots
/// live behind a `RefCell`, so a shared object can still be written through
/// `Facet::set`; no borrow is held while one of its methods runs.
///
/// # Example
///
/// ```
/// use cim_composite::{Facet, Object, Value};
///
/// let greeter = Object::new("Greeter")
///     .with_field("name", "world")
///     .with_method("greet", |this, _args| {
///         Ok(Value::text(format!("hello {}", this.value("name"))))
///     });
///
/// let facet: &dyn Facet = &greeter;
/// assert_eq!(facet.call("greet", vec![]).unwrap(), Value::from("hello world"));
/// ```
pub struct Object {
    label: String,
    slots: RefCell<IndexMap<String, Slot>>,
}

impl Object {
    /// Create an empty object
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slots: RefCell::new(IndexMap::new()),
        }
    }

    /// Add a data field
    pub fn with_field(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.borrow_mut().insert(name.into(), Slot::Field(value.into()));
        self
    }

    /// Add a method
    pub fn with_method<F>(self, name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&dyn Facet, Vec<Value>) -> CompositeResult<Value> + 'static,
    {
        self.define_method(name, body);
        self
    }

    /// Add or replace a method on an object that may already be shared
    pub fn define_method<F>(&self, name: impl Into<String>, body: F)
    where
        F: Fn(&dyn Facet, Vec<Value>) -> CompositeResult<Value> + 'static,
    {
        let name = name.into();
        let method = Method::new(name.clone(), body);
        self.slots.borrow_mut().insert(name, Slot::Method(method));
    }

    /// Wrap in a shared handle
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    /// Wrap in a shared facet handle
    pub fn into_facet(self) -> FacetRef {
        Rc::new(self)
    }

    /// Read a data field directly
    pub fn field(&self, name: &str) -> Option<Value> {
        match self.slots.borrow().get(name) {
            Some(Slot::Field(value)) => Some(value.clone()),
            _ => None,
        }
    }

    /// Remove a member, returning whether it was present
    pub fn remove(&self, name: &str) -> bool {
        self.slots.borrow_mut().shift_remove(name).is_some()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new("Object")
    }
}

impl Facet for Object {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn has(&self, name: &str) -> bool {
        self.slots.borrow().contains_key(name)
    }

    fn get(&self, name: &str) -> Option<Member> {
        self.slots.borrow().get(name).map(|slot| match slot {
            Slot::Field(value) => Member::Data(value.clone()),
            Slot::Method(method) => Member::Method(method.clone()),
        })
    }

    fn set(&self, name: &str, value: Value) -> bool {
        self.slots.borrow_mut().insert(name.to_string(), Slot::Field(value));
        true
    }

    fn member_names(&self) -> Vec<String> {
        self.slots.borrow().keys().cloned().collect()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("label", &self.label)
            .field("members", &self.member_names())
            .finish()
    }
}
