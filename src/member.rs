//! Members: what a name resolves to on a backing object or a composite

use std::fmt;
use std::rc::Rc;

use crate::errors::CompositeResult;
use crate::facet::Facet;
use crate::value::Value;

/// Signature of a method body
///
/// The first parameter is the receiver (`this`). When a method is invoked
/// through a composite the receiver is the composite, so reads and writes
/// made through it follow the composite's resolution policy.
pub type MethodBody = dyn Fn(&dyn Facet, Vec<Value>) -> CompositeResult<Value>;

/// A named callable member
///
/// Clones share the same body; `Method::ptr_eq` tells whether two handles
/// are the same method.
#[derive(Clone)]
pub struct Method {
    name: Rc<str>,
    body: Rc<MethodBody>,
}

impl Method {
    /// Create a method from a closure
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&dyn Facet, Vec<Value>) -> CompositeResult<Value> + 'static,
    {
        Self {
            name: Rc::from(name.into()),
            body: Rc::new(body),
        }
    }

    /// Name the method was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke with an explicit receiver
    pub fn call(&self, this: &dyn Facet, args: Vec<Value>) -> CompositeResult<Value> {
        (self.body)(this, args)
    }

    /// Check whether two handles refer to the same method
    pub fn ptr_eq(a: &Method, b: &Method) -> bool {
        Rc::ptr_eq(&a.body, &b.body)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("name", &self.name).finish()
    }
}

/// Fallback value for members neither side defines
///
/// A Janus value faces both ways: calling it returns its literal, and
/// coercing it to a literal (`Display`, `Janus::literal`) yields the same
/// value. Probing for an optional capability therefore never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Janus {
    literal: Value,
}

impl Janus {
    /// Create a Janus value around a literal
    pub fn new(literal: impl Into<Value>) -> Self {
        Self {
            literal: literal.into(),
        }
    }

    /// Call it; arguments are ignored
    pub fn call(&self) -> Value {
        self.literal.clone()
    }

    /// The literal this value coerces to
    pub fn literal(&self) -> &Value {
        &self.literal
    }
}

impl Default for Janus {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Display for Janus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

/// A resolved member
#[derive(Debug, Clone)]
pub enum Member {
    /// Data field
    Data(Value),
    /// Callable method
    Method(Method),
    /// Nothing defines the name
    Fallback(Rc<Janus>),
}

impl Member {
    /// Check for a method
    pub fn is_method(&self) -> bool {
        matches!(self, Member::Method(_))
    }

    /// Check for the fallback value
    pub fn is_fallback(&self) -> bool {
        matches!(self, Member::Fallback(_))
    }

    /// Borrow the data value, if this is a data member
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Member::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the method, if this is a method
    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Member::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Literal reading of the member
    ///
    /// Methods have no literal form and read as `Undefined`.
    pub fn to_literal(&self) -> Value {
        match self {
            Member::Data(value) => value.clone(),
            Member::Method(_) => Value::Undefined,
            Member::Fallback(janus) => janus.literal().clone(),
        }
    }

    /// Check whether two members are the identical object
    ///
    /// Data members compare by value.
    pub fn same_as(&self, other: &Member) -> bool {
        match (self, other) {
            (Member::Data(a), Member::Data(b)) => a == b,
            (Member::Method(a), Member::Method(b)) => Method::ptr_eq(a, b),
            (Member::Fallback(a), Member::Fallback(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for Member {
    fn from(value: Value) -> Self {
        Member::Data(value)
    }
}

impl From<Method> for Member {
    fn from(method: Method) -> Self {
        Member::Method(method)
    }
}
