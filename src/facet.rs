//! The member-access interface shared by backing objects and composites
//!
//! Every object that can take part in a composition implements `Facet`:
//! an explicit get/set/has surface over named members. A composite is a
//! `Facet` too, which is what allows it to become the operator of a
//! further composite.

use std::rc::Rc;

use crate::errors::{CompositeError, CompositeResult};
use crate::member::Member;
use crate::value::Value;

/// Shared handle to a facet
///
/// Backing objects are shared, never copied: several composites may hold
/// the same operator or delegate and observe each other's mutations.
pub type FacetRef = Rc<dyn Facet>;

/// Named-member access to an object
pub trait Facet {
    /// Human-readable label used in logs and error messages
    fn label(&self) -> String;

    /// Whether a member with this name is present
    fn has(&self, name: &str) -> bool;

    /// Read a member
    ///
    /// Plain objects return `None` for absent names. Composites never do:
    /// unresolved names read as their fallback value.
    fn get(&self, name: &str) -> Option<Member>;

    /// Write a data member, returning whether the write was accepted
    ///
    /// A refused write is not an error.
    fn set(&self, name: &str, value: Value) -> bool;

    /// Names of the members currently present, in definition order
    fn member_names(&self) -> Vec<String>;
}

impl<'a> dyn Facet + 'a {
    /// Literal reading of a member
    ///
    /// Data reads as its value, a fallback as its literal, and methods or
    /// absent names as `Undefined`.
    pub fn value(&self, name: &str) -> Value {
        self.get(name).map(|member| member.to_literal()).unwrap_or_default()
    }

    /// Check whether `name` currently resolves to a method
    pub fn is_method(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Member::Method(_)))
    }

    /// Read a member and call it with this facet as the receiver
    pub fn call(&self, name: &str, args: Vec<Value>) -> CompositeResult<Value> {
        match self.get(name) {
            Some(Member::Method(method)) => method.call(self, args),
            Some(Member::Fallback(janus)) => Ok(janus.call()),
            Some(Member::Data(_)) => Err(CompositeError::NotCallable(name.to_string())),
            None => Err(CompositeError::MemberNotFound(name.to_string())),
        }
    }
}
