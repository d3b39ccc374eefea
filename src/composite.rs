// Copyright 2025 Cowboy AI, LLC.

//! Composites: one object merged from an operator and a delegate
//!
//! Reads resolve in a fixed order:
//!
//! 1. the reserved chaining member (`delegate` by default)
//! 2. a cascade, when both sides define the name as a method
//! 3. the operator's own member
//! 4. the delegate's own member
//! 5. the fallback value
//!
//! Writes land on the delegate unless the operator already has the name,
//! in which case they are refused without error.
//!
//! ```mermaid
//! graph LR
//!     C[Composite] -->|reads first| O[Operator]
//!     C -->|reads second, absorbs writes| D[Delegate]
//!     C -->|delegate next| C2[Composite]
//!     C2 -->|operator| C
//!     C2 -->|delegate| N[next]
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace};

use crate::blueprint::Blueprint;
use crate::config::{CascadePolicy, CompositeConfig};
use crate::errors::{CompositeError, CompositeResult};
use crate::facet::{Facet, FacetRef};
use crate::identifiers::CompositeId;
use crate::member::{Janus, Member, Method};
use crate::value::Value;

/// Which rule a member name resolves through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// The reserved chaining member
    Chain,
    /// A method defined on both sides
    Cascade,
    /// The operator's own member
    Operator,
    /// The delegate's own member
    Delegate,
    /// Defined on neither side
    Fallback,
}

/// Build a composite with the default configuration
///
/// ```
/// use cim_composite::{create_composite, Object, Value};
///
/// let operator = Object::new("Operator").with_field("foo", "hello");
/// let delegate = Object::new("Delegate").with_field("bar", "world");
///
/// let composite = create_composite(operator, delegate).unwrap();
/// assert_eq!(composite.value("foo"), Value::from("hello"));
/// assert_eq!(composite.value("bar"), Value::from("world"));
/// ```
pub fn create_composite(
    operator: impl Into<Blueprint>,
    delegate: impl Into<Blueprint>,
) -> CompositeResult<Composite> {
    Composite::new(operator, delegate)
}

/// An operator and a delegate presented as a single object
///
/// `Composite` is a cheap handle: clones share the same operator, delegate
/// and member cache, and keep the same identity. The composite does not own
/// any state of its own beyond that cache.
#[derive(Clone)]
pub struct Composite {
    inner: Rc<CompositeInner>,
}

struct CompositeInner {
    id: CompositeId,
    operator: FacetRef,
    delegate: FacetRef,
    config: CompositeConfig,
    cache: RefCell<HashMap<String, Member>>,
    fallback: OnceCell<Rc<Janus>>,
}

impl Composite {
    /// Build a composite with the default configuration
    pub fn new(operator: impl Into<Blueprint>, delegate: impl Into<Blueprint>) -> CompositeResult<Self> {
        Self::with_config(operator, delegate, CompositeConfig::default())
    }

    /// Build a composite with an explicit configuration
    ///
    /// Factory blueprints are instantiated operator first. A failing factory
    /// aborts construction with its own error.
    pub fn with_config(
        operator: impl Into<Blueprint>,
        delegate: impl Into<Blueprint>,
        config: CompositeConfig,
    ) -> CompositeResult<Self> {
        config.validate()?;
        let operator = operator.into().instantiate()?;
        let delegate = delegate.into().instantiate()?;
        Ok(Self::from_parts(operator, delegate, config))
    }

    fn from_parts(operator: FacetRef, delegate: FacetRef, config: CompositeConfig) -> Self {
        let id = CompositeId::new();
        debug!(
            composite_id = %id,
            operator = %operator.label(),
            delegate = %delegate.label(),
            cascade = ?config.cascade,
            "Created composite"
        );
        Self {
            inner: Rc::new(CompositeInner {
                id,
                operator,
                delegate,
                config,
                cache: RefCell::new(HashMap::new()),
                fallback: OnceCell::new(),
            }),
        }
    }

    /// Identity of this composite
    pub fn id(&self) -> CompositeId {
        self.inner.id
    }

    /// The operator backing this composite
    pub fn operator(&self) -> &FacetRef {
        &self.inner.operator
    }

    /// The delegate backing this composite
    pub fn backing_delegate(&self) -> &FacetRef {
        &self.inner.delegate
    }

    /// Configuration shared by this composite and its chained successors
    pub fn config(&self) -> &CompositeConfig {
        &self.inner.config
    }

    /// Check whether two handles refer to the same composite
    pub fn ptr_eq(a: &Composite, b: &Composite) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Address identifying this composite, for identity comparisons with
    /// other objects
    pub fn as_ptr(&self) -> *const () {
        Rc::as_ptr(&self.inner).cast()
    }

    /// Treat the composite as a constructor
    ///
    /// Nothing is rebuilt: the same composite comes back.
    pub fn construct(&self) -> Composite {
        trace!(composite_id = %self.inner.id, "Construction trapped");
        self.clone()
    }

    /// Chain a further delegate behind this composite
    ///
    /// The result is a new composite whose operator is `self` and whose
    /// delegate is `next`. Cascades in the new composite run through every
    /// earlier layer first, in the order the chain was built.
    pub fn delegate(&self, next: impl Into<Blueprint>) -> CompositeResult<Composite> {
        let next = next.into().instantiate()?;
        debug!(
            composite_id = %self.inner.id,
            next = %next.label(),
            "Chaining delegate"
        );
        let operator: FacetRef = Rc::new(self.clone());
        Ok(Self::from_parts(operator, next, self.inner.config.clone()))
    }

    /// Determine which rule `name` resolves through
    ///
    /// Does not populate this composite's cache. A nested operator
    /// composite is read like any other side, so it may cache a cascade
    /// wrapper of its own.
    pub fn resolution(&self, name: &str) -> Resolution {
        self.resolve(name).resolution()
    }

    /// Resolve a member
    ///
    /// Cascade wrappers and fallback values are created once per name and
    /// returned identically on later reads.
    pub fn member(&self, name: &str) -> Member {
        let resolved = self.resolve(name);
        trace!(
            composite_id = %self.inner.id,
            member = name,
            resolution = ?resolved.resolution(),
            "Resolved member"
        );

        match resolved {
            Resolved::Chain => Member::Method(self.chain_method()),
            Resolved::Cascade => Member::Method(self.cascade_method(name)),
            Resolved::Operator(member) | Resolved::Delegate(member) => member,
            Resolved::Fallback => Member::Fallback(self.fallback_value(name)),
        }
    }

    /// Literal reading of a member
    pub fn value(&self, name: &str) -> Value {
        self.member(name).to_literal()
    }

    /// Write through the composite
    ///
    /// Returns `false` when the operator already has `name` (or `name` is
    /// the reserved chaining member); neither side changes in that case.
    pub fn write(&self, name: &str, value: impl Into<Value>) -> bool {
        if name == self.inner.config.chain_member || self.inner.operator.has(name) {
            debug!(
                composite_id = %self.inner.id,
                member = name,
                "Refused write to operator member"
            );
            return false;
        }
        self.inner.delegate.set(name, value.into())
    }

    /// Read a member and call it with the composite as receiver
    pub fn invoke(&self, name: &str, args: Vec<Value>) -> CompositeResult<Value> {
        let this: &dyn Facet = self;
        this.call(name, args)
    }

    /// Number of cached cascade wrappers and fallback entries
    pub fn cached_members(&self) -> usize {
        self.inner.cache.borrow().len()
    }

    // Each side is read at most once: nested layers repeat this pass.
    fn resolve(&self, name: &str) -> Resolved {
        let CompositeInner {
            operator,
            delegate,
            config,
            ..
        } = &*self.inner;

        if name == config.chain_member {
            return Resolved::Chain;
        }

        match lookup(operator, name) {
            Some(Member::Method(method)) => match lookup(delegate, name) {
                Some(Member::Method(_)) => Resolved::Cascade,
                _ => Resolved::Operator(Member::Method(method)),
            },
            Some(member) => Resolved::Operator(member),
            None => match lookup(delegate, name) {
                Some(member) => Resolved::Delegate(member),
                None => Resolved::Fallback,
            },
        }
    }

    fn chain_method(&self) -> Method {
        let parent = self.clone();
        let name = self.inner.config.chain_member.clone();
        Method::new(name.clone(), move |_this, args| {
            let next = match args.into_iter().next() {
                Some(Value::Object(next)) => next,
                Some(other) => {
                    return Err(CompositeError::InvalidArgument {
                        method: name.clone(),
                        reason: format!("expected an object, got {other:?}"),
                    })
                }
                None => {
                    return Err(CompositeError::InvalidArgument {
                        method: name.clone(),
                        reason: "missing delegate object".to_string(),
                    })
                }
            };
            let chained = parent.delegate(Blueprint::Instance(next))?;
            Ok(Value::Object(Rc::new(chained)))
        })
    }

    fn cascade_method(&self, name: &str) -> Method {
        let mut cache = self.inner.cache.borrow_mut();
        if let Some(Member::Method(method)) = cache.get(name) {
            return method.clone();
        }

        let method = cascade(
            self.inner.config.cascade,
            name,
            self.inner.operator.clone(),
            self.inner.delegate.clone(),
        );
        debug!(
            composite_id = %self.inner.id,
            member = name,
            policy = ?self.inner.config.cascade,
            "Created cascade"
        );
        cache.insert(name.to_string(), Member::Method(method.clone()));
        method
    }

    fn fallback_value(&self, name: &str) -> Rc<Janus> {
        let janus = self
            .inner
            .fallback
            .get_or_init(|| Rc::new(Janus::new(self.inner.config.fallback_literal.clone())))
            .clone();

        let mut cache = self.inner.cache.borrow_mut();
        match cache.get(name) {
            Some(Member::Fallback(cached)) => cached.clone(),
            _ => {
                cache.insert(name.to_string(), Member::Fallback(janus.clone()));
                janus
            }
        }
    }
}

/// Outcome of a single resolution pass, carrying the member it read
enum Resolved {
    Chain,
    Cascade,
    Operator(Member),
    Delegate(Member),
    Fallback,
}

impl Resolved {
    fn resolution(&self) -> Resolution {
        match self {
            Resolved::Chain => Resolution::Chain,
            Resolved::Cascade => Resolution::Cascade,
            Resolved::Operator(_) => Resolution::Operator,
            Resolved::Delegate(_) => Resolution::Delegate,
            Resolved::Fallback => Resolution::Fallback,
        }
    }
}

// Presence is checked first so unresolved names never touch a nested
// composite's cache.
fn lookup(facet: &FacetRef, name: &str) -> Option<Member> {
    if facet.has(name) {
        facet.get(name)
    } else {
        None
    }
}

fn cascade(policy: CascadePolicy, name: &str, operator: FacetRef, delegate: FacetRef) -> Method {
    let member = name.to_string();
    Method::new(name, move |this, args| match policy {
        CascadePolicy::Pipeline => {
            let result = call_side(&operator, &member, this, args.clone())?;
            let args = if result.is_undefined() {
                args
            } else {
                result.into_args()
            };
            call_side(&delegate, &member, this, args)
        }
        CascadePolicy::FallbackOnly => {
            let result = call_side(&delegate, &member, this, args.clone())?;
            if result.is_blank() {
                call_side(&operator, &member, this, args)
            } else {
                Ok(result)
            }
        }
    })
}

// Looked up at call time: the sides may have changed since the cascade
// was cached.
fn call_side(side: &FacetRef, name: &str, this: &dyn Facet, args: Vec<Value>) -> CompositeResult<Value> {
    match side.get(name) {
        Some(Member::Method(method)) => method.call(this, args),
        _ => Err(CompositeError::NotCallable(format!("{}.{}", side.label(), name))),
    }
}

impl Facet for Composite {
    fn label(&self) -> String {
        format!("{}+{}", self.inner.operator.label(), self.inner.delegate.label())
    }

    fn has(&self, name: &str) -> bool {
        name == self.inner.config.chain_member
            || self.inner.operator.has(name)
            || self.inner.delegate.has(name)
    }

    fn get(&self, name: &str) -> Option<Member> {
        Some(self.member(name))
    }

    fn set(&self, name: &str, value: Value) -> bool {
        self.write(name, value)
    }

    fn member_names(&self) -> Vec<String> {
        let names: IndexSet<String> = self
            .inner
            .operator
            .member_names()
            .into_iter()
            .chain(self.inner.delegate.member_names())
            .collect();
        names.into_iter().collect()
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("id", &self.inner.id)
            .field("operator", &self.inner.operator.label())
            .field("delegate", &self.inner.delegate.label())
            .field("cached_members", &self.cached_members())
            .finish()
    }
}

/// A composite used as a blueprint is already built: it is never
/// instantiated again.
impl From<Composite> for Blueprint {
    fn from(composite: Composite) -> Self {
        Blueprint::Instance(Rc::new(composite))
    }
}

impl From<Composite> for Value {
    fn from(composite: Composite) -> Self {
        Value::Object(Rc::new(composite))
    }
}
