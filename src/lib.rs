//! # CIM Composite
//!
//! Operator/delegate composition for the Composable Information Machine.
//!
//! A composite merges two independently written objects, an **operator**
//! and a **delegate**, into one object. Neither side knows about the other;
//! the composite routes every read, write and call by a fixed policy:
//!
//! - **Reads**: reserved chaining member, then a cascade when both sides
//!   define the name as a method, then the operator, then the delegate,
//!   then a fallback value.
//! - **Writes**: land on the delegate unless the operator already has the
//!   name; such writes are refused without error.
//! - **Cascades**: the operator's method runs first and its result (when it
//!   has one) becomes the delegate's arguments.
//! - **Chaining**: `composite.delegate(next)` layers a further delegate on
//!   top, with the existing composite as the new operator.
//!
//! ## Example
//!
//! ```
//! use cim_composite::{create_composite, Facet, Object, Value};
//!
//! let operator = Object::new("Greeting").with_method("a", |this, args| {
//!     this.set("data", Value::text(format!("hello {}", args[0])));
//!     Ok(Value::Undefined)
//! });
//! let delegate = Object::new("Suffix").with_method("a", |this, _args| {
//!     let data = this.value("data");
//!     this.set("data", Value::text(format!("{data} world")));
//!     Ok(Value::Undefined)
//! });
//!
//! let composite = create_composite(operator, delegate).unwrap();
//! composite.invoke("a", vec![Value::from("there")]).unwrap();
//! assert_eq!(composite.value("data"), Value::from("hello there world"));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Explicit interception**: member access goes through the `Facet`
//!    trait rather than reflection
//! 2. **Explicit construction**: `Blueprint` says whether a side is built or
//!    still needs building
//! 3. **Shared backing objects**: composites hold `Rc` handles and never copy
//!    operator or delegate state
//! 4. **Single-threaded**: composites are `!Send`; all calls are synchronous

#![warn(missing_docs)]

mod blueprint;
mod composite;
mod config;
mod errors;
mod facet;
mod identifiers;
mod member;
mod object;
mod value;

pub use blueprint::{Blueprint, FactoryFn};
pub use composite::{create_composite, Composite, Resolution};
pub use config::{CascadePolicy, CompositeConfig, DEFAULT_CHAIN_MEMBER};
pub use errors::{CompositeError, CompositeResult};
pub use facet::{Facet, FacetRef};
pub use identifiers::CompositeId;
pub use member::{Janus, Member, Method, MethodBody};
pub use object::Object;
pub use value::Value;
