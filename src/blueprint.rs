//! Blueprints: ready instances or zero-argument factories
//!
//! Either side of a composite may be supplied as an existing object or as
//! something that still has to be built. The caller decides which by
//! choosing the variant; nothing is inspected at runtime.

use std::any::type_name;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

use crate::errors::CompositeResult;
use crate::facet::{Facet, FacetRef};
use crate::object::Object;

/// Signature of a blueprint factory
pub type FactoryFn = dyn Fn() -> CompositeResult<FacetRef>;

/// An instance, or a recipe for one
#[derive(Clone)]
pub enum Blueprint {
    /// Already constructed; used as-is
    Instance(FacetRef),
    /// Built with no arguments right before composition
    Factory {
        /// Label used in logs and errors
        label: String,
        /// The zero-argument constructor
        build: Rc<FactoryFn>,
    },
}

impl Blueprint {
    /// Use an existing shared object
    pub fn instance<F: Facet + 'static>(facet: Rc<F>) -> Self {
        Blueprint::Instance(facet)
    }

    /// Build with a zero-argument closure
    ///
    /// Failures returned by the closure propagate unmodified out of
    /// `instantiate`.
    pub fn factory<F>(label: impl Into<String>, build: F) -> Self
    where
        F: Fn() -> CompositeResult<FacetRef> + 'static,
    {
        Blueprint::Factory {
            label: label.into(),
            build: Rc::new(build),
        }
    }

    /// Build a fresh `T` from its `Default`
    pub fn of<T: Facet + Default + 'static>() -> Self {
        Self::factory(short_type_name::<T>(), || Ok(Rc::new(T::default()) as FacetRef))
    }

    /// Check if this blueprint still needs construction
    pub fn is_factory(&self) -> bool {
        matches!(self, Blueprint::Factory { .. })
    }

    /// Label of the instance or factory
    pub fn label(&self) -> String {
        match self {
            Blueprint::Instance(facet) => facet.label(),
            Blueprint::Factory { label, .. } => label.clone(),
        }
    }

    /// Produce the instance, constructing it if necessary
    pub fn instantiate(self) -> CompositeResult<FacetRef> {
        match self {
            Blueprint::Instance(facet) => Ok(facet),
            Blueprint::Factory { label, build } => {
                debug!(blueprint = %label, "Instantiating blueprint");
                build()
            }
        }
    }
}

fn short_type_name<T>() -> String {
    type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
        .to_string()
}

impl fmt::Debug for Blueprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blueprint::Instance(facet) => f.debug_tuple("Instance").field(&facet.label()).finish(),
            Blueprint::Factory { label, .. } => f.debug_tuple("Factory").field(label).finish(),
        }
    }
}

impl From<FacetRef> for Blueprint {
    fn from(facet: FacetRef) -> Self {
        Blueprint::Instance(facet)
    }
}

impl From<Rc<Object>> for Blueprint {
    fn from(object: Rc<Object>) -> Self {
        Blueprint::Instance(object)
    }
}

impl From<Object> for Blueprint {
    fn from(object: Object) -> Self {
        Blueprint::Instance(Rc::new(object))
    }
}
