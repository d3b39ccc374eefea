// Copyright 2025 Cowboy AI, LLC.

//! Error types for composite operations

use thiserror::Error;

/// Errors that can occur while building or driving a composite
///
/// Rejected writes and unresolved reads are not errors: a refused write is
/// reported as `false` and an unknown member resolves to the fallback value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositeError {
    /// A factory blueprint failed to produce an instance
    #[error("Construction failed for {blueprint}: {reason}")]
    ConstructionFailed {
        /// Label of the blueprint being instantiated
        blueprint: String,
        /// Reason reported by the factory
        reason: String,
    },

    /// A method body reported a failure
    #[error("Method '{method}' failed: {reason}")]
    MethodFailed {
        /// Name of the failing method
        method: String,
        /// Reason reported by the method
        reason: String,
    },

    /// The member exists but is not a method
    #[error("Member is not callable: {0}")]
    NotCallable(String),

    /// The member does not exist on a plain object
    #[error("Member not found: {0}")]
    MemberNotFound(String),

    /// A call received arguments it cannot work with
    #[error("Invalid argument for '{method}': {reason}")]
    InvalidArgument {
        /// Name of the method receiving the argument
        method: String,
        /// What was wrong with it
        reason: String,
    },

    /// Conversion to or from JSON failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed or validated
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for composite operations
pub type CompositeResult<T> = Result<T, CompositeError>;

impl From<serde_json::Error> for CompositeError {
    fn from(err: serde_json::Error) -> Self {
        CompositeError::Serialization(err.to_string())
    }
}

impl CompositeError {
    /// Create a method failure
    pub fn method_failed(method: impl Into<String>, reason: impl Into<String>) -> Self {
        CompositeError::MethodFailed {
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Create a construction failure
    pub fn construction_failed(blueprint: impl Into<String>, reason: impl Into<String>) -> Self {
        CompositeError::ConstructionFailed {
            blueprint: blueprint.into(),
            reason: reason.into(),
        }
    }

    /// Check if this error was raised by a method body
    pub fn is_method_failure(&self) -> bool {
        matches!(self, CompositeError::MethodFailed { .. })
    }

    /// Check if this error was raised while instantiating a blueprint
    pub fn is_construction_failure(&self) -> bool {
        matches!(self, CompositeError::ConstructionFailed { .. })
    }

    /// Check if this error is a dispatch problem rather than a failure inside a method
    pub fn is_dispatch_error(&self) -> bool {
        matches!(
            self,
            CompositeError::NotCallable(_)
                | CompositeError::MemberNotFound(_)
                | CompositeError::InvalidArgument { .. }
        )
    }
}
