// Copyright 2025 Cowboy AI, LLC.

//! Composite configuration
//!
//! Configuration is plain data: it can be built in code, loaded from JSON,
//! and described by a JSON schema for tooling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{CompositeError, CompositeResult};

/// Default name of the reserved chaining member
pub const DEFAULT_CHAIN_MEMBER: &str = "delegate";

/// How a method defined on both sides is combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// Operator first; a defined result becomes the delegate's arguments,
    /// and the delegate's result is returned
    #[default]
    Pipeline,
    /// Delegate first; the operator only runs when the delegate's result
    /// is blank, and then its result is returned
    FallbackOnly,
}

/// Configuration for a composite and every composite chained from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CompositeConfig {
    /// Cascade policy for methods defined on both sides
    pub cascade: CascadePolicy,
    /// Reserved member name that produces a chained composite
    pub chain_member: String,
    /// Literal the fallback value returns and coerces to
    pub fallback_literal: String,
}

impl Default for CompositeConfig {
    fn default() -> Self {
        Self {
            cascade: CascadePolicy::Pipeline,
            chain_member: DEFAULT_CHAIN_MEMBER.to_string(),
            fallback_literal: String::new(),
        }
    }
}

impl CompositeConfig {
    /// Set the cascade policy
    pub fn with_cascade(mut self, cascade: CascadePolicy) -> Self {
        self.cascade = cascade;
        self
    }

    /// Set the reserved chaining member name
    pub fn with_chain_member(mut self, name: impl Into<String>) -> Self {
        self.chain_member = name.into();
        self
    }

    /// Set the fallback literal
    pub fn with_fallback_literal(mut self, literal: impl Into<String>) -> Self {
        self.fallback_literal = literal.into();
        self
    }

    /// Parse and validate from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CompositeResult<Self> {
        let config: CompositeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> CompositeResult<()> {
        if self.chain_member.trim().is_empty() {
            return Err(CompositeError::InvalidConfig(
                "chain_member must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// JSON schema describing the configuration
    pub fn json_schema() -> CompositeResult<serde_json::Value> {
        let schema = schemars::schema_for!(CompositeConfig);
        Ok(serde_json::to_value(schema)?)
    }
}
