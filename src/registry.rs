//! Named rule-tree storage.
//!
//! This module provides [`RuleRegistry`], a thread-safe store of named rule
//! trees. A transport layer registers its flattened rule trees once at
//! startup and validates incoming payloads by name from any number of
//! request-handling threads.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Violation;
use crate::rule::RuleTree;
use crate::validator::Validator;

/// A thread-safe registry of named rule trees.
///
/// Registration takes a write lock; lookups and validation take read locks
/// only, so concurrent validation never contends.
///
/// # Example
///
/// ```rust
/// use lockstep::{Rule, RuleRegistry, RuleTree};
/// use serde_json::json;
///
/// let registry = RuleRegistry::new();
/// registry
///     .register("user", RuleTree::new().field("name", Rule::string().required()))
///     .unwrap();
///
/// let violations = registry.validate("user", &json!({"name": "ada"})).unwrap();
/// assert!(violations.is_empty());
/// ```
#[derive(Clone)]
pub struct RuleRegistry {
    rules: Arc<RwLock<HashMap<String, Arc<RuleTree>>>>,
    validator: Validator,
}

impl RuleRegistry {
    /// Creates an empty registry with a default [`Validator`].
    pub fn new() -> Self {
        Self {
            rules: Arc::new(RwLock::new(HashMap::new())),
            validator: Validator::new(),
        }
    }

    /// Replaces the validator used for [`RuleRegistry::validate`].
    ///
    /// Use this to inject a custom reference predicate or depth bound.
    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    /// Registers a rule tree under a name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register(
        &self,
        name: impl Into<String>,
        rules: RuleTree,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        let mut store = self.rules.write();

        if store.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        store.insert(name, Arc::new(rules));
        Ok(())
    }

    /// Retrieves a rule tree by name.
    pub fn get(&self, name: &str) -> Option<Arc<RuleTree>> {
        self.rules.read().get(name).cloned()
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.rules.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Validates a payload against a named rule tree.
    ///
    /// An empty violation list means the payload conforms.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::RuleSetNotFound`] if the name is unknown.
    pub fn validate(&self, name: &str, payload: &Value) -> Result<Vec<Violation>, RegistryError> {
        let rules = self
            .get(name)
            .ok_or_else(|| RegistryError::RuleSetNotFound(name.to_string()))?;
        Ok(self.validator.validate(payload, &rules))
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a rule tree under a name that already exists.
    #[error("rule set '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate against a name that doesn't exist.
    #[error("rule set '{0}' not found")]
    RuleSetNotFound(String),
}
