//! Named schema storage.
//!
//! [`SchemaRegistry`] lets a host build its schemas once, register them by
//! name, and validate records against them from any thread.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::report::ValidationReport;
use crate::schema::Schema;

type SchemaMap = Arc<RwLock<HashMap<String, Arc<Schema>>>>;

/// A thread-safe store of built schemas.
///
/// Registered schemas are frozen behind an `Arc`; validation takes only a
/// read lock long enough to clone that `Arc`. Clones of a registry share the
/// same store.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let mut user = Schema::new();
/// user.field("email").required().pattern(r"@").unwrap();
///
/// let registry = SchemaRegistry::new();
/// registry.register("User", user).unwrap();
///
/// let report = registry.validate("User", &json!({"email": "a@b.c"})).unwrap();
/// assert!(report.is_valid());
/// ```
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: SchemaMap,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `schema` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is taken.
    pub fn register(&self, name: impl Into<String>, schema: Schema) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        debug!(schema = %name, fields = schema.len(), "schema registered");
        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas.read().get(name).cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Validates `record` against the schema registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if no schema has that name.
    pub fn validate(&self, name: &str, record: &Value) -> Result<ValidationReport, RegistryError> {
        let schema = self
            .get(name)
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))?;
        Ok(schema.validate(record))
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
