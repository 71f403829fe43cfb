//! # Fieldcheck
//!
//! Declarative record validation built from per-field rule chains. Every rule
//! in every chain runs, so one pass reports every violation instead of
//! stopping at the first.
//!
//! ## Overview
//!
//! - [`Rule`]: one check (presence, type, length bounds, pattern, custom predicate)
//! - [`Field`]: an ordered chain of rules, optionally applied per array element
//! - [`Schema`]: named fields and nested sub-schemas evaluated over a whole record
//! - [`ValidationReport`]: `{isValid, errors}` keyed by field name, plus located
//!   [`Violation`]s for programmatic use
//! - [`SchemaRegistry`]: a thread-safe store of named schemas
//!
//! ## Example
//!
//! ```rust
//! use fieldcheck::Schema;
//! use serde_json::json;
//!
//! let mut schema = Schema::new();
//! schema.field("name").required().type_of("string");
//! schema.field("tags").array().type_of("string");
//! schema.nested("address").field("city").required();
//!
//! let report = schema.validate(&json!({
//!     "name": 123,
//!     "tags": ["rust", 7],
//!     "address": {}
//! }));
//!
//! assert!(!report.is_valid());
//! assert_eq!(report.errors().len(), 3);
//!
//! // Located detail, including array elements and nested fields.
//! let paths: Vec<_> = report.violations().iter().map(|v| v.path.to_string()).collect();
//! assert_eq!(paths, vec!["name", "tags[1]", "address", "address.city"]);
//! ```

pub mod error;
pub mod field;
pub mod path;
pub mod registry;
pub mod report;
pub mod rule;
pub mod schema;
pub mod value;

pub use error::{Violation, Violations};
pub use field::Field;
pub use path::{JsonPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use report::{ValidationReport, NESTED_ERROR_CODE, NESTED_ERROR_MESSAGE};
pub use rule::{Predicate, Rule};
pub use schema::{Member, Schema};

/// Type alias for validation results carrying accumulated violations.
pub type ValidationResult<T> = stillwater::Validation<T, Violations>;
