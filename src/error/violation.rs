//! Located validation failures.

use std::fmt::{self, Display};

use serde::Serialize;
use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single failed check, located by path.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{JsonPath, Violation};
///
/// let violation = Violation::new(
///     JsonPath::from_field("tags").push_index(1),
///     "The field must be of type string.",
/// )
/// .with_code("invalid_type");
///
/// assert_eq!(violation.to_string(), "tags[1]: The field must be of type string.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Where the failing value sits in the record.
    pub path: JsonPath,
    /// The rule's human-readable message.
    pub message: String,
    /// Machine-readable code of the failed rule (e.g. `min_length`).
    pub code: String,
}

impl Violation {
    /// Creates a violation with the generic `validation_error` code.
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "validation_error".to_string(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Returns a copy re-rooted under `prefix`.
    pub fn under(&self, prefix: &JsonPath) -> Self {
        Self {
            path: prefix.join(&self.path),
            message: self.message.clone(),
            code: self.code.clone(),
        }
    }
}

impl Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

impl std::error::Error for Violation {}

impl Serialize for Violation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Violation", 3)?;
        state.serialize_field("path", &self.path.to_string())?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("code", &self.code)?;
        state.end()
    }
}

/// A non-empty collection of violations.
///
/// This is the failure side of [`ValidationResult`](crate::ValidationResult).
/// Collections from independent checks combine through [`Semigroup`]:
///
/// ```rust
/// use fieldcheck::{JsonPath, Violation, Violations};
/// use stillwater::prelude::*;
///
/// let name = Violations::single(Violation::new(JsonPath::from_field("name"), "required"));
/// let age = Violations::single(Violation::new(JsonPath::from_field("age"), "too young"));
///
/// assert_eq!(name.combine(age).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Violations(NonEmptyVec<Violation>);

impl Violations {
    pub fn single(violation: Violation) -> Self {
        Self(NonEmptyVec::singleton(violation))
    }

    /// Collects violations, returning `None` for an empty iterator.
    pub fn collect_from<I>(violations: I) -> Option<Self>
    where
        I: IntoIterator<Item = Violation>,
    {
        let mut iter = violations.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::single(first), |acc, v| acc.combine(Self::single(v))))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn first(&self) -> &Violation {
        self.0.head()
    }

    /// Returns the violations located exactly at `path`.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&Violation> {
        self.0.iter().filter(|v| &v.path == path).collect()
    }

    /// Returns the violations reported under top-level field `name`,
    /// including element and nested locations below it.
    pub fn for_field(&self, name: &str) -> Vec<&Violation> {
        self.0
            .iter()
            .filter(|v| v.path.field_name() == Some(name))
            .collect()
    }

    pub fn with_code(&self, code: &str) -> Vec<&Violation> {
        self.0.iter().filter(|v| v.code == code).collect()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0.into_vec()
    }
}

impl Semigroup for Violations {
    fn combine(self, other: Self) -> Self {
        Violations(self.0.combine(other.0))
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} violation(s):", self.len())?;
        for (i, violation) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, violation)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Violation>();
    assert_send_sync::<Violations>();
};
