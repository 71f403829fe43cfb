//! The rule taxonomy.
//!
//! A [`Rule`] is a single immutable check with a fixed failure message. Rules
//! are pure: [`Rule::validate`] depends only on the input and the rule's own
//! parameters, so a rule can be evaluated from any number of threads at once.
//!
//! Only [`Rule::Required`] fails on absence. [`Rule::TypeOf`] compares the
//! runtime type tag of whatever it is given, including `undefined` for a
//! missing value. Every other rule passes vacuously on a missing value or an
//! explicit null.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use crate::value::{is_absent, length, stringify, type_tag};

/// A caller-supplied predicate for [`Rule::Custom`].
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A single validation check.
///
/// # Example
///
/// ```rust
/// use fieldcheck::Rule;
/// use serde_json::json;
///
/// let rule = Rule::MinLength(3);
/// assert!(rule.validate(Some(&json!("abc"))));
/// assert!(!rule.validate(Some(&json!("ab"))));
/// // Absence is the required rule's job.
/// assert!(rule.validate(None));
/// assert_eq!(rule.describe(), "The field must have a minimum length of 3.");
/// ```
#[derive(Clone)]
pub enum Rule {
    /// The value must be present, non-null and not blank once stringified.
    Required,
    /// The value's type tag must equal the named type.
    TypeOf(String),
    /// The value must have at least this many chars or elements.
    MinLength(usize),
    /// The value must have at most this many chars or elements.
    MaxLength(usize),
    /// The stringified value must match the pattern.
    Pattern(Regex),
    /// The predicate must accept the value.
    Custom {
        predicate: Predicate,
        message: String,
    },
}

impl Rule {
    /// Builds a custom rule from a closure and its failure message.
    pub fn custom<F>(predicate: F, message: impl Into<String>) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Rule::Custom {
            predicate: Arc::new(predicate),
            message: message.into(),
        }
    }

    /// Returns true when `value` passes this rule.
    pub fn validate(&self, value: Option<&Value>) -> bool {
        match self {
            Rule::Required => match value {
                Some(v) if !v.is_null() => !stringify(v).trim().is_empty(),
                _ => false,
            },
            Rule::TypeOf(expected) => type_tag(value) == expected.as_str(),
            _ if is_absent(value) => true,
            Rule::MinLength(min) => value
                .and_then(length)
                .is_some_and(|len| len >= *min),
            Rule::MaxLength(max) => value
                .and_then(length)
                .is_some_and(|len| len <= *max),
            Rule::Pattern(regex) => value.is_some_and(|v| regex.is_match(&stringify(v))),
            Rule::Custom { predicate, .. } => value.is_some_and(|v| predicate(v)),
        }
    }

    /// Returns the human-readable failure message.
    pub fn describe(&self) -> String {
        match self {
            Rule::Required => "The field is required.".to_string(),
            Rule::TypeOf(expected) => format!("The field must be of type {}.", expected),
            Rule::MinLength(min) => {
                format!("The field must have a minimum length of {}.", min)
            }
            Rule::MaxLength(max) => {
                format!("The field must have a maximum length of {}.", max)
            }
            Rule::Pattern(_) => "The field does not match the required pattern.".to_string(),
            Rule::Custom { message, .. } => message.clone(),
        }
    }

    /// Returns the machine-readable code attached to violations of this rule.
    pub fn code(&self) -> &'static str {
        match self {
            Rule::Required => "required",
            Rule::TypeOf(_) => "invalid_type",
            Rule::MinLength(_) => "min_length",
            Rule::MaxLength(_) => "max_length",
            Rule::Pattern(_) => "pattern",
            Rule::Custom { .. } => "custom",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Rule::Required)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => f.write_str("Required"),
            Rule::TypeOf(expected) => f.debug_tuple("TypeOf").field(expected).finish(),
            Rule::MinLength(min) => f.debug_tuple("MinLength").field(min).finish(),
            Rule::MaxLength(max) => f.debug_tuple("MaxLength").field(max).finish(),
            Rule::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Rule::Custom { message, .. } => f
                .debug_struct("Custom")
                .field("message", message)
                .finish_non_exhaustive(),
        }
    }
}
