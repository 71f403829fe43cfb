//! The result of validating one record.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Violation, Violations};
use crate::field::RuleFailure;
use crate::path::JsonPath;
use crate::ValidationResult;

/// Message recorded for a field whose nested schema rejected its sub-record.
pub const NESTED_ERROR_MESSAGE: &str = "Invalid nested object";

/// Code attached to the nested-schema marker violation.
pub const NESTED_ERROR_CODE: &str = "nested";

/// Outcome of [`Schema::validate`](crate::Schema::validate).
///
/// `errors` maps each failing field to its messages in rule order. Fields
/// without failures are left out entirely, and the map iterates in the
/// schema's field-registration order.
///
/// A failing nested schema shows up in `errors` as the single
/// [`NESTED_ERROR_MESSAGE`]. Its full report stays reachable through
/// [`nested`](Self::nested), and its violations appear in
/// [`violations`](Self::violations) under the holding field's path.
///
/// The report serializes as `{"isValid": bool, "errors": {...}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: IndexMap<String, Vec<String>>,
    nested: IndexMap<String, ValidationReport>,
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// True iff no field produced a message.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &IndexMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages recorded for `field`, if it failed.
    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// The report of the nested schema registered under `field`, if it failed.
    pub fn nested(&self, field: &str) -> Option<&ValidationReport> {
        self.nested.get(field)
    }

    /// Every failure with its full path, in evaluation order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Total number of messages across all fields.
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Converts the report into stillwater's accumulating result type.
    pub fn into_validation(self) -> ValidationResult<()> {
        match Violations::collect_from(self.violations) {
            Some(violations) => Validation::Failure(violations),
            None => Validation::Success(()),
        }
    }

    /// Renders `{"isValid": bool, "errors": {field: [messages]}}`.
    pub fn to_json(&self) -> Value {
        let errors = self
            .errors
            .iter()
            .map(|(field, messages)| {
                let messages = messages.iter().cloned().map(Value::String).collect();
                (field.clone(), Value::Array(messages))
            })
            .collect();

        let mut report = serde_json::Map::new();
        report.insert("isValid".to_string(), Value::Bool(self.is_valid()));
        report.insert("errors".to_string(), Value::Object(errors));
        Value::Object(report)
    }

    pub(crate) fn record_field(&mut self, field: &str, failures: Vec<RuleFailure<'_>>) {
        let base = JsonPath::from_field(field);
        let mut messages = Vec::with_capacity(failures.len());

        for failure in failures {
            let message = failure.rule.describe();
            let path = match failure.index {
                Some(index) => base.push_index(index),
                None => base.clone(),
            };
            self.violations
                .push(Violation::new(path, message.clone()).with_code(failure.rule.code()));
            messages.push(message);
        }

        self.errors.insert(field.to_string(), messages);
    }

    pub(crate) fn record_nested(&mut self, field: &str, report: ValidationReport) {
        let base = JsonPath::from_field(field);

        self.violations.push(
            Violation::new(base.clone(), NESTED_ERROR_MESSAGE).with_code(NESTED_ERROR_CODE),
        );
        self.violations
            .extend(report.violations.iter().map(|v| v.under(&base)));
        self.errors
            .insert(field.to_string(), vec![NESTED_ERROR_MESSAGE.to_string()]);
        self.nested.insert(field.to_string(), report);
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
