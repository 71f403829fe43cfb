//! Record schemas.
//!
//! A [`Schema`] maps field names to either a [`Field`] rule chain or a nested
//! [`Schema`] for a sub-record, and validates whole records against them.
//!
//! # Example
//!
//! ```rust
//! use fieldcheck::Schema;
//! use serde_json::json;
//!
//! let mut schema = Schema::new();
//! schema.field("name").required().type_of("string");
//! schema
//!     .field("age")
//!     .required()
//!     .type_of("number")
//!     .custom(|v| v.as_f64().is_some_and(|n| n >= 18.0), "must be 18+");
//!
//! let report = schema.validate(&json!({"name": "John"}));
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.field_errors("age").unwrap(),
//!     &["The field is required.", "The field must be of type number."]
//! );
//! ```

use indexmap::IndexMap;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::field::Field;
use crate::report::ValidationReport;
use crate::ValidationResult;

/// What a schema holds under one field name.
#[derive(Debug, Clone)]
pub enum Member {
    Field(Field),
    Nested(Schema),
}

impl Member {
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Member::Field(field) => Some(field),
            Member::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&Schema> {
        match self {
            Member::Nested(schema) => Some(schema),
            Member::Field(_) => None,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Member::Field(_) => "field",
            Member::Nested(_) => "nested schema",
        }
    }
}

/// A validator for whole records.
///
/// Members are evaluated in registration order. Validation never mutates the
/// schema, so a built schema can be shared by reference across threads and
/// validated concurrently.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    members: IndexMap<String, Member>,
}

impl Schema {
    /// Creates a schema with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the field registered under `name`, creating an empty one on
    /// first use.
    ///
    /// Repeated calls with the same name return the same field. If `name`
    /// currently holds a nested schema, that schema is replaced by a fresh
    /// field at the same position.
    pub fn field(&mut self, name: impl Into<String>) -> &mut Field {
        let is_field = |member: &Member| matches!(member, Member::Field(_));
        match self.slot(name.into(), || Member::Field(Field::new()), is_field) {
            Member::Field(field) => field,
            Member::Nested(_) => unreachable!("slot was just set to a field"),
        }
    }

    /// Returns the nested schema registered under `name`, creating an empty
    /// one on first use.
    ///
    /// If `name` currently holds a field, that field is replaced by a fresh
    /// nested schema at the same position.
    ///
    /// ```rust
    /// use fieldcheck::Schema;
    /// use serde_json::json;
    ///
    /// let mut schema = Schema::new();
    /// schema.nested("address").field("city").required();
    ///
    /// let report = schema.validate(&json!({"address": {}}));
    /// assert_eq!(report.field_errors("address").unwrap(), &["Invalid nested object"]);
    /// ```
    pub fn nested(&mut self, name: impl Into<String>) -> &mut Schema {
        let is_nested = |member: &Member| matches!(member, Member::Nested(_));
        match self.slot(name.into(), || Member::Nested(Schema::new()), is_nested) {
            Member::Nested(schema) => schema,
            Member::Field(_) => unreachable!("slot was just set to a nested schema"),
        }
    }

    /// Registers an already built schema under `name`, replacing whatever the
    /// name held before.
    pub fn insert_nested(&mut self, name: impl Into<String>, schema: Schema) -> &mut Self {
        let name = name.into();
        if let Some(previous) = self.members.insert(name.clone(), Member::Nested(schema)) {
            trace!(field = %name, replaced = previous.kind(), "nested schema inserted");
        }
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.member(name).and_then(Member::as_field)
    }

    pub fn get_nested(&self, name: &str) -> Option<&Schema> {
        self.member(name).and_then(Member::as_nested)
    }

    /// Registered names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Validates `record` against every registered member.
    ///
    /// A missing key is skipped for a field with no presence check and for
    /// every nested schema. An explicit `null` is not missing. A record that
    /// is not a JSON object has no keys.
    pub fn validate(&self, record: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        for (name, member) in &self.members {
            let value = record.get(name.as_str());

            match member {
                Member::Nested(schema) => {
                    let Some(sub_record) = value else {
                        trace!(field = %name, "nested record absent, skipped");
                        continue;
                    };
                    let nested_report = schema.validate(sub_record);
                    if !nested_report.is_valid() {
                        report.record_nested(name, nested_report);
                    }
                }
                Member::Field(field) => {
                    if value.is_none() && field.is_optional() {
                        trace!(field = %name, "optional field absent, skipped");
                        continue;
                    }
                    let failures = field.evaluate(value);
                    trace!(field = %name, failures = failures.len(), "field evaluated");
                    if !failures.is_empty() {
                        report.record_field(name, failures);
                    }
                }
            }
        }

        debug!(
            members = self.members.len(),
            failed_fields = report.errors().len(),
            valid = report.is_valid(),
            "record validated"
        );
        report
    }

    /// Validates `record` and returns stillwater's accumulating result.
    pub fn check(&self, record: &Value) -> ValidationResult<()> {
        self.validate(record).into_validation()
    }

    /// Validates many records in parallel, returning reports in input order.
    pub fn validate_batch(&self, records: &[Value]) -> Vec<ValidationReport> {
        debug!(records = records.len(), "validating batch");
        records.par_iter().map(|record| self.validate(record)).collect()
    }

    fn slot(
        &mut self,
        name: String,
        make: impl Fn() -> Member,
        is_wanted: impl Fn(&Member) -> bool,
    ) -> &mut Member {
        let slot = self.members.entry(name.clone()).or_insert_with(&make);
        if !is_wanted(slot) {
            warn!(
                field = %name,
                replaced = slot.kind(),
                "member kind changed, previous configuration dropped"
            );
            *slot = make();
        }
        slot
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Schema>();
    assert_send_sync::<Field>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_is_created_once() {
        let mut schema = Schema::new();
        schema.field("name").required();
        schema.field("name").type_of("string");

        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get_field("name").unwrap().rules().len(), 2);
    }

    #[test]
    fn test_registration_order_is_kept() {
        let mut schema = Schema::new();
        schema.field("z");
        schema.nested("a");
        schema.field("m");
        schema.field("z").required();

        assert_eq!(schema.names().collect::<Vec<_>>(), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_kind_change_replaces_in_place() {
        let mut schema = Schema::new();
        schema.field("first");
        schema.field("addr").required();
        schema.field("last");

        schema.nested("addr").field("city").required();

        assert!(schema.get_field("addr").is_none());
        assert_eq!(schema.get_nested("addr").unwrap().len(), 1);
        assert_eq!(
            schema.names().collect::<Vec<_>>(),
            vec!["first", "addr", "last"]
        );

        schema.field("addr");
        assert!(schema.get_nested("addr").is_none());
        assert!(schema.get_field("addr").unwrap().rules().is_empty());
    }

    #[test]
    fn test_insert_nested_replaces_member() {
        let mut inner = Schema::new();
        inner.field("zip").required();

        let mut schema = Schema::new();
        schema.field("addr").required();
        schema.insert_nested("addr", inner);

        assert!(schema.get_nested("addr").is_some());
        assert!(schema.validate(&json!({"addr": {}})).field_errors("addr").is_some());
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        let schema = Schema::new();
        assert!(schema.is_empty());
        assert!(schema.validate(&json!({"x": 1})).is_valid());
        assert!(schema.validate(&json!(42)).is_valid());
    }

    #[test]
    fn test_optional_skip_applies_only_to_missing_keys() {
        let mut schema = Schema::new();
        schema.field("nick").optional().type_of("string");

        assert!(schema.validate(&json!({})).is_valid());
        assert_eq!(
            schema.validate(&json!({"nick": null})).field_errors("nick").unwrap(),
            &["The field must be of type string."]
        );
    }

    #[test]
    fn test_field_without_rules_is_skipped_when_absent() {
        let mut schema = Schema::new();
        schema.field("anything");
        assert!(schema.validate(&json!({})).is_valid());
    }

    #[test]
    fn test_non_object_record_has_no_keys() {
        let mut schema = Schema::new();
        schema.field("name").required();

        let report = schema.validate(&json!("not a record"));
        assert_eq!(
            report.field_errors("name").unwrap(),
            &["The field is required."]
        );
    }

    #[test]
    fn test_check_returns_validation() {
        let mut schema = Schema::new();
        schema.field("name").required();

        assert!(schema.check(&json!({"name": "Ann"})).is_success());
        let violations = schema.check(&json!({})).into_result().unwrap_err();
        assert_eq!(violations.first().path.to_string(), "name");
        assert_eq!(violations.first().code, "required");
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut schema = Schema::new();
        schema.field("id").required().type_of("number");

        let records = vec![json!({"id": 1}), json!({}), json!({"id": "x"})];
        let batch = schema.validate_batch(&records);
        let sequential: Vec<_> = records.iter().map(|r| schema.validate(r)).collect();

        assert_eq!(batch, sequential);
        assert_eq!(
            batch.iter().map(ValidationReport::is_valid).collect::<Vec<_>>(),
            vec![true, false, false]
        );
    }
}
