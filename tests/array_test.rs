//! Integration tests for array-valued fields.

use fieldcheck::{JsonPath, Schema};
use serde_json::json;

fn tags_schema() -> Schema {
    let mut schema = Schema::new();
    schema.field("tags").array().type_of("string");
    schema
}

#[test]
fn test_array_of_strings_is_valid() {
    let report = tags_schema().validate(&json!({"tags": ["ts", "js"]}));
    assert!(report.is_valid());
}

#[test]
fn test_single_bad_element_yields_single_error() {
    let report = tags_schema().validate(&json!({"tags": ["a", 1, "c"]}));

    assert!(!report.is_valid());
    assert_eq!(
        report.field_errors("tags").unwrap(),
        &["The field must be of type string."]
    );
    // The errors map is keyed by field; the element index lives in the path.
    assert_eq!(report.errors().keys().collect::<Vec<_>>(), vec!["tags"]);
    assert_eq!(
        report.violations()[0].path,
        JsonPath::from_field("tags").push_index(1)
    );
}

#[test]
fn test_every_element_and_rule_is_checked() {
    let mut schema = Schema::new();
    schema.field("codes").array().type_of("string").max_length(2);

    let report = schema.validate(&json!({"codes": ["abc", 7, "ok", "wxyz"]}));
    assert_eq!(
        report.field_errors("codes").unwrap(),
        &[
            "The field must have a maximum length of 2.",
            "The field must be of type string.",
            "The field must have a maximum length of 2.",
            "The field must have a maximum length of 2.",
        ]
    );

    let paths: Vec<_> = report.violations().iter().map(|v| v.path.to_string()).collect();
    assert_eq!(paths, vec!["codes[0]", "codes[1]", "codes[1]", "codes[3]"]);
}

#[test]
fn test_empty_array_has_no_elements_to_fail() {
    let mut schema = Schema::new();
    schema.field("tags").array().required().type_of("string");

    assert!(schema.validate(&json!({"tags": []})).is_valid());
}

#[test]
fn test_absent_array_field() {
    let mut optional = tags_schema();
    assert!(optional.validate(&json!({})).is_valid());

    optional.field("tags").required();
    assert_eq!(
        optional.validate(&json!({})).field_errors("tags").unwrap(),
        &["The field must be of type string.", "The field is required."]
    );
}

#[test]
fn test_array_field_given_a_scalar() {
    let report = tags_schema().validate(&json!({"tags": 5}));
    assert_eq!(
        report.field_errors("tags").unwrap(),
        &["The field must be of type string."]
    );
    assert_eq!(report.violations()[0].path.to_string(), "tags");
}

#[test]
fn test_without_array_flag_the_array_is_one_value() {
    let mut schema = Schema::new();
    schema.field("tags").type_of("string");

    let report = schema.validate(&json!({"tags": ["a", "b"]}));
    assert_eq!(
        report.field_errors("tags").unwrap(),
        &["The field must be of type string."]
    );

    let mut schema = Schema::new();
    schema.field("tags").type_of("array").min_length(1);
    assert!(schema.validate(&json!({"tags": ["a"]})).is_valid());
    assert!(!schema.validate(&json!({"tags": []})).is_valid());
}

#[test]
fn test_null_elements_skip_vacuous_rules() {
    let mut schema = Schema::new();
    schema.field("names").array().min_length(2).pattern(r"^[a-z]+$").unwrap();

    assert!(schema.validate(&json!({"names": ["ab", null, "cd"]})).is_valid());

    schema.field("names").required();
    assert_eq!(
        schema
            .validate(&json!({"names": ["ab", null]}))
            .field_errors("names")
            .unwrap(),
        &["The field is required."]
    );
}

#[test]
fn test_array_of_numbers_with_custom_rule() {
    let mut schema = Schema::new();
    schema
        .field("scores")
        .array()
        .type_of("number")
        .custom(|v| v.as_f64().is_some_and(|n| (0.0..=100.0).contains(&n)), "score out of range");

    let report = schema.validate(&json!({"scores": [10, 101, -1, 50]}));
    assert_eq!(
        report.field_errors("scores").unwrap(),
        &["score out of range", "score out of range"]
    );
    assert_eq!(report.violations()[0].code, "custom");
}
