//! Per-field rule chains.
//!
//! A [`Field`] is an ordered list of [`Rule`]s plus an array-valued flag. The
//! builder methods mutate the field in place and hand it back, so a chain can
//! be configured from several call sites against the same field:
//!
//! ```rust
//! use fieldcheck::Schema;
//!
//! let mut schema = Schema::new();
//! schema.field("username").required().type_of("string");
//! schema.field("username").min_length(3).max_length(20);
//!
//! assert_eq!(schema.get_field("username").unwrap().rules().len(), 4);
//! ```

use regex::Regex;
use serde_json::Value;

use crate::rule::Rule;

/// A rule that failed for one value, with the array element it failed on.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleFailure<'a> {
    pub(crate) rule: &'a Rule,
    pub(crate) index: Option<usize>,
}

/// An ordered chain of rules for one record attribute.
///
/// Rules run in insertion order and never short-circuit: every failing rule
/// contributes its message.
#[derive(Debug, Clone, Default)]
pub struct Field {
    rules: Vec<Rule>,
    array: bool,
}

impl Field {
    /// Creates a field with an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a presence check.
    pub fn required(&mut self) -> &mut Self {
        self.push(Rule::Required)
    }

    /// Removes every presence check added so far.
    ///
    /// A later `required()` adds one back; optionality is whatever the chain
    /// holds when validation runs.
    pub fn optional(&mut self) -> &mut Self {
        self.rules.retain(|rule| !rule.is_required());
        self
    }

    /// Marks the field as array-valued.
    ///
    /// The chain is left untouched; an array value has every rule applied to
    /// each of its elements instead of to the array itself.
    pub fn array(&mut self) -> &mut Self {
        self.array = true;
        self
    }

    /// Appends a type check against `undefined`, `null`, `boolean`, `number`,
    /// `string`, `array` or `object`.
    pub fn type_of(&mut self, type_name: impl Into<String>) -> &mut Self {
        self.push(Rule::TypeOf(type_name.into()))
    }

    pub fn min_length(&mut self, min: usize) -> &mut Self {
        self.push(Rule::MinLength(min))
    }

    pub fn max_length(&mut self, max: usize) -> &mut Self {
        self.push(Rule::MaxLength(max))
    }

    /// Compiles `pattern` and appends a pattern check.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile; the chain is
    /// left unchanged.
    pub fn pattern(&mut self, pattern: &str) -> Result<&mut Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(self.push(Rule::Pattern(regex)))
    }

    /// Appends a pattern check with an already compiled regex.
    pub fn pattern_regex(&mut self, regex: Regex) -> &mut Self {
        self.push(Rule::Pattern(regex))
    }

    /// Appends a caller-defined check whose failure reports `message` verbatim.
    ///
    /// ```rust
    /// use fieldcheck::Field;
    /// use serde_json::json;
    ///
    /// let mut age = Field::new();
    /// age.custom(|v| v.as_i64().is_some_and(|n| n >= 18), "must be 18+");
    ///
    /// assert_eq!(age.validate(Some(&json!(15))), vec!["must be 18+"]);
    /// ```
    pub fn custom<F>(&mut self, predicate: F, message: impl Into<String>) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.push(Rule::custom(predicate, message))
    }

    /// Returns true when the chain holds no presence check.
    pub fn is_optional(&self) -> bool {
        !self.rules.iter().any(Rule::is_required)
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    /// The chain in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs the chain against `value` and returns every failure message.
    ///
    /// `None` stands for a missing value.
    pub fn validate(&self, value: Option<&Value>) -> Vec<String> {
        self.evaluate(value)
            .into_iter()
            .map(|failure| failure.rule.describe())
            .collect()
    }

    pub(crate) fn evaluate(&self, value: Option<&Value>) -> Vec<RuleFailure<'_>> {
        let mut failures = Vec::new();
        match value {
            Some(Value::Array(items)) if self.array => {
                for (index, item) in items.iter().enumerate() {
                    self.run_chain(Some(item), Some(index), &mut failures);
                }
            }
            _ => self.run_chain(value, None, &mut failures),
        }
        failures
    }

    fn run_chain<'a>(
        &'a self,
        value: Option<&Value>,
        index: Option<usize>,
        failures: &mut Vec<RuleFailure<'a>>,
    ) {
        for rule in &self.rules {
            if !rule.validate(value) {
                failures.push(RuleFailure { rule, index });
            }
        }
    }

    fn push(&mut self, rule: Rule) -> &mut Self {
        self.rules.push(rule);
        self
    }
}
