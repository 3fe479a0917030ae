//! Structural validation on top of the `validator` crate.
//!
//! Records derive [`validator::Validate`]; [`validate`] runs the derived rules
//! and flattens the nested error tree into a sorted list of [`Violation`]s so
//! messages are stable across runs. The custom rules here (`lowercase`,
//! `one_of`, `not_null`) cover what the derive does not provide out of the box.

use std::fmt;

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::{Error, Result};

/// A single failed rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Violation {
    /// Field path, e.g. `sigma` or `actions[0].action`.
    pub field: String,
    /// Rule code, e.g. `required`, `range`, `length`, `lowercase`, `oneof`.
    pub rule: String,
}

/// All rule violations found on one record, sorted by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// A single violation.
    pub fn single(field: impl Into<String>, rule: impl Into<String>) -> Self {
        Self(vec![Violation {
            field: field.into(),
            rule: rule.into(),
        }])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` failed `rule`.
    pub fn contains(&self, field: &str, rule: &str) -> bool {
        self.0.iter().any(|v| v.field == field && v.rule == rule)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("field {} is not valid ({})", v.field, v.rule))
            .collect();
        f.write_str(&messages.join(", "))
    }
}

impl From<ValidationErrors> for Violations {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Vec::new();
        flatten(&errors, None, &mut out);
        out.sort();
        Self(out)
    }
}

fn flatten(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<Violation>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| Violation {
                    field: path.clone(),
                    rule: e.code.to_string(),
                }));
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

/// Run the derived rules of `value`.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every violated rule.
pub fn validate<T: Validate>(value: &T) -> Result<()> {
    value.validate().map_err(Error::from)
}

/// Rule `lowercase`: the string equals its own lowercase form.
pub fn lowercase(value: &str) -> std::result::Result<(), ValidationError> {
    if value == value.to_lowercase() {
        Ok(())
    } else {
        Err(ValidationError::new("lowercase"))
    }
}

/// Rule `oneof`: the string is a member of `allowed`.
pub fn one_of(value: &str, allowed: &[&str]) -> std::result::Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("oneof"))
    }
}

/// Rule `required` for untyped JSON: the value is present and not `null`.
pub fn not_null(value: &serde_json::Value) -> std::result::Result<(), ValidationError> {
    if value.is_null() {
        Err(ValidationError::new("required"))
    } else {
        Ok(())
    }
}
