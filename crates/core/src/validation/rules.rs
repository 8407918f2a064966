//! Field rule and result types.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::age::AgePolicy;
use crate::registration::Field;

/// The predicate a rule applies to one field's value.
#[derive(Debug, Clone)]
pub enum Check {
    /// The value is non-empty.
    Required,
    /// At least this many characters.
    MinLength(usize),
    /// At most this many characters.
    MaxLength(usize),
    /// The whole value matches the pattern.
    Pattern(&'static Regex),
    /// HTML5 email syntax.
    Email,
    /// Mixed-case letters, a digit, and a special character, with no
    /// characters outside that alphabet.
    PasswordStrength,
    /// Exact string equality with another field's current value.
    MatchesField(Field),
    /// Parses as a `YYYY-MM-DD` calendar date.
    ValidDate,
    /// The date lies at least `years` before the evaluation date.
    MinAge { years: u32, policy: AgePolicy },
    /// The value is one of the listed options.
    OneOf(&'static [&'static str]),
    /// The checkbox is checked.
    MustBeTrue,
}

impl Check {
    /// Stable rule name reported alongside a violation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::MinLength(_) => "min_length",
            Self::MaxLength(_) => "max_length",
            Self::Pattern(_) => "regex_pattern",
            Self::Email => "email",
            Self::PasswordStrength => "password_strength",
            Self::MatchesField(_) => "matches_field",
            Self::ValidDate => "valid_date",
            Self::MinAge { .. } => "min_age",
            Self::OneOf(_) => "enum_values",
            Self::MustBeTrue => "must_be_true",
        }
    }
}

/// A predicate plus the message shown when it fails.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub check: Check,
    pub message: String,
}

impl FieldRule {
    pub fn new(check: Check, message: impl Into<String>) -> Self {
        Self {
            check,
            message: message.into(),
        }
    }
}

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub rule_type: &'static str,
    pub message: String,
}

/// Aggregated result of evaluating every field of one record.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// At most one violation per field, in field order.
    pub errors: Vec<FieldViolation>,
}

impl ValidationResult {
    pub fn field_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .map(|v| (v.field, v.message.clone()))
            .collect()
    }
}

/// Field name to the message of the first failing rule, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl FromIterator<(Field, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (Field, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
