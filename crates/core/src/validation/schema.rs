//! The declarative rule table for the registration form.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::{Check, FieldRule};
use crate::config::FormConfig;
use crate::registration::{Country, Field, Gender};

static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));
static PHONE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid regex"));
static POSTAL_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5,6}$").expect("valid regex"));

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const FULL_NAME_MIN_LENGTH: usize = 3;
pub const ADDRESS_MIN_LENGTH: usize = 10;
pub const OCCUPATION_MAX_LENGTH: usize = 50;

/// The ordered rule chain for one field.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub field: Field,
    pub rules: Vec<FieldRule>,
}

/// Per-field rule chains, one entry per form field.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Rule chain for `field`; empty when the field has no rules.
    pub fn rules_for(&self, field: Field) -> &[FieldRule] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.rules.as_slice())
            .unwrap_or(&[])
    }

    /// The registration form schema.
    pub fn registration(config: &FormConfig) -> Self {
        let chain = |field: Field, rules: Vec<FieldRule>| FieldSchema { field, rules };

        Self::new(vec![
            chain(
                Field::FullName,
                vec![
                    FieldRule::new(Check::Required, "Full Name is required"),
                    FieldRule::new(
                        Check::MinLength(FULL_NAME_MIN_LENGTH),
                        format!("Full Name must be at least {FULL_NAME_MIN_LENGTH} characters"),
                    ),
                    FieldRule::new(
                        Check::Pattern(&FULL_NAME_RE),
                        "Full Name should not contain numbers or special characters",
                    ),
                ],
            ),
            chain(
                Field::Email,
                vec![
                    FieldRule::new(Check::Required, "Email is Required"),
                    FieldRule::new(Check::Email, "Email is not valid"),
                ],
            ),
            chain(
                Field::Password,
                vec![
                    FieldRule::new(Check::Required, "Password is required"),
                    FieldRule::new(
                        Check::MinLength(PASSWORD_MIN_LENGTH),
                        format!("Password must be at least {PASSWORD_MIN_LENGTH} characters"),
                    ),
                    FieldRule::new(
                        Check::PasswordStrength,
                        "Password must contain at least one uppercase letter, one lowercase \
                         letter, one number, and one special character",
                    ),
                ],
            ),
            chain(
                Field::ConfirmPassword,
                vec![
                    FieldRule::new(Check::Required, "Confirm Password is required"),
                    FieldRule::new(Check::MatchesField(Field::Password), "Passwords must match"),
                ],
            ),
            chain(
                Field::PhoneNumber,
                vec![
                    FieldRule::new(Check::Required, "Phone Number is required"),
                    FieldRule::new(
                        Check::Pattern(&PHONE_NUMBER_RE),
                        "Phone Number must be exactly 10 digits",
                    ),
                ],
            ),
            chain(
                Field::DateOfBirth,
                vec![
                    FieldRule::new(Check::Required, "Date of Birth is Required"),
                    FieldRule::new(Check::ValidDate, "Date of Birth must be a valid date"),
                    FieldRule::new(
                        Check::MinAge {
                            years: config.min_age,
                            policy: config.age_policy,
                        },
                        format!("Must be at least {} years old", config.min_age),
                    ),
                ],
            ),
            chain(
                Field::Gender,
                vec![
                    FieldRule::new(Check::Required, "Gender is required"),
                    FieldRule::new(
                        Check::OneOf(Gender::OPTIONS),
                        format!("Gender must be one of: {}", Gender::OPTIONS.join(", ")),
                    ),
                ],
            ),
            chain(
                Field::Address,
                vec![
                    FieldRule::new(Check::Required, "Address is Required"),
                    FieldRule::new(
                        Check::MinLength(ADDRESS_MIN_LENGTH),
                        format!("Must be at least {ADDRESS_MIN_LENGTH} characters"),
                    ),
                ],
            ),
            chain(
                Field::Country,
                vec![
                    FieldRule::new(Check::Required, "Country is Required"),
                    FieldRule::new(
                        Check::OneOf(Country::OPTIONS),
                        format!("Country must be one of: {}", Country::OPTIONS.join(", ")),
                    ),
                ],
            ),
            chain(
                Field::PostalCode,
                vec![
                    FieldRule::new(Check::Required, "Postal Code is required"),
                    FieldRule::new(
                        Check::Pattern(&POSTAL_CODE_RE),
                        "Postal Code must be 5 or 6 digits",
                    ),
                ],
            ),
            chain(
                Field::Occupation,
                vec![
                    FieldRule::new(Check::Required, "Occupation is Required"),
                    FieldRule::new(
                        Check::MaxLength(OCCUPATION_MAX_LENGTH),
                        format!("Occupation must not exceed {OCCUPATION_MAX_LENGTH} characters"),
                    ),
                ],
            ),
            chain(
                Field::Terms,
                vec![FieldRule::new(
                    Check::MustBeTrue,
                    "You must agree to the terms and conditions",
                )],
            ),
        ])
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::registration(&FormConfig::default())
    }
}
