//! Registration form field set and record types.
//!
//! Defines the twelve fields the form renders, their input kinds and option
//! lists, the raw [`RegistrationDraft`] the form collects, and the normalized
//! [`RegistrationRecord`] produced once every field passes validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Field set
// ---------------------------------------------------------------------------

/// One field of the registration form, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    PhoneNumber,
    DateOfBirth,
    Gender,
    Address,
    Country,
    PostalCode,
    Occupation,
    Terms,
}

/// The HTML input kind used to render a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Date,
    Radio,
    TextArea,
    Select,
    Checkbox,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Date => "date",
            Self::Radio => "radio",
            Self::TextArea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
        }
    }

    /// Whether the input carries a string value (everything but checkboxes).
    pub fn is_textual(self) -> bool {
        !matches!(self, Self::Checkbox)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Field {
    /// Every field in declaration (rendering) order.
    pub const ALL: [Field; 12] = [
        Self::FullName,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::PhoneNumber,
        Self::DateOfBirth,
        Self::Gender,
        Self::Address,
        Self::Country,
        Self::PostalCode,
        Self::Occupation,
        Self::Terms,
    ];

    /// Wire name used by the rendered form and JSON payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
            Self::PhoneNumber => "phoneNumber",
            Self::DateOfBirth => "dateOfBirth",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::Country => "country",
            Self::PostalCode => "postalCode",
            Self::Occupation => "occupation",
            Self::Terms => "terms",
        }
    }

    /// Parse a wire name.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == name)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    /// Human-readable label shown beside the input.
    pub fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full Name",
            Self::Email => "Email Address",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm Password",
            Self::PhoneNumber => "Phone Number",
            Self::DateOfBirth => "Date of Birth",
            Self::Gender => "Gender",
            Self::Address => "Address",
            Self::Country => "Country",
            Self::PostalCode => "Postal Code",
            Self::Occupation => "Occupation",
            Self::Terms => "I agree to the terms and conditions",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Email => FieldKind::Email,
            Self::Password | Self::ConfirmPassword => FieldKind::Password,
            Self::DateOfBirth => FieldKind::Date,
            Self::Gender => FieldKind::Radio,
            Self::Address => FieldKind::TextArea,
            Self::Country => FieldKind::Select,
            Self::Terms => FieldKind::Checkbox,
            Self::FullName | Self::PhoneNumber | Self::PostalCode | Self::Occupation => {
                FieldKind::Text
            }
        }
    }

    /// Allowed values for radio and select fields; empty for free input.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Gender => Gender::OPTIONS,
            Self::Country => Country::OPTIONS,
            _ => &[],
        }
    }

    /// Fields whose rules read this field's value and must be re-checked
    /// when it changes.
    pub fn dependents(self) -> &'static [Field] {
        match self {
            Self::Password => &[Self::ConfirmPassword],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Option enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const OPTIONS: &'static [&'static str] = &["Male", "Female", "Other"];

    /// Parse a radio option value. Matching is exact.
    pub fn from_option(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Country {
    Nepal,
    #[serde(rename = "UK")]
    Uk,
    Canada,
    Australia,
    India,
}

impl Country {
    pub const OPTIONS: &'static [&'static str] = &["Nepal", "UK", "Canada", "Australia", "India"];

    /// Parse a select option value. The empty placeholder is not a country.
    pub fn from_option(s: &str) -> Option<Self> {
        match s {
            "Nepal" => Some(Self::Nepal),
            "UK" => Some(Self::Uk),
            "Canada" => Some(Self::Canada),
            "Australia" => Some(Self::Australia),
            "India" => Some(Self::India),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nepal => "Nepal",
            Self::Uk => "UK",
            Self::Canada => "Canada",
            Self::Australia => "Australia",
            Self::India => "India",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft (raw form values)
// ---------------------------------------------------------------------------

/// The candidate record exactly as entered. Empty strings mean "not filled".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationDraft {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: String,
    /// `YYYY-MM-DD`, as produced by a date input.
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub country: String,
    pub postal_code: String,
    pub occupation: String,
    pub terms: bool,
}

impl RegistrationDraft {
    /// Current string value of a textual field; `None` for the checkbox.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::PhoneNumber => &self.phone_number,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::Country => &self.country,
            Field::PostalCode => &self.postal_code,
            Field::Occupation => &self.occupation,
            Field::Terms => return None,
        };
        Some(value.as_str())
    }

    /// Current checked state of a checkbox field; `None` for textual fields.
    pub fn checked(&self, field: Field) -> Option<bool> {
        match field {
            Field::Terms => Some(self.terms),
            _ => None,
        }
    }

    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), CoreError> {
        let slot = match field {
            Field::FullName => &mut self.full_name,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::PhoneNumber => &mut self.phone_number,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Gender => &mut self.gender,
            Field::Address => &mut self.address,
            Field::Country => &mut self.country,
            Field::PostalCode => &mut self.postal_code,
            Field::Occupation => &mut self.occupation,
            Field::Terms => {
                return Err(CoreError::FieldKindMismatch {
                    field,
                    kind: field.kind(),
                    attempted: "text",
                })
            }
        };
        *slot = value.into();
        Ok(())
    }

    pub fn set_checked(&mut self, field: Field, checked: bool) -> Result<(), CoreError> {
        match field {
            Field::Terms => {
                self.terms = checked;
                Ok(())
            }
            _ => Err(CoreError::FieldKindMismatch {
                field,
                kind: field.kind(),
                attempted: "checkbox",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// A fully validated registration. `confirmPassword` is dropped once it has
/// matched, and the password is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub phone_number: String,
    pub date_of_birth: Date,
    pub gender: Gender,
    pub address: String,
    pub country: Country,
    pub postal_code: String,
    pub occupation: String,
    pub terms_accepted: bool,
}
