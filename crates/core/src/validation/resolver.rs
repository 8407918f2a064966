//! Adapts a [`Schema`] to the form controller's validation hook.

use super::evaluator::{evaluate_field, evaluate_rules, parse_date};
use super::rules::{FieldErrors, FieldViolation};
use super::schema::Schema;
use crate::config::FormConfig;
use crate::registration::{Country, Field, Gender, RegistrationDraft, RegistrationRecord};
use crate::types::Date;

/// Source of the evaluation date for age rules.
pub trait Clock {
    fn today(&self) -> Date;
}

/// The local calendar date of the machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Date {
        chrono::Local::now().date_naive()
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

/// Outcome of resolving a whole draft.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Valid(RegistrationRecord),
    Invalid(FieldErrors),
}

impl Resolution {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Field errors; empty when valid.
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid(_) => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }

    pub fn into_result(self) -> Result<RegistrationRecord, FieldErrors> {
        match self {
            Self::Valid(record) => Ok(record),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// Validation hook consumed by the form controller.
pub trait Resolver {
    /// Validate every field and, when all pass, produce the normalized record.
    fn resolve(&self, draft: &RegistrationDraft) -> Resolution;

    /// Validate a single field against the current draft.
    fn resolve_field(&self, draft: &RegistrationDraft, field: Field) -> Option<FieldViolation>;
}

/// A [`Resolver`] backed by a declarative [`Schema`].
#[derive(Debug, Clone)]
pub struct SchemaResolver<C = SystemClock> {
    schema: Schema,
    clock: C,
}

impl SchemaResolver<SystemClock> {
    /// The registration schema for `config`, evaluated against the system date.
    pub fn new(config: &FormConfig) -> Self {
        Self::with_clock(Schema::registration(config), SystemClock)
    }
}

impl<C: Clock> SchemaResolver<C> {
    pub fn with_clock(schema: Schema, clock: C) -> Self {
        Self { schema, clock }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl<C: Clock> Resolver for SchemaResolver<C> {
    fn resolve(&self, draft: &RegistrationDraft) -> Resolution {
        let result = evaluate_rules(&self.schema, draft, self.clock.today());
        if !result.is_valid {
            return Resolution::Invalid(result.field_errors());
        }
        match normalize(draft) {
            Ok(record) => Resolution::Valid(record),
            Err(errors) => Resolution::Invalid(errors),
        }
    }

    fn resolve_field(&self, draft: &RegistrationDraft, field: Field) -> Option<FieldViolation> {
        evaluate_field(&self.schema, field, draft, self.clock.today())
    }
}

/// Build the typed record from a draft whose rules have passed.
///
/// A schema without the date or choice rules can let unparsable values
/// through; those fields are reported instead of panicking.
fn normalize(draft: &RegistrationDraft) -> Result<RegistrationRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let date_of_birth = parse_date(&draft.date_of_birth);
    if date_of_birth.is_none() {
        errors.insert(Field::DateOfBirth, "Date of Birth must be a valid date");
    }
    let gender = Gender::from_option(&draft.gender);
    if gender.is_none() {
        errors.insert(
            Field::Gender,
            format!("Gender must be one of: {}", Gender::OPTIONS.join(", ")),
        );
    }
    let country = Country::from_option(&draft.country);
    if country.is_none() {
        errors.insert(
            Field::Country,
            format!("Country must be one of: {}", Country::OPTIONS.join(", ")),
        );
    }

    match (date_of_birth, gender, country) {
        (Some(date_of_birth), Some(gender), Some(country)) => Ok(RegistrationRecord {
            full_name: draft.full_name.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            phone_number: draft.phone_number.clone(),
            date_of_birth,
            gender,
            address: draft.address.clone(),
            country,
            postal_code: draft.postal_code.clone(),
            occupation: draft.occupation.clone(),
            terms_accepted: draft.terms,
        }),
        _ => Err(errors),
    }
}

/// Validate `draft` with the default registration schema as of `today`.
pub fn validate(draft: &RegistrationDraft, today: Date) -> Result<RegistrationRecord, FieldErrors> {
    SchemaResolver::with_clock(Schema::default(), FixedClock(today))
        .resolve(draft)
        .into_result()
}
