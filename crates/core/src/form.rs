//! Form controller: owns the current values, runs the resolver on change,
//! blur and submit, and tracks the state the rendered form reads.
//!
//! Every operation is synchronous. The latest change to a field always
//! replaces that field's previous result.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::{FormConfig, ValidationMode};
use crate::error::CoreError;
use crate::registration::{Field, RegistrationDraft, RegistrationRecord};
use crate::types::Timestamp;
use crate::validation::resolver::{Resolution, Resolver, SchemaResolver};
use crate::validation::rules::FieldErrors;

/// Message shown after a successful submission.
pub const SUCCESS_BANNER: &str = "Registration successful!";

/// How long the success banner stays visible.
pub const BANNER_TTL_SECS: i64 = 5;

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Receives the normalized record of a successful submission.
pub trait SubmitHandler {
    fn on_submit(&mut self, record: &RegistrationRecord);
}

impl<F> SubmitHandler for F
where
    F: FnMut(&RegistrationRecord),
{
    fn on_submit(&mut self, record: &RegistrationRecord) {
        self(record)
    }
}

/// Logs the submitted record. The password is never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmission;

impl SubmitHandler for LogSubmission {
    fn on_submit(&mut self, record: &RegistrationRecord) {
        tracing::info!(
            full_name = %record.full_name,
            email = %record.email,
            phone_number = %record.phone_number,
            date_of_birth = %record.date_of_birth,
            gender = record.gender.as_str(),
            country = record.country.as_str(),
            postal_code = %record.postal_code,
            occupation = %record.occupation,
            "Registration submitted",
        );
    }
}

/// Transient success notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub message: &'static str,
    pub shown_at: Timestamp,
}

impl Banner {
    /// Whether the banner is still showing at `now`.
    pub fn is_visible_at(&self, now: Timestamp) -> bool {
        now < self.shown_at + chrono::Duration::seconds(BANNER_TTL_SECS)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// State behind one rendered registration form.
#[derive(Debug)]
pub struct FormController<R> {
    resolver: R,
    mode: ValidationMode,
    values: RegistrationDraft,
    errors: FieldErrors,
    dirty: BTreeSet<Field>,
    touched: BTreeSet<Field>,
    submit_count: u32,
    banner: Option<Banner>,
}

impl FormController<SchemaResolver> {
    /// A controller for the registration schema, validating against the
    /// system date.
    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(SchemaResolver::new(config), config.mode)
    }
}

impl<R: Resolver> FormController<R> {
    pub fn new(resolver: R, mode: ValidationMode) -> Self {
        Self {
            resolver,
            mode,
            values: RegistrationDraft::default(),
            errors: FieldErrors::new(),
            dirty: BTreeSet::new(),
            touched: BTreeSet::new(),
            submit_count: 0,
            banner: None,
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn values(&self) -> &RegistrationDraft {
        &self.values
    }

    /// Visible inline errors.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn is_dirty(&self, field: Field) -> bool {
        self.dirty.contains(&field)
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// The success banner, unless it has expired by `now`.
    pub fn visible_banner(&self, now: Timestamp) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| b.is_visible_at(now))
    }

    /// Whether the whole form currently passes; gates the submit button.
    pub fn is_valid(&self) -> bool {
        self.resolver.resolve(&self.values).is_valid()
    }

    /// Change a textual field's value.
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), CoreError> {
        self.values.set_text(field, value)?;
        self.after_change(field);
        Ok(())
    }

    /// Change the checkbox's state.
    pub fn set_checked(&mut self, field: Field, checked: bool) -> Result<(), CoreError> {
        self.values.set_checked(field, checked)?;
        self.after_change(field);
        Ok(())
    }

    /// A field lost focus.
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);
        if self.mode.validates_on_blur() || self.submit_count > 0 {
            self.revalidate(field);
        }
    }

    /// Validate one field, or every field, and make the results visible.
    pub fn trigger(&mut self, field: Option<Field>) -> bool {
        match field {
            Some(field) => {
                self.revalidate(field);
                !self.errors.contains(field)
            }
            None => {
                self.errors = self.resolver.resolve(&self.values).errors();
                self.errors.is_empty()
            }
        }
    }

    /// Validate every field; on success hand the record to `handler` and
    /// show the success banner.
    pub fn submit<H>(&mut self, handler: &mut H) -> Result<RegistrationRecord, CoreError>
    where
        H: SubmitHandler + ?Sized,
    {
        self.submit_count += 1;

        match self.resolver.resolve(&self.values) {
            Resolution::Valid(record) => {
                self.errors.clear();
                handler.on_submit(&record);
                self.banner = Some(Banner {
                    message: SUCCESS_BANNER,
                    shown_at: chrono::Utc::now(),
                });
                tracing::info!(submit_count = self.submit_count, "Form submitted");
                Ok(record)
            }
            Resolution::Invalid(errors) => {
                tracing::debug!(
                    submit_count = self.submit_count,
                    failing = errors.len(),
                    "Submission blocked by validation",
                );
                self.errors = errors.clone();
                self.banner = None;
                Err(CoreError::SubmissionRejected(errors))
            }
        }
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.values = RegistrationDraft::default();
        self.errors.clear();
        self.dirty.clear();
        self.touched.clear();
        self.submit_count = 0;
        self.banner = None;
    }

    fn after_change(&mut self, field: Field) {
        self.dirty.insert(field);
        if !(self.mode.validates_on_change() || self.submit_count > 0) {
            return;
        }

        self.revalidate(field);
        for &dependent in field.dependents() {
            if self.dirty.contains(&dependent)
                || self.touched.contains(&dependent)
                || self.errors.contains(dependent)
            {
                self.revalidate(dependent);
            }
        }
    }

    fn revalidate(&mut self, field: Field) {
        match self.resolver.resolve_field(&self.values, field) {
            Some(violation) => {
                tracing::debug!(field = %field, rule = violation.rule_type, "Field invalid");
                self.errors.insert(field, violation.message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Date;
    use crate::validation::resolver::FixedClock;
    use crate::validation::schema::Schema;
    use assert_matches::assert_matches;

    fn controller(mode: ValidationMode) -> FormController<SchemaResolver<FixedClock>> {
        let today = Date::from_ymd_opt(2026, 10, 18).unwrap();
        FormController::new(
            SchemaResolver::with_clock(Schema::default(), FixedClock(today)),
            mode,
        )
    }

    #[test]
    fn untouched_fields_show_no_errors() {
        let mut form = controller(ValidationMode::OnChange);
        form.set_text(Field::Email, "ada@example.com").unwrap();
        assert!(form.errors().is_empty());
        assert!(!form.is_valid());
    }

    #[test]
    fn change_validates_the_changed_field() {
        let mut form = controller(ValidationMode::OnChange);
        form.set_text(Field::PhoneNumber, "12345").unwrap();
        assert_eq!(
            form.error(Field::PhoneNumber),
            Some("Phone Number must be exactly 10 digits")
        );
        form.set_text(Field::PhoneNumber, "1234567890").unwrap();
        assert_eq!(form.error(Field::PhoneNumber), None);
        assert!(form.is_dirty(Field::PhoneNumber));
    }

    #[test]
    fn clearing_a_field_reports_required() {
        let mut form = controller(ValidationMode::OnChange);
        form.set_text(Field::FullName, "Ada").unwrap();
        form.set_text(Field::FullName, "").unwrap();
        assert_eq!(form.error(Field::FullName), Some("Full Name is required"));
    }

    #[test]
    fn on_submit_mode_defers_until_first_submit() {
        let mut form = controller(ValidationMode::OnSubmit);
        form.set_text(Field::PostalCode, "1234").unwrap();
        form.blur(Field::PostalCode);
        assert!(form.errors().is_empty());

        let mut ignored = |_: &RegistrationRecord| {};
        assert!(form.submit(&mut ignored).is_err());
        assert_eq!(
            form.error(Field::PostalCode),
            Some("Postal Code must be 5 or 6 digits")
        );

        form.set_text(Field::PostalCode, "12345").unwrap();
        assert_eq!(form.error(Field::PostalCode), None);
    }

    #[test]
    fn on_blur_mode_validates_on_blur_only() {
        let mut form = controller(ValidationMode::OnBlur);
        form.set_text(Field::Address, "short").unwrap();
        assert_eq!(form.error(Field::Address), None);
        form.blur(Field::Address);
        assert!(form.is_touched(Field::Address));
        assert_eq!(form.error(Field::Address), Some("Must be at least 10 characters"));
    }

    #[test]
    fn trigger_all_surfaces_every_error() {
        let mut form = controller(ValidationMode::OnChange);
        assert!(!form.trigger(None));
        assert_eq!(form.errors().len(), Field::ALL.len());
        assert!(!form.trigger(Some(Field::Email)));
    }

    #[test]
    fn kind_mismatch_leaves_state_untouched() {
        let mut form = controller(ValidationMode::OnChange);
        assert_matches!(
            form.set_checked(Field::Email, true),
            Err(CoreError::FieldKindMismatch { .. })
        );
        assert!(!form.is_dirty(Field::Email));
    }

    #[test]
    fn banner_expires_after_its_ttl() {
        let shown_at = chrono::Utc::now();
        let banner = Banner {
            message: SUCCESS_BANNER,
            shown_at,
        };
        let ttl = chrono::Duration::seconds(BANNER_TTL_SECS);

        assert!(banner.is_visible_at(shown_at));
        assert!(banner.is_visible_at(shown_at + ttl - chrono::Duration::milliseconds(1)));
        assert!(!banner.is_visible_at(shown_at + ttl));
    }

    #[test]
    fn visible_banner_hides_an_expired_notice() {
        let mut form = controller(ValidationMode::OnChange);
        assert!(form.visible_banner(chrono::Utc::now()).is_none());

        form.banner = Some(Banner {
            message: SUCCESS_BANNER,
            shown_at: chrono::Utc::now(),
        });
        let shown_at = form.banner().map(|b| b.shown_at).unwrap();
        assert!(form.visible_banner(shown_at).is_some());
        let later = shown_at + chrono::Duration::seconds(BANNER_TTL_SECS + 1);
        assert!(form.visible_banner(later).is_none());
        assert!(form.banner().is_some());
    }
}
