//! Rule evaluator: pure logic over a draft and an evaluation date.

use validator::ValidateEmail;

use super::age::age_on;
use super::rules::{Check, FieldViolation, ValidationResult};
use super::schema::Schema;
use crate::registration::{Field, RegistrationDraft};
use crate::types::Date;

/// Characters a password may contain besides ASCII letters and digits.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&#+-";

/// Date format produced by a date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Evaluate every field of `draft` independently.
pub fn evaluate_rules(schema: &Schema, draft: &RegistrationDraft, today: Date) -> ValidationResult {
    let errors: Vec<FieldViolation> = schema
        .fields()
        .iter()
        .filter_map(|entry| evaluate_field(schema, entry.field, draft, today))
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Run one field's rule chain, stopping at the first failing rule.
pub fn evaluate_field(
    schema: &Schema,
    field: Field,
    draft: &RegistrationDraft,
    today: Date,
) -> Option<FieldViolation> {
    let rule = schema
        .rules_for(field)
        .iter()
        .find(|rule| !passes(&rule.check, field, draft, today))?;

    tracing::trace!(field = %field, rule = rule.check.name(), "Field rule failed");

    Some(FieldViolation {
        field,
        rule_type: rule.check.name(),
        message: rule.message.clone(),
    })
}

fn passes(check: &Check, field: Field, draft: &RegistrationDraft, today: Date) -> bool {
    match (check, draft.text(field)) {
        (Check::MustBeTrue, _) => draft.checked(field) == Some(true),
        // Text rules never apply to the checkbox.
        (_, None) => true,
        (Check::Required, Some(value)) => !value.is_empty(),
        (Check::MinLength(min), Some(value)) => value.chars().count() >= *min,
        (Check::MaxLength(max), Some(value)) => value.chars().count() <= *max,
        (Check::Pattern(re), Some(value)) => re.is_match(value),
        (Check::Email, Some(value)) => value.validate_email(),
        (Check::PasswordStrength, Some(value)) => is_strong_password(value),
        (Check::MatchesField(other), Some(value)) => draft.text(*other) == Some(value),
        (Check::ValidDate, Some(value)) => parse_date(value).is_some(),
        (Check::MinAge { years, policy }, Some(value)) => parse_date(value).is_some_and(|birth| {
            i64::from(age_on(birth, today, *policy)) >= i64::from(*years)
        }),
        (Check::OneOf(options), Some(value)) => options.iter().any(|o| *o == value),
    }
}

/// Parse a date input value.
pub fn parse_date(value: &str) -> Option<Date> {
    Date::parse_from_str(value, DATE_FORMAT).ok()
}

/// At least one lowercase letter, uppercase letter, digit and special
/// character, and nothing outside `[A-Za-z0-9]` plus [`PASSWORD_SPECIALS`].
pub fn is_strong_password(value: &str) -> bool {
    let is_special = |c: char| PASSWORD_SPECIALS.contains(c);

    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || is_special(c))
        && value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(is_special)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::validation::age::AgePolicy;

    fn today() -> Date {
        Date::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn schema() -> Schema {
        Schema::default()
    }

    fn valid_draft() -> RegistrationDraft {
        RegistrationDraft {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "Abcdef1!".into(),
            confirm_password: "Abcdef1!".into(),
            phone_number: "1234567890".into(),
            date_of_birth: "1990-12-10".into(),
            gender: "Female".into(),
            address: "12 St James's Square".into(),
            country: "UK".into(),
            postal_code: "12345".into(),
            occupation: "Mathematician".into(),
            terms: true,
        }
    }

    fn message(draft: &RegistrationDraft, field: Field) -> Option<String> {
        evaluate_field(&schema(), field, draft, today()).map(|v| v.message)
    }

    #[test]
    fn valid_draft_passes_every_rule() {
        let result = evaluate_rules(&schema(), &valid_draft(), today());
        assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn empty_draft_reports_required_for_each_field() {
        let result = evaluate_rules(&schema(), &RegistrationDraft::default(), today());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), Field::ALL.len());
        for violation in &result.errors {
            let expected = if violation.field == Field::Terms {
                "must_be_true"
            } else {
                "required"
            };
            assert_eq!(violation.rule_type, expected, "{}", violation.field);
        }
    }

    #[test]
    fn chain_short_circuits_at_first_failure() {
        let mut draft = valid_draft();
        draft.full_name = "A1".into();
        // Both min_length and regex_pattern fail; only the first is reported.
        let violation = evaluate_field(&schema(), Field::FullName, &draft, today()).unwrap();
        assert_eq!(violation.rule_type, "min_length");
        assert_eq!(violation.message, "Full Name must be at least 3 characters");
    }

    #[test]
    fn full_name_rejects_digits() {
        let mut draft = valid_draft();
        draft.full_name = "Ada 2nd".into();
        assert_eq!(
            message(&draft, Field::FullName).as_deref(),
            Some("Full Name should not contain numbers or special characters")
        );
    }

    #[test]
    fn email_syntax_is_checked() {
        let mut draft = valid_draft();
        draft.email = "not-an-email".into();
        assert_eq!(message(&draft, Field::Email).as_deref(), Some("Email is not valid"));
    }

    /// HTML5 email syntax admits internationalized domains and bracketed
    /// IP literals.
    #[test]
    fn email_accepts_idn_domains_and_ip_literals() {
        for address in ["ada@exämple.com", "a@[127.0.0.1]"] {
            let mut draft = valid_draft();
            draft.email = address.into();
            assert_eq!(message(&draft, Field::Email), None, "{address}");
        }
    }

    #[test]
    fn password_strength_cases() {
        assert!(is_strong_password("Abcdef1!"));
        assert!(is_strong_password("Zz9#Zz9#"));
        assert!(!is_strong_password("abcdef1!"), "missing uppercase");
        assert!(!is_strong_password("ABCDEF1!"), "missing lowercase");
        assert!(!is_strong_password("Abcdefg!"), "missing digit");
        assert!(!is_strong_password("Abcdefg1"), "missing special");
        assert!(!is_strong_password("Abcdef1! "), "space is outside the alphabet");
        assert!(!is_strong_password("Abcdef1^"), "caret is not a special");
    }

    #[test]
    fn short_password_reports_length_first() {
        let mut draft = valid_draft();
        draft.password = "Ab1!".into();
        draft.confirm_password = "Ab1!".into();
        assert_eq!(
            message(&draft, Field::Password).as_deref(),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn matching_confirmation_passes() {
        let draft = valid_draft();
        assert_eq!(message(&draft, Field::Password), None);
        assert_eq!(message(&draft, Field::ConfirmPassword), None);
    }

    #[test]
    fn mismatched_confirmation_fails() {
        let mut draft = valid_draft();
        draft.confirm_password = "Abcdef2!".into();
        assert_eq!(
            message(&draft, Field::ConfirmPassword).as_deref(),
            Some("Passwords must match")
        );
    }

    #[test]
    fn confirmation_tracks_current_password() {
        let mut draft = valid_draft();
        draft.password = "Xyz12345!".into();
        assert_eq!(
            message(&draft, Field::ConfirmPassword).as_deref(),
            Some("Passwords must match")
        );
    }

    #[test]
    fn phone_number_requires_ten_digits() {
        let mut draft = valid_draft();
        draft.phone_number = "12345".into();
        assert_eq!(
            message(&draft, Field::PhoneNumber).as_deref(),
            Some("Phone Number must be exactly 10 digits")
        );
        draft.phone_number = "1234567890".into();
        assert_eq!(message(&draft, Field::PhoneNumber), None);
        draft.phone_number = "12345678901".into();
        assert!(message(&draft, Field::PhoneNumber).is_some());
    }

    #[test]
    fn postal_code_accepts_five_or_six_digits() {
        let mut draft = valid_draft();
        draft.postal_code = "1234".into();
        assert_eq!(
            message(&draft, Field::PostalCode).as_deref(),
            Some("Postal Code must be 5 or 6 digits")
        );
        for ok in ["12345", "123456"] {
            draft.postal_code = ok.into();
            assert_eq!(message(&draft, Field::PostalCode), None, "{ok}");
        }
        draft.postal_code = "1234567".into();
        assert!(message(&draft, Field::PostalCode).is_some());
    }

    #[test]
    fn exactly_eighteen_passes() {
        let mut draft = valid_draft();
        draft.date_of_birth = "2008-10-18".into();
        assert_eq!(message(&draft, Field::DateOfBirth), None);
    }

    #[test]
    fn one_day_short_of_eighteen_fails_under_anniversary() {
        let mut draft = valid_draft();
        draft.date_of_birth = "2008-10-19".into();
        assert_eq!(
            message(&draft, Field::DateOfBirth).as_deref(),
            Some("Must be at least 18 years old")
        );

        let calendar = Schema::registration(&FormConfig {
            age_policy: AgePolicy::CalendarYear,
            ..FormConfig::default()
        });
        assert_eq!(
            evaluate_field(&calendar, Field::DateOfBirth, &draft, today()),
            None
        );
    }

    #[test]
    fn malformed_date_fails_before_age() {
        let mut draft = valid_draft();
        draft.date_of_birth = "2008-13-40".into();
        assert_eq!(
            message(&draft, Field::DateOfBirth).as_deref(),
            Some("Date of Birth must be a valid date")
        );
    }

    #[test]
    fn choice_fields_reject_unknown_options() {
        let mut draft = valid_draft();
        draft.gender = "Unknown".into();
        draft.country = "Atlantis".into();
        assert_eq!(
            message(&draft, Field::Gender).as_deref(),
            Some("Gender must be one of: Male, Female, Other")
        );
        assert_eq!(
            message(&draft, Field::Country).as_deref(),
            Some("Country must be one of: Nepal, UK, Canada, Australia, India")
        );
    }

    #[test]
    fn address_and_occupation_lengths() {
        let mut draft = valid_draft();
        draft.address = "Short st".into();
        draft.occupation = "x".repeat(51);
        assert_eq!(
            message(&draft, Field::Address).as_deref(),
            Some("Must be at least 10 characters")
        );
        assert_eq!(
            message(&draft, Field::Occupation).as_deref(),
            Some("Occupation must not exceed 50 characters")
        );
        draft.occupation = "x".repeat(50);
        assert_eq!(message(&draft, Field::Occupation), None);
    }

    #[test]
    fn unchecked_terms_blocks_an_otherwise_valid_draft() {
        let mut draft = valid_draft();
        draft.terms = false;
        let result = evaluate_rules(&schema(), &draft, today());
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, Field::Terms);
        assert_eq!(
            result.errors[0].message,
            "You must agree to the terms and conditions"
        );
    }
}
