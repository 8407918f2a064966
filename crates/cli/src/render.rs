//! Terminal rendering of the field set, validation outcomes and replay
//! snapshots.

use std::fmt::Write;

use serde::Serialize;

use regform_core::registration::{Field, RegistrationRecord};
use regform_core::validation::rules::FieldErrors;

use crate::events::{FormEvent, Snapshot};

/// Output style selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One row of the field listing.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "has_no_options")]
    pub options: &'static [&'static str],
}

fn has_no_options(options: &&[&str]) -> bool {
    options.is_empty()
}

pub fn field_set() -> Vec<FieldInfo> {
    Field::ALL
        .into_iter()
        .map(|field| FieldInfo {
            name: field.as_str(),
            label: field.label(),
            kind: field.kind().as_str(),
            options: field.options(),
        })
        .collect()
}

pub fn fields_text() -> String {
    let rows = field_set();
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);
    let kind_width = rows.iter().map(|r| r.kind.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let _ = write!(
            out,
            "{:<name_width$}  {:<kind_width$}  {}",
            row.name, row.kind, row.label
        );
        if !row.options.is_empty() {
            let _ = write!(out, " [{}]", row.options.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Inline errors, one `field: message` line each, in field order.
pub fn errors_text(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field}: {message}");
    }
    out
}

pub fn record_text(record: &RegistrationRecord) -> String {
    let mut out = String::new();
    let rows = [
        (Field::FullName, record.full_name.clone()),
        (Field::Email, record.email.clone()),
        (Field::PhoneNumber, record.phone_number.clone()),
        (Field::DateOfBirth, record.date_of_birth.to_string()),
        (Field::Gender, record.gender.as_str().to_string()),
        (Field::Address, record.address.clone()),
        (Field::Country, record.country.as_str().to_string()),
        (Field::PostalCode, record.postal_code.clone()),
        (Field::Occupation, record.occupation.clone()),
    ];
    for (field, value) in rows {
        let _ = writeln!(out, "  {}: {value}", field.label());
    }
    out
}

pub fn snapshot_text(snapshot: &Snapshot) -> String {
    let mut out = format!(
        "line {}: {} -> {}\n",
        snapshot.line,
        event_label(&snapshot.event),
        if snapshot.is_valid { "valid" } else { "invalid" },
    );
    out.push_str(&errors_text(&snapshot.errors));
    if let Some(banner) = snapshot.banner {
        let _ = writeln!(out, "  {banner}");
    }
    out
}

fn event_label(event: &FormEvent) -> String {
    match event {
        FormEvent::Change { field, .. } => format!("change {field}"),
        FormEvent::Check { field, checked } => format!("check {field}={checked}"),
        FormEvent::Blur { field } => format!("blur {field}"),
        FormEvent::Submit => "submit".to_string(),
        FormEvent::Reset => "reset".to_string(),
    }
}
