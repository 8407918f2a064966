//! Change-event scripts: JSON lines of form events replayed through a
//! [`FormController`], one snapshot of the form after each event.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use regform_core::error::CoreError;
use regform_core::form::{FormController, SubmitHandler};
use regform_core::registration::{Field, RegistrationRecord};
use regform_core::validation::resolver::Resolver;
use regform_core::validation::rules::FieldErrors;

/// One user interaction with the rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormEvent {
    Change { field: Field, value: String },
    Check { field: Field, checked: bool },
    Blur { field: Field },
    Submit,
    Reset,
}

/// Form state observed after an event.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// 1-based line of the event in the script.
    pub line: usize,
    pub event: FormEvent,
    pub is_valid: bool,
    pub errors: FieldErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted: Option<RegistrationRecord>,
}

/// Parse a JSON-lines script. Blank lines and `#` comments are skipped.
pub fn parse_events(script: &str) -> Result<Vec<(usize, FormEvent)>> {
    script
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("Invalid event on line {line_no}"))
                .map(|event| (line_no, event))
        })
        .collect()
}

/// Apply each event in order and capture the form state after it.
///
/// A rejected submission is part of the recorded state, not an error.
pub fn replay<R, H>(
    form: &mut FormController<R>,
    events: &[(usize, FormEvent)],
    handler: &mut H,
) -> Result<Vec<Snapshot>>
where
    R: Resolver,
    H: SubmitHandler + ?Sized,
{
    let mut snapshots = Vec::with_capacity(events.len());

    for (line, event) in events {
        let submitted = apply(form, event, handler)
            .with_context(|| format!("Event on line {line} could not be applied"))?;

        tracing::debug!(line, event = ?event, "Applied form event");

        snapshots.push(Snapshot {
            line: *line,
            event: event.clone(),
            is_valid: form.is_valid(),
            errors: form.errors().clone(),
            banner: form.visible_banner(chrono::Utc::now()).map(|b| b.message),
            submitted,
        });
    }

    Ok(snapshots)
}

fn apply<R, H>(
    form: &mut FormController<R>,
    event: &FormEvent,
    handler: &mut H,
) -> Result<Option<RegistrationRecord>, CoreError>
where
    R: Resolver,
    H: SubmitHandler + ?Sized,
{
    match event {
        FormEvent::Change { field, value } => form.set_text(*field, value.as_str())?,
        FormEvent::Check { field, checked } => form.set_checked(*field, *checked)?,
        FormEvent::Blur { field } => form.blur(*field),
        FormEvent::Reset => form.reset(),
        FormEvent::Submit => {
            return match form.submit(handler) {
                Ok(record) => Ok(Some(record)),
                Err(CoreError::SubmissionRejected(_)) => Ok(None),
                Err(e) => Err(e),
            };
        }
    }
    Ok(None)
}
