//! Reading drafts and event scripts from files or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use regform_core::registration::RegistrationDraft;

/// Path value meaning "read standard input".
pub const STDIN_PATH: &str = "-";

/// Read the whole input named by `path`, or stdin for `-`.
pub fn read_input(path: &str) -> Result<String> {
    if path == STDIN_PATH {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read standard input")?;
        return Ok(buf);
    }
    std::fs::read_to_string(Path::new(path)).with_context(|| format!("Failed to read {path}"))
}

/// Parse a camelCase JSON draft. Missing keys are treated as empty fields.
pub fn parse_draft(json: &str) -> Result<RegistrationDraft> {
    serde_json::from_str(json).context("Input is not a valid registration draft")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_draft_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"email":"ada@example.com","terms":true}}"#).unwrap();

        let text = read_input(file.path().to_str().unwrap()).unwrap();
        let draft = parse_draft(&text).unwrap();
        assert_eq!(draft.email, "ada@example.com");
        assert!(draft.terms);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_input("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        assert!(parse_draft(r#"{"terms":"yes"}"#).is_err());
    }
}
