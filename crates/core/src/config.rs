use crate::error::CoreError;
use crate::validation::age::AgePolicy;

/// Default minimum age accepted by the date-of-birth rule.
pub const DEFAULT_MIN_AGE: u32 = 18;

/// When the form controller runs validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// On every value change.
    #[default]
    OnChange,
    /// When a field loses focus.
    OnBlur,
    /// Only on submit; re-validates on change after the first submit.
    OnSubmit,
    /// On change and on blur.
    All,
}

impl ValidationMode {
    pub fn from_name(s: &str) -> Result<Self, CoreError> {
        match s {
            "on_change" => Ok(Self::OnChange),
            "on_blur" => Ok(Self::OnBlur),
            "on_submit" => Ok(Self::OnSubmit),
            "all" => Ok(Self::All),
            _ => Err(CoreError::Config(format!(
                "Invalid validation mode '{s}'. Must be one of: on_change, on_blur, on_submit, all"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnChange => "on_change",
            Self::OnBlur => "on_blur",
            Self::OnSubmit => "on_submit",
            Self::All => "all",
        }
    }

    pub fn validates_on_change(self) -> bool {
        matches!(self, Self::OnChange | Self::All)
    }

    pub fn validates_on_blur(self) -> bool {
        matches!(self, Self::OnBlur | Self::All)
    }
}

/// Form configuration loaded from environment variables.
///
/// All fields have defaults matching the registration form's stock behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    pub mode: ValidationMode,
    pub age_policy: AgePolicy,
    pub min_age: u32,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::default(),
            age_policy: AgePolicy::default(),
            min_age: DEFAULT_MIN_AGE,
        }
    }
}

impl FormConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default       |
    /// |---------------------------|---------------|
    /// | `REGFORM_VALIDATION_MODE` | `on_change`   |
    /// | `REGFORM_AGE_POLICY`      | `anniversary` |
    /// | `REGFORM_MIN_AGE`         | `18`          |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`FormConfig::from_env`] with an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = var("REGFORM_VALIDATION_MODE") {
            config.mode = ValidationMode::from_name(mode.trim())?;
        }
        if let Some(policy) = var("REGFORM_AGE_POLICY") {
            config.age_policy = AgePolicy::from_name(policy.trim())?;
        }
        if let Some(min_age) = var("REGFORM_MIN_AGE") {
            config.min_age = min_age.trim().parse().map_err(|_| {
                CoreError::Config(format!(
                    "REGFORM_MIN_AGE must be a non-negative integer, got '{min_age}'"
                ))
            })?;
        }

        Ok(config)
    }
}
