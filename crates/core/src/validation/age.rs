//! Age computation for the date-of-birth rule.

use chrono::Datelike;

use crate::error::CoreError;
use crate::types::Date;

/// How whole years of age are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AgePolicy {
    /// `today.year - birth.year`, ignoring month and day. Someone born on
    /// 31 December counts as a year older from 1 January.
    CalendarYear,
    /// Whole years elapsed; the age increments on the birthday itself.
    #[default]
    Anniversary,
}

impl AgePolicy {
    pub fn from_name(s: &str) -> Result<Self, CoreError> {
        match s {
            "calendar_year" => Ok(Self::CalendarYear),
            "anniversary" => Ok(Self::Anniversary),
            _ => Err(CoreError::Config(format!(
                "Invalid age policy '{s}'. Must be one of: calendar_year, anniversary"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CalendarYear => "calendar_year",
            Self::Anniversary => "anniversary",
        }
    }
}

/// Age in whole years on `today` for someone born on `birth`.
///
/// Negative when `birth` lies in a later year than `today`.
pub fn age_on(birth: Date, today: Date, policy: AgePolicy) -> i32 {
    let years = today.year() - birth.year();
    match policy {
        AgePolicy::CalendarYear => years,
        AgePolicy::Anniversary => match birthday_in(birth, today.year()) {
            Some(birthday) if today < birthday => years - 1,
            _ => years,
        },
    }
}

/// The birthday as observed in `year`. 29 February falls on 28 February
/// outside leap years.
fn birthday_in(birth: Date, year: i32) -> Option<Date> {
    birth
        .with_year(year)
        .or_else(|| Date::from_ymd_opt(year, 2, 28))
}
