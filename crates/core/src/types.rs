/// Calendar dates carry no time zone; "today" is the local date of the clock.
pub type Date = chrono::NaiveDate;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
