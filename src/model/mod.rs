//! Form data model: business record, repeatable entities, weekly schedule.
//!
//! Every closed set (state, profession, hour slot, weekday) is an enum. On
//! the wire an unset choice is an empty string, matching what the intake
//! endpoint expects from an untouched select.

pub mod business;
pub mod procedure;
pub mod professional;
pub mod schedule;

pub use business::{BrazilianState, BusinessField, BusinessRecord};
pub use procedure::{Procedure, ProcedureField};
pub use professional::{Profession, Professional, ProfessionalField};
pub use schedule::{HourSlot, Schedule, ScheduleEntry, ScheduleUpdate, Weekday, WorkingHours};

/// Error returned when a value is not a member of a closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {kind}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Parse an optional closed-set value. Blank input clears the choice,
/// anything outside the set is rejected.
pub(crate) fn parse_choice<T>(value: &str) -> Result<Option<T>, T::Err>
where
    T: std::str::FromStr,
{
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        trimmed.parse().map(Some)
    }
}

/// Serde adapter: `None` <-> `""`, `Some(v)` <-> `v.to_string()`.
pub(crate) mod blank_option {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.collect_str(v),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_choice(&raw).map_err(serde::de::Error::custom)
    }
}
