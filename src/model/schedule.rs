//! Weekly operating hours, one fixed entry per weekday.

use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::{UnknownValue, blank_option};

/// Day of the week, Monday first. Serializes to the Portuguese day key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Segunda,
    Terca,
    Quarta,
    Quinta,
    Sexta,
    Sabado,
    Domingo,
}

impl Weekday {
    /// Calendar order, Monday first.
    pub const ALL: [Weekday; 7] = [
        Self::Segunda,
        Self::Terca,
        Self::Quarta,
        Self::Quinta,
        Self::Sexta,
        Self::Sabado,
        Self::Domingo,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Segunda => "segunda",
            Self::Terca => "terca",
            Self::Quarta => "quarta",
            Self::Quinta => "quinta",
            Self::Sexta => "sexta",
            Self::Sabado => "sabado",
            Self::Domingo => "domingo",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Weekday {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.key() == s.trim())
            .ok_or_else(|| UnknownValue::new("weekday", s))
    }
}

/// An on-the-hour time slot, `"00:00"` through `"23:00"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourSlot(u8);

impl HourSlot {
    /// Slot for `hour`, or `None` if `hour > 23`.
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub fn hour(&self) -> u8 {
        self.0
    }

    /// All 24 slots in order.
    pub fn all() -> impl Iterator<Item = HourSlot> {
        (0..24).map(HourSlot)
    }
}

impl std::fmt::Display for HourSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for HourSlot {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        trimmed
            .strip_suffix(":00")
            .filter(|h| h.len() == 2)
            .and_then(|h| h.parse::<u8>().ok())
            .and_then(HourSlot::new)
            .ok_or_else(|| UnknownValue::new("hour slot", s))
    }
}

impl Serialize for HourSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HourSlot {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Opening hours for a single day.
///
/// Disabling a day keeps its times; they are simply not submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub enabled: bool,
    #[serde(with = "blank_option")]
    pub start: Option<HourSlot>,
    #[serde(with = "blank_option")]
    pub end: Option<HourSlot>,
}

/// A single change to a day's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleUpdate {
    Enabled(bool),
    Start(HourSlot),
    End(HourSlot),
}

/// Fixed seven-day schedule. Days are never added or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    entries: [ScheduleEntry; 7],
}

impl Schedule {
    pub fn get(&self, day: Weekday) -> &ScheduleEntry {
        &self.entries[day.index()]
    }

    pub fn update(&mut self, day: Weekday, update: ScheduleUpdate) {
        let entry = &mut self.entries[day.index()];
        match update {
            ScheduleUpdate::Enabled(enabled) => entry.enabled = enabled,
            ScheduleUpdate::Start(slot) => entry.start = Some(slot),
            ScheduleUpdate::End(slot) => entry.end = Some(slot),
        }
    }

    /// All days in week order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &ScheduleEntry)> {
        Weekday::ALL.into_iter().zip(self.entries.iter())
    }

    /// Enabled days in week order.
    pub fn enabled(&self) -> impl Iterator<Item = (Weekday, &ScheduleEntry)> {
        self.iter().filter(|(_, entry)| entry.enabled)
    }

    /// Enabled days only, keyed by day, ready for submission.
    pub fn working_hours(&self) -> WorkingHours {
        WorkingHours(self.enabled().map(|(day, entry)| (day, *entry)).collect())
    }
}

/// Enabled days in week order. Serializes as a map keyed by day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingHours(Vec<(Weekday, ScheduleEntry)>);

impl WorkingHours {
    pub fn get(&self, day: Weekday) -> Option<&ScheduleEntry> {
        self.0.iter().find(|(d, _)| *d == day).map(|(_, entry)| entry)
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().map(|(day, _)| *day)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WorkingHours {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (day, entry) in &self.0 {
            map.serialize_entry(day.key(), entry)?;
        }
        map.end()
    }
}
