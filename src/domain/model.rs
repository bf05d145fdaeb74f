use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

/// Navigation data carried by one RMC sentence. Time and date stay optional
/// because a receiver without a fix emits the sentence with those fields
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmcData {
    pub talker: String,
    pub time: Option<NaiveTime>,
    pub date: Option<NaiveDate>,
    pub valid: bool,
}

impl RmcData {
    /// UTC instant built from this sentence alone. Requires a valid fix and
    /// both fields populated; date and time are never mixed across sentences.
    pub fn utc_instant(&self) -> Option<DateTime<Utc>> {
        if !self.valid {
            return None;
        }
        let (date, time) = (self.date?, self.time?);
        Some(DateTime::from_naive_utc_and_offset(
            NaiveDateTime::new(date, time),
            Utc,
        ))
    }
}

/// One decoded line from the receiver. Decoding never fails outright; what
/// cannot be parsed travels as `Unparseable` with its diagnostic attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sentence {
    Rmc(RmcData),
    Other { type_code: String },
    Unparseable { line: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RenderMode {
    Digital,
    Analog,
}

impl Default for RenderMode {
    fn default() -> Self {
        RenderMode::Digital
    }
}

/// Zone-adjusted calendar fields, ready for any display. Recomputed every
/// tick and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub zone: String,
}

impl LocalizedTime {
    pub fn from_zoned<Tz: TimeZone>(datetime: &DateTime<Tz>, zone: impl Into<String>) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            second: datetime.second(),
            zone: zone.into(),
        }
    }
}

impl fmt::Display for LocalizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Shared handle on the currently selected IANA zone identifier. The UI side
/// owns mutation; the core only calls `get` once per tick, so a stale read
/// for a single tick is fine.
#[derive(Debug, Clone)]
pub struct ZoneSelection {
    inner: Arc<RwLock<String>>,
}

impl ZoneSelection {
    pub fn new(zone: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(zone.into())),
        }
    }

    pub fn get(&self) -> String {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn set(&self, zone: impl Into<String>) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = zone.into();
    }
}
