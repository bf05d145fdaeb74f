use crate::core::decoder;
use crate::domain::model::{LocalizedTime, Sentence, ZoneSelection};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Selects the per-tick time value from a drained batch and projects it
/// into the configured zone.
#[derive(Debug, Default)]
pub struct TimeSynchronizer {
    last_utc: Option<DateTime<Utc>>,
}

impl TimeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 整批依到達順序解碼;第一個帶有效 fix 與完整日期時間的 RMC 決定
    /// 這一tick的結果,其餘紀錄仍解碼以便留下診斷。
    ///
    /// `None` means the batch had no usable time and the display must keep
    /// whatever it last showed.
    pub fn tick(&mut self, records: &[String], zone: &ZoneSelection) -> Option<LocalizedTime> {
        let mut selected: Option<DateTime<Utc>> = None;

        for record in records {
            match decoder::decode(record) {
                Sentence::Rmc(rmc) => {
                    if selected.is_some() {
                        continue;
                    }
                    match rmc.utc_instant() {
                        Some(instant) => selected = Some(instant),
                        None => tracing::debug!(
                            "RMC from {} without usable time (valid fix: {})",
                            rmc.talker,
                            rmc.valid
                        ),
                    }
                }
                Sentence::Other { type_code } => {
                    tracing::debug!("Ignoring sentence type {}", type_code);
                }
                Sentence::Unparseable { line, reason } => {
                    tracing::warn!("Unparseable sentence '{}': {}", line, reason);
                }
            }
        }

        let utc = selected?;
        self.last_utc = Some(utc);
        Some(Self::localize(utc, &zone.get()))
    }

    /// Last known good UTC instant, kept across ticks with no usable batch.
    pub fn last_utc(&self) -> Option<DateTime<Utc>> {
        self.last_utc
    }

    fn localize(utc: DateTime<Utc>, zone_name: &str) -> LocalizedTime {
        match zone_name.parse::<Tz>() {
            Ok(tz) => LocalizedTime::from_zoned(&utc.with_timezone(&tz), zone_name),
            Err(_) => {
                tracing::warn!("Unknown time zone '{}', falling back to UTC", zone_name);
                LocalizedTime::from_zoned(&utc, "UTC")
            }
        }
    }
}
