use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use tracing::warn;

/// Maps UTC instants onto an exchange's wall clock for bucket alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeClock {
    /// Constant offset from UTC in seconds.
    Fixed(i32),
    /// IANA zone, following its daylight-saving rules.
    Zone(Tz),
}

impl Default for ExchangeClock {
    fn default() -> Self {
        ExchangeClock::Fixed(0)
    }
}

impl From<Tz> for ExchangeClock {
    fn from(tz: Tz) -> Self {
        ExchangeClock::Zone(tz)
    }
}

impl ExchangeClock {
    /// Prefer the named zone; use the fixed offset when the name is absent
    /// or unknown.
    pub fn resolve(timezone: Option<&str>, utc_offset_secs: i32) -> Self {
        match timezone {
            Some(name) => match name.parse::<Tz>() {
                Ok(tz) => ExchangeClock::Zone(tz),
                Err(_) => {
                    warn!(
                        "Unknown exchange timezone '{}', using fixed offset {}s",
                        name, utc_offset_secs
                    );
                    ExchangeClock::Fixed(utc_offset_secs)
                }
            },
            None => ExchangeClock::Fixed(utc_offset_secs),
        }
    }

    /// IANA name, if this clock follows a zone.
    pub fn timezone(&self) -> Option<&'static str> {
        match self {
            ExchangeClock::Fixed(_) => None,
            ExchangeClock::Zone(tz) => Some(tz.name()),
        }
    }

    /// Offset from UTC in seconds in effect at `time_ms`.
    pub fn offset_at(&self, time_ms: i64) -> Option<i32> {
        match self {
            ExchangeClock::Fixed(offset) => Some(*offset),
            ExchangeClock::Zone(tz) => {
                let utc = DateTime::from_timestamp_millis(time_ms)?;
                Some(
                    tz.offset_from_utc_datetime(&utc.naive_utc())
                        .fix()
                        .local_minus_utc(),
                )
            }
        }
    }

    /// UTC seconds for a local wall time.
    ///
    /// A wall time repeated by a fall-back transition resolves to its earlier
    /// instant. One skipped by spring-forward is shifted by `fallback_offset`.
    pub fn utc_secs(&self, local: NaiveDateTime, fallback_offset: i32) -> i64 {
        let naive_secs = local.and_utc().timestamp();
        match self {
            ExchangeClock::Fixed(offset) => naive_secs - *offset as i64,
            ExchangeClock::Zone(tz) => match tz.from_local_datetime(&local) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.timestamp(),
                LocalResult::None => naive_secs - fallback_offset as i64,
            },
        }
    }
}
