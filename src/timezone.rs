//! The single time zone calendars are expressed in
//!
//! This is deliberately not a time zone database: the zone is described by its two yearly
//! transitions, each happening on the last Sunday of a given month.
//! The same description is used to convert instants to local times and to generate the `VTIMEZONE` block.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A yearly transition to a given offset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionRule {
    /// e.g. `CET`
    pub name: &'static str,
    /// Offset to UTC (in seconds) before the transition
    pub offset_from: i32,
    /// Offset to UTC (in seconds) after the transition
    pub offset_to: i32,
    /// The transition happens on the last Sunday of this month (1-12)
    pub month: u32,
    /// Local hour (in the `offset_from` time) the transition happens at
    pub hour: u32,
}

impl TransitionRule {
    /// The local time the transition happens at, for a given year
    pub fn onset(&self, year: i32) -> Option<NaiveDateTime> {
        last_sunday(year, self.month)?.and_hms_opt(self.hour, 0, 0)
    }

    /// The instant the transition happens at, for a given year
    pub fn onset_utc(&self, year: i32) -> Option<DateTime<Utc>> {
        let local = self.onset(year)?;
        let utc = local - Duration::seconds(self.offset_from as i64);
        Some(DateTime::<Utc>::from_naive_utc_and_offset(utc, Utc))
    }
}

/// A time zone with daylight saving time
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneDefinition {
    pub tzid: &'static str,
    pub standard: TransitionRule,
    pub daylight: TransitionRule,
}

/// The zone the Danish dart league plays in
pub const COPENHAGEN: ZoneDefinition = ZoneDefinition {
    tzid: "Europe/Copenhagen",
    standard: TransitionRule {
        name: "CET",
        offset_from: 2 * 3600,
        offset_to: 3600,
        month: 10,
        hour: 3,
    },
    daylight: TransitionRule {
        name: "CEST",
        offset_from: 3600,
        offset_to: 2 * 3600,
        month: 3,
        hour: 2,
    },
};

/// How local (wall-clock) times are derived from instants
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallClock {
    /// Actually convert instants to the zone's local time
    Converted,
    /// Use the UTC fields of instants as they are, and just label them with the zone.
    /// This is only correct if the upstream API sends local times disguised as UTC.
    UtcFields,
}

impl Default for WallClock {
    fn default() -> Self {
        WallClock::Converted
    }
}

impl ZoneDefinition {
    /// The UTC offset (in seconds) in effect at a given instant.
    ///
    /// Daylight saving time is assumed to start and end within the same year (i.e. northern hemisphere)
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> i32 {
        let year = instant.year();
        match (self.daylight.onset_utc(year), self.standard.onset_utc(year)) {
            (Some(dst_start), Some(dst_end)) if dst_start <= *instant && *instant < dst_end => {
                self.daylight.offset_to
            },
            _ => self.standard.offset_to,
        }
    }

    /// Converts an instant to the local time of this zone
    pub fn to_local(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() + Duration::seconds(self.offset_at(instant) as i64)
    }

    /// Returns the local time that should be written for an instant
    pub fn wall_clock(&self, instant: &DateTime<Utc>, mode: WallClock) -> NaiveDateTime {
        match mode {
            WallClock::Converted => self.to_local(instant),
            WallClock::UtcFields => instant.naive_utc(),
        }
    }
}

/// Returns the last Sunday of a month
pub fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let days_since_sunday = last_day.weekday().num_days_from_sunday();
    Some(last_day - Duration::days(days_since_sunday as i64))
}
