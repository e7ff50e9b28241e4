//! Turns match records into an ordered list of calendar events

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::calendar::CalendarOptions;
use crate::event::CalendarEvent;
use crate::ical::format_local;
use crate::record::MatchRecord;

/// The upstream API does not tell how long matches last
pub const DEFAULT_EVENT_DURATION_HOURS: i64 = 2;

/// Used in summaries of matches whose division is unknown
pub const UNKNOWN_COMPETITION: &str = "Unknown competition";
pub const HOME_FALLBACK: &str = "Home";
pub const AWAY_FALLBACK: &str = "Away";
/// Used in UIDs of matches that have no number
pub const UNNUMBERED: &str = "unnumbered";

/// Builds the events of a calendar.
///
/// * records with no start date are ignored
/// * events are sorted by start date (keeping the original order for simultaneous matches)
/// * events last two hours, unless the next match starts earlier than that. In this case, the event
///   ends when the next match starts. Only the very next match is considered, and this happens
///   before duplicates are removed.
/// * duplicates (i.e. same match number and same start date) are removed, the first one is kept
pub fn sequence_events(records: &[MatchRecord], options: &CalendarOptions) -> Vec<CalendarEvent> {
    let mut dated: Vec<(&MatchRecord, DateTime<Utc>)> = records.iter()
        .filter_map(|record| record.start.map(|start| (record, start)))
        .collect();
    if dated.len() < records.len() {
        log::debug!("Ignoring {} match records with no date", records.len() - dated.len());
    }
    // sort_by_key is stable
    dated.sort_by_key(|(_, start)| *start);

    let mut seen_uids = HashSet::new();
    let mut events = Vec::with_capacity(dated.len());

    for (i, (record, start)) in dated.iter().enumerate() {
        let mut end = *start + Duration::hours(DEFAULT_EVENT_DURATION_HOURS);
        if let Some((_, next_start)) = dated.get(i + 1) {
            if next_start > start && *next_start < end {
                end = *next_start;
            }
        }

        let uid = event_uid(record, start, options);
        if seen_uids.insert(uid.clone()) == false {
            log::debug!("Skipping duplicate match {}", uid);
            continue;
        }

        events.push(CalendarEvent::new(uid, *start, end, summary(record)));
    }

    events
}

fn event_uid(record: &MatchRecord, start: &DateTime<Utc>, options: &CalendarOptions) -> String {
    let number = match &record.match_number {
        Some(n) => n.to_string(),
        None => UNNUMBERED.to_string(),
    };
    format!("{}-{}", number, format_local(&options.local_time(start)))
}

fn summary(record: &MatchRecord) -> String {
    let competition = match record.competition_name() {
        Some(name) => name,
        None => {
            log::warn!("Match {:?} has no division name", record.match_number);
            UNKNOWN_COMPETITION
        },
    };
    let home = record.home_name().unwrap_or(HOME_FALLBACK);
    let away = record.away_name().unwrap_or(AWAY_FALLBACK);
    format!("{}: {} vs {}", competition, home, away)
}
