//! Builds a whole calendar out of the match programs of several teams

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::event::CalendarEvent;
use crate::ical::{format_local, format_utc, vtimezone_lines, IcsBuilder};
use crate::merge::merge_batches;
use crate::metadata::calendar_title;
use crate::record::{MatchRecord, TeamId};
use crate::sequencer::sequence_events;
use crate::timezone::{WallClock, ZoneDefinition, COPENHAGEN};

/// The MIME type of generated calendars
pub const CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
/// The suggested file name of generated calendars
pub const FILE_NAME: &str = "dart-kampprogram.ics";

/// What does not depend on the match records
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarOptions {
    /// Used in the PRODID
    pub product_name: String,
    /// Appended to event UIDs, e.g. `117-20241003T193000@dart-ddu.dk`
    pub uid_domain: String,
    pub zone: ZoneDefinition,
    pub wall_clock: WallClock,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            product_name: String::from("DDU Dart Calendar"),
            uid_domain: String::from("dart-ddu.dk"),
            zone: COPENHAGEN,
            wall_clock: WallClock::default(),
        }
    }
}

impl CalendarOptions {
    /// The local time to write for an instant
    pub fn local_time(&self, instant: &DateTime<Utc>) -> NaiveDateTime {
        self.zone.wall_clock(instant, self.wall_clock)
    }
}

/// A calendar, ready to be rendered as an iCal file
#[derive(Clone, Debug)]
pub struct CalendarDocument {
    title: String,
    team_ids: Vec<TeamId>,
    generated_at: DateTime<Utc>,
    events: Vec<CalendarEvent>,
    options: CalendarOptions,
}

/// Merges the match programs of the requested teams (one batch per team) into a calendar
pub fn build_document<I>(batches: I, team_ids: &[TeamId], generated_at: DateTime<Utc>, options: &CalendarOptions) -> CalendarDocument
where
    I: IntoIterator<Item = Vec<MatchRecord>>,
{
    let records = merge_batches(batches);
    let title = calendar_title(&records, team_ids);
    let events = sequence_events(&records, options);
    log::debug!("Calendar {:?} has {} events", title, events.len());

    CalendarDocument {
        title,
        team_ids: team_ids.to_vec(),
        generated_at,
        events,
        options: options.clone(),
    }
}

impl CalendarDocument {
    pub fn title(&self) -> &str                { &self.title        }
    pub fn team_ids(&self) -> &[TeamId]        { &self.team_ids     }
    pub fn events(&self) -> &[CalendarEvent]   { &self.events       }
    pub fn generated_at(&self) -> &DateTime<Utc> { &self.generated_at }

    pub fn prod_id(&self) -> String {
        let ids: Vec<String> = self.team_ids.iter().map(|id| id.to_string()).collect();
        format!("-//{} [teamIds:{}]//EN", self.options.product_name, ids.join(","))
    }

    /// The logical lines of the iCal file
    pub fn to_builder(&self) -> IcsBuilder {
        let tzid = self.options.zone.tzid;
        let dtstamp = format_utc(&self.generated_at);

        let mut builder = IcsBuilder::new();
        builder
            .line("BEGIN:VCALENDAR")
            .property("VERSION", "2.0")
            .property("PRODID", &self.prod_id())
            .property("CALSCALE", "GREGORIAN")
            .text_property("X-WR-CALNAME", &self.title)
            .property("X-WR-TIMEZONE", tzid)
            .lines(vtimezone_lines(&self.options.zone));

        for event in &self.events {
            let start = format_local(&self.options.local_time(event.start()));
            let end = format_local(&self.options.local_time(event.end()));
            builder
                .line("BEGIN:VEVENT")
                .property("UID", &format!("{}@{}", event.uid(), self.options.uid_domain))
                .property("DTSTAMP", &dtstamp)
                .property(&format!("DTSTART;TZID={}", tzid), &start)
                .property(&format!("DTEND;TZID={}", tzid), &end)
                .text_property("SUMMARY", event.summary())
                .line("END:VEVENT");
        }

        builder.line("END:VCALENDAR");
        builder
    }

    /// Renders the iCal file
    pub fn to_ics(&self) -> String {
        self.to_builder().build()
    }
}
