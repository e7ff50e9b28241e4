//! Calendar events

use chrono::{DateTime, Utc};

/// A match, as it will appear in the calendar (iCal `VEVENT` item)
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEvent {
    /// Unique within a calendar. Made of the match number and the local start time
    uid: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    /// e.g. `Serie 2: Pilen 1 vs Bullseye`
    summary: String,
}

impl CalendarEvent {
    pub fn new(uid: String, start: DateTime<Utc>, end: DateTime<Utc>, summary: String) -> Self {
        Self { uid, start, end, summary }
    }

    pub fn uid(&self) -> &str            { &self.uid     }
    pub fn start(&self) -> &DateTime<Utc> { &self.start   }
    pub fn end(&self) -> &DateTime<Utc>   { &self.end     }
    pub fn summary(&self) -> &str        { &self.summary }
}
