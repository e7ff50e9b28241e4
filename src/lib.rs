//! This crate builds iCal calendars out of the match programs of dart league teams.
//!
//! The core of the crate is a pure pipeline, driven by [`calendar::build_document`]:
//! match records of every requested team are [merged](merge), the calendar [title](metadata) is derived,
//! records are turned into an ordered, deduplicated list of [events](sequencer), and the whole thing is
//! rendered as an [iCal file](ical) in a single [time zone](timezone).
//!
//! Around it, a [`Provider`](provider::Provider) fetches match programs from the league API (see the [`client`] module),
//! keeps them in a [`cache`], and the [`server`] module serves the resulting calendars over HTTP.

pub mod error;
pub use error::Error;
pub mod traits;

mod record;
pub use record::{Competition, MatchNumber, MatchRecord, Participant, TeamId};
mod event;
pub use event::CalendarEvent;
pub mod merge;
pub mod metadata;
pub mod sequencer;
pub mod timezone;
pub mod ical;
pub mod calendar;
pub use calendar::{build_document, CalendarDocument, CalendarOptions};

pub mod request;
pub mod client;
pub mod cache;
pub mod provider;
pub use provider::Provider;
pub mod server;

pub mod config;
