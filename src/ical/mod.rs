//! This module handles the generation of iCal files
//!
//! Generation is done by hand rather than with a third-party library, since escaping and line
//! folding must be byte-exact.

mod builder;
pub use builder::{escape_text, fold_line, IcsBuilder, MAX_LINE_OCTETS};
mod vtimezone;
pub use vtimezone::{format_offset, vtimezone_lines};

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats an absolute instant, e.g. `20240115T180000Z`
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Formats a local (wall-clock) time, e.g. `20240115T190000`.
/// It must be paired with a `TZID` parameter
pub fn format_local(dt: &NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}
