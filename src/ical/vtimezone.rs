//! Generation of the `VTIMEZONE` block of the calendar zone

use crate::ical::format_local;
use crate::timezone::{TransitionRule, ZoneDefinition};

/// Transitions are anchored on the first year of the Unix epoch, as most calendar software does
const ANCHOR_YEAR: i32 = 1970;

/// Formats a UTC offset given in seconds, e.g. `+0200`
pub fn format_offset(seconds: i32) -> String {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{}{:02}{:02}", sign, minutes / 60, minutes % 60)
}

/// The logical lines of a `VTIMEZONE` block describing `zone`
pub fn vtimezone_lines(zone: &ZoneDefinition) -> Vec<String> {
    let mut lines = vec![
        "BEGIN:VTIMEZONE".to_string(),
        format!("TZID:{}", zone.tzid),
    ];
    lines.extend(observance_lines("STANDARD", &zone.standard));
    lines.extend(observance_lines("DAYLIGHT", &zone.daylight));
    lines.push("END:VTIMEZONE".to_string());
    lines
}

fn observance_lines(component: &str, rule: &TransitionRule) -> Vec<String> {
    let mut lines = vec![
        format!("BEGIN:{}", component),
        format!("TZOFFSETFROM:{}", format_offset(rule.offset_from)),
        format!("TZOFFSETTO:{}", format_offset(rule.offset_to)),
        format!("TZNAME:{}", rule.name),
    ];
    match rule.onset(ANCHOR_YEAR) {
        Some(onset) => lines.push(format!("DTSTART:{}", format_local(&onset))),
        None => log::error!("Invalid transition rule for {}: {:?}", component, rule),
    }
    lines.push(format!("RRULE:FREQ=YEARLY;BYMONTH={};BYDAY=-1SU", rule.month));
    lines.push(format!("END:{}", component));
    lines
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::COPENHAGEN;

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(7200), "+0200");
        assert_eq!(format_offset(0), "+0000");
        assert_eq!(format_offset(-(3 * 3600 + 30 * 60)), "-0330");
        assert_eq!(format_offset(5 * 3600 + 45 * 60), "+0545");
    }

    #[test]
    fn copenhagen_block() {
        let expected = vec![
            "BEGIN:VTIMEZONE",
            "TZID:Europe/Copenhagen",
            "BEGIN:STANDARD",
            "TZOFFSETFROM:+0200",
            "TZOFFSETTO:+0100",
            "TZNAME:CET",
            "DTSTART:19701025T030000",
            "RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU",
            "END:STANDARD",
            "BEGIN:DAYLIGHT",
            "TZOFFSETFROM:+0100",
            "TZOFFSETTO:+0200",
            "TZNAME:CEST",
            "DTSTART:19700329T020000",
            "RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU",
            "END:DAYLIGHT",
            "END:VTIMEZONE",
        ];
        assert_eq!(vtimezone_lines(&COPENHAGEN), expected);
    }
}
