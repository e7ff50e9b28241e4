//! End-to-end scenarios of calendar generation, from match programs to iCal text

use chrono::{DateTime, Duration, TimeZone, Utc};

use dart_calendar::ical::MAX_LINE_OCTETS;
use dart_calendar::{build_document, CalendarOptions};
use dart_calendar::{Competition, MatchNumber, MatchRecord, Participant, TeamId};

const PILEN: TeamId = 12;
const BULLSEYE: TeamId = 31;

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

fn team(id: TeamId, name: &str) -> Option<Participant> {
    Some(Participant { id: Some(id), name: Some(name.to_string()) })
}

fn game(number: i64, start: DateTime<Utc>, home: (TeamId, &str), away: (TeamId, &str)) -> MatchRecord {
    MatchRecord {
        match_number: Some(MatchNumber::Number(number)),
        start: Some(start),
        home: team(home.0, home.1),
        away: team(away.0, away.1),
        competition: Some(Competition { name: Some("Serie 2".to_string()) }),
    }
}

fn render(batches: Vec<Vec<MatchRecord>>, team_ids: &[TeamId]) -> String {
    let generated_at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    build_document(batches, team_ids, generated_at, &CalendarOptions::default()).to_ics()
}

/// Returns the value of every (unfolded) line that starts with `name`
fn values<'a>(ics: &'a str, name: &str) -> Vec<&'a str> {
    ics.split("\r\n")
        .filter_map(|line| line.strip_prefix(name))
        .collect()
}

#[test]
fn scenario_matches_far_apart() {
    let _ = env_logger::builder().is_test(true).try_init();

    let ics = render(vec![vec![
        game(1, at(10, 17, 0), (PILEN, "Pilen 1"), (BULLSEYE, "Bullseye")),
        game(2, at(10, 20, 0), (BULLSEYE, "Bullseye"), (PILEN, "Pilen 1")),
    ]], &[PILEN]);

    assert_eq!(values(&ics, "BEGIN:VEVENT").len(), 2);
    assert_eq!(values(&ics, "DTSTART;TZID=Europe/Copenhagen:"), vec!["20240110T180000", "20240110T210000"]);
    assert_eq!(values(&ics, "DTEND;TZID=Europe/Copenhagen:"), vec!["20240110T200000", "20240110T230000"]);
}

#[test]
fn scenario_overlapping_matches() {
    let ics = render(vec![vec![
        game(1, at(10, 17, 0), (PILEN, "Pilen 1"), (BULLSEYE, "Bullseye")),
        game(2, at(10, 18, 0), (BULLSEYE, "Bullseye"), (PILEN, "Pilen 1")),
    ]], &[PILEN]);

    assert_eq!(values(&ics, "DTSTART;TZID=Europe/Copenhagen:"), vec!["20240110T180000", "20240110T190000"]);
    assert_eq!(values(&ics, "DTEND;TZID=Europe/Copenhagen:"), vec!["20240110T190000", "20240110T210000"]);
}

#[test]
fn scenario_same_match_in_two_programs() {
    let shared = game(5, at(12, 18, 30), (PILEN, "Pilen 1"), (BULLSEYE, "Bullseye"));
    let ics = render(vec![vec![shared.clone()], vec![shared]], &[PILEN, BULLSEYE]);

    assert_eq!(values(&ics, "UID:"), vec!["5-20240112T193000@dart-ddu.dk"]);
    assert_eq!(values(&ics, "X-WR-CALNAME:"), vec!["Pilen 1\\, Bullseye (Serie 2)"]);
    assert_eq!(values(&ics, "PRODID:"), vec!["-//DDU Dart Calendar [teamIds:12,31]//EN"]);
}

#[test]
fn scenario_no_matches() {
    let ics = render(vec![vec![], vec![]], &[PILEN, BULLSEYE]);

    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
    assert!(ics.ends_with("END:VTIMEZONE\r\nEND:VCALENDAR\r\n"));
    assert!(!ics.contains("VEVENT"));
    assert_eq!(values(&ics, "X-WR-CALNAME:"), vec![" ()"]);
}

#[test]
fn scenario_names_with_special_characters() {
    let ics = render(vec![vec![
        game(3, at(11, 18, 0), (PILEN, "Pilen; Odense, 1"), (BULLSEYE, "Bull\\seye")),
    ]], &[PILEN]);

    assert_eq!(values(&ics, "SUMMARY:"), vec!["Serie 2: Pilen\\; Odense\\, 1 vs Bull\\\\seye"]);
    assert_eq!(values(&ics, "X-WR-CALNAME:"), vec!["Pilen\\; Odense\\, 1 (Serie 2)"]);
}

#[test]
fn deterministic_but_for_dtstamp() {
    let batches = vec![
        vec![game(1, at(10, 17, 0), (PILEN, "Pilen 1"), (BULLSEYE, "Bullseye"))],
        vec![game(2, at(3, 17, 0), (BULLSEYE, "Bullseye"), (PILEN, "Pilen 1"))],
    ];
    let options = CalendarOptions::default();
    let first = build_document(batches.clone(), &[PILEN], Utc::now(), &options).to_ics();
    let second = build_document(batches, &[PILEN], Utc::now() + Duration::hours(1), &options).to_ics();

    let without_dtstamp = |ics: &str| -> Vec<String> {
        ics.split("\r\n").filter(|l| !l.starts_with("DTSTAMP:")).map(String::from).collect()
    };
    assert_ne!(first, second);
    assert_eq!(without_dtstamp(&first), without_dtstamp(&second));
    assert!(values(&first, "DTSTAMP:").iter().all(|v| v.len() == 16 && v.ends_with('Z')));
}

#[test]
fn ordered_without_overlaps() {
    // A busy season, delivered out of order, split across two programs
    let mut pilen = Vec::new();
    let mut bullseye = Vec::new();
    for i in 0..20u32 {
        let start = at(1 + i / 3, 17 + (i % 3), 20 * (i % 2));
        let record = game(i as i64, start, (PILEN, "Pilen 1"), (BULLSEYE, "Bullseye"));
        if i % 2 == 0 {
            pilen.insert(0, record);
        } else {
            bullseye.insert(0, record);
        }
    }

    let document = build_document(vec![pilen, bullseye], &[PILEN, BULLSEYE], Utc::now(), &CalendarOptions::default());
    let events = document.events();
    assert_eq!(events.len(), 20);

    for pair in events.windows(2) {
        assert!(pair[0].start() <= pair[1].start());
        assert!(pair[0].end() <= pair[1].start());
    }
    for event in events {
        assert!(event.start() < event.end());
        assert!(*event.end() - *event.start() <= Duration::hours(2));
    }
    assert_eq!(*events[19].end() - *events[19].start(), Duration::hours(2));
}

#[test]
fn every_physical_line_is_short() {
    let long_name = "Dartklubben Den Gyldne Pil af 1987, Afdeling Nørrebro; Hold Nummer Ét".to_string();
    let ics = render(vec![vec![
        game(1, at(10, 17, 0), (PILEN, &long_name), (BULLSEYE, &long_name)),
    ]], &[PILEN, BULLSEYE]);

    for line in ics.split("\r\n") {
        assert!(line.len() <= MAX_LINE_OCTETS, "line too long: {:?}", line);
        assert!(!line.starts_with("  "));
    }
    let unfolded = ics.replace("\r\n ", "");
    assert!(unfolded.contains(&format!(
        "SUMMARY:Serie 2: {} vs {}",
        long_name.replace(',', "\\,").replace(';', "\\;"),
        long_name.replace(',', "\\,").replace(';', "\\;"),
    )));
}
