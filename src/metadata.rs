//! Calendar metadata derived from the match records

use std::collections::HashSet;

use crate::record::{MatchRecord, Participant, TeamId};

/// A set that remembers the order its values were first inserted in
#[derive(Debug, Default)]
struct OrderedSet<'a> {
    seen: HashSet<&'a str>,
    values: Vec<&'a str>,
}

impl<'a> OrderedSet<'a> {
    fn insert(&mut self, value: &'a str) {
        if self.seen.insert(value) {
            self.values.push(value);
        }
    }

    fn join(&self, separator: &str) -> String {
        self.values.join(separator)
    }
}

/// Returns the calendar title, e.g. `Pilen 1, Pilen 2 (Serie 2, Pokal)`
///
/// Only the names of requested teams are listed, even though their opponents' names are also known.
/// Every division that is encountered is listed.
pub fn calendar_title(records: &[MatchRecord], requested: &[TeamId]) -> String {
    let requested: HashSet<TeamId> = requested.iter().copied().collect();

    let mut team_names = OrderedSet::default();
    let mut competition_names = OrderedSet::default();

    for record in records {
        for participant in record.home.iter().chain(record.away.iter()) {
            if let Some(name) = requested_name(participant, &requested) {
                team_names.insert(name);
            }
        }
        if let Some(name) = record.competition_name() {
            competition_names.insert(name);
        }
    }

    format!("{} ({})", team_names.join(", "), competition_names.join(", "))
}

fn requested_name<'a>(participant: &'a Participant, requested: &HashSet<TeamId>) -> Option<&'a str> {
    match participant.id {
        Some(id) if requested.contains(&id) => participant.name.as_deref(),
        _ => None,
    }
}
