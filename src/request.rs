//! Validation of calendar requests

use crate::error::{Error, Result};
use crate::record::TeamId;

/// The teams a calendar is requested for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarRequest {
    team_ids: Vec<TeamId>,
}

impl CalendarRequest {
    /// Parses a comma-separated `teamIds` parameter, e.g. `12, 31`.
    ///
    /// Entries that are not plain numbers are ignored. At least one and at most `max_team_ids` must remain.
    pub fn parse(team_ids_param: Option<&str>, max_team_ids: usize) -> Result<Self> {
        let param = match team_ids_param {
            None | Some("") => return Err(Error::MissingTeamIds),
            Some(p) => p,
        };

        let team_ids: Vec<TeamId> = param
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|id| id.parse().ok())
            .collect();

        if team_ids.is_empty() || team_ids.len() > max_team_ids {
            return Err(Error::InvalidTeamIdCount { count: team_ids.len(), max: max_team_ids });
        }
        Ok(Self { team_ids })
    }

    pub fn team_ids(&self) -> &[TeamId] {
        &self.team_ids
    }

    /// Identifies requests that lead to the same calendar
    pub fn cache_key(&self) -> String {
        let ids: Vec<String> = self.team_ids.iter().map(|id| id.to_string()).collect();
        ids.join(",")
    }
}
