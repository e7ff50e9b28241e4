//! Error types

use thiserror::Error;

use crate::record::TeamId;

/// Errors that can occur while serving a calendar
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing required query params: teamIds")]
    MissingTeamIds,

    #[error("Invalid number of teamIds (1–{max} allowed)")]
    InvalidTeamIdCount { count: usize, max: usize },

    #[error("API returned {status} for teamId {team_id}")]
    UpstreamStatus { team_id: TeamId, status: reqwest::StatusCode },

    #[error("Failed to fetch or parse JSON for teamId {team_id}: {source}")]
    Http { team_id: TeamId, source: reqwest::Error },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error was caused by the caller's request, rather than by us or the upstream API
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Error::MissingTeamIds | Error::InvalidTeamIdCount { .. })
    }

    /// Whether this error comes from the upstream match program API
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::UpstreamStatus { .. } | Error::Http { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
