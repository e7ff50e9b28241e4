//! This module provides a client to fetch match programs from the league API

use async_trait::async_trait;
use url::Url;

use crate::error::{Error, Result};
use crate::record::{MatchRecord, TeamId};
use crate::traits::MatchSource;

static MATCH_PROGRAM_PATH: &str = "kampprograms";

/// A match source that fetches its data from the league API
#[derive(Clone, Debug)]
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http: reqwest::Client::new(),
        }
    }

    /// The URL that lists every match of a team, sorted by date and match number
    pub fn match_program_url(&self, team_id: TeamId) -> Result<Url> {
        let mut url = self.url.join(MATCH_PROGRAM_PATH)
            .map_err(|err| Error::Config(format!("Invalid API URL {}: {}", self.url, err)))?;
        let id = team_id.to_string();
        url.query_pairs_mut()
            .append_pair("_sort", "kampprogram_dato:asc,kampprogram_kampnr:asc")
            .append_pair("_start", "0")
            .append_pair("_limit", "-1")
            .append_pair("_where[_or][0][kampprogram_hjemmehold.id]", &id)
            .append_pair("_where[_or][1][kampprogram_udehold.id]", &id);
        Ok(url)
    }
}

#[async_trait]
impl MatchSource for Client {
    async fn fetch_matches(&self, team_id: TeamId) -> Result<Vec<MatchRecord>> {
        let url = self.match_program_url(team_id)?;
        log::debug!("Fetching match program of team {} from {}", team_id, url);

        let res = self.http.get(url)
            .send()
            .await
            .map_err(|source| Error::Http { team_id, source })?;

        let status = res.status();
        if status.is_success() == false {
            return Err(Error::UpstreamStatus { team_id, status });
        }

        let records: Vec<MatchRecord> = res.json()
            .await
            .map_err(|source| Error::Http { team_id, source })?;
        log::debug!("Team {} has {} matches", team_id, records.len());
        Ok(records)
    }
}
