//! This module combines a match source and a cache, to serve calendars

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::cache::Cache;
use crate::calendar::{build_document, CalendarOptions};
use crate::config::Settings;
use crate::error::Result;
use crate::record::{MatchRecord, TeamId};
use crate::request::CalendarRequest;
use crate::traits::MatchSource;

/// Serves calendars, fetching match programs from a [`MatchSource`] when they are not in cache (or are stale)
pub struct Provider<S>
where
    S: MatchSource,
{
    source: S,
    /// Never locked across an `.await`
    cache: Mutex<Cache>,

    options: CalendarOptions,
    match_program_ttl: Duration,
    calendar_ttl: Duration,
    max_team_ids: usize,
}

impl<S> Provider<S>
where
    S: MatchSource,
{
    /// Fails if the settings are invalid (e.g. out of range TTLs)
    pub fn new(source: S, cache: Cache, settings: &Settings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            source,
            cache: Mutex::new(cache),
            options: settings.calendar_options(),
            match_program_ttl: settings.match_program_ttl()?,
            calendar_ttl: settings.calendar_ttl()?,
            max_team_ids: settings.max_team_ids,
        })
    }

    /// Returns the match source
    pub fn source(&self) -> &S { &self.source }

    pub fn max_team_ids(&self) -> usize { self.max_team_ids }

    /// How long a calendar can be cached
    pub fn calendar_ttl(&self) -> Duration { self.calendar_ttl }

    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the iCal calendar for a request, either from the cache or freshly generated.
    ///
    /// Match programs are fetched one team after the other. If any of them fails, no calendar is generated.
    pub async fn calendar(&self, request: &CalendarRequest, now: DateTime<Utc>) -> Result<String> {
        let key = request.cache_key();
        let cached = self.cache().calendar(&key, self.calendar_ttl, now).cloned();
        if let Some(ics) = cached {
            log::debug!("Calendar for teams {} found in cache", key);
            return Ok(ics);
        }

        let mut batches = Vec::with_capacity(request.team_ids().len());
        for team_id in request.team_ids() {
            batches.push(self.match_program(*team_id, now).await?);
        }

        let document = build_document(batches, request.team_ids(), now, &self.options);
        let ics = document.to_ics();

        let snapshot = {
            let mut cache = self.cache();
            cache.store_calendar(key, ics.clone(), now);
            cache.purge_expired(self.match_program_ttl, self.calendar_ttl, now);
            match cache.backing_file() {
                None => None,
                Some(path) => match cache.to_json() {
                    Ok(json) => Some((path.to_path_buf(), json)),
                    Err(err) => {
                        log::warn!("Unable to serialize the cache: {}", err);
                        None
                    },
                },
            }
        };
        if let Some((path, json)) = snapshot {
            save_snapshot(path, json).await;
        }

        Ok(ics)
    }

    async fn match_program(&self, team_id: TeamId, now: DateTime<Utc>) -> Result<Vec<MatchRecord>> {
        let cached = self.cache().match_program(team_id, self.match_program_ttl, now).cloned();
        if let Some(records) = cached {
            log::debug!("Match program of team {} found in cache", team_id);
            return Ok(records);
        }

        let records = self.source.fetch_matches(team_id).await?;
        self.cache().store_match_program(team_id, records.clone(), now);
        Ok(records)
    }
}

/// Writes the cache file off the async threads. Failures are only logged
async fn save_snapshot(path: PathBuf, json: Vec<u8>) {
    let written = tokio::task::spawn_blocking(move || std::fs::write(&path, json).map_err(|err| (path, err))).await;
    match written {
        Ok(Ok(())) => (),
        Ok(Err((path, err))) => log::warn!("Unable to save the cache to {:?}: {}", path, err),
        Err(err) => log::warn!("Unable to save the cache: {}", err),
    }
}
