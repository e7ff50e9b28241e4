//! This module provides a cache for match programs and rendered calendars
//!
//! Entries remember when they were stored, and are considered stale after a given time to live.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::record::{MatchRecord, TeamId};


/// An in-memory cache, that can be backed by a local file
#[derive(Debug, Default, PartialEq)]
pub struct Cache {
    backing_file: Option<PathBuf>,
    data: CachedData,
}

#[derive(Default, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    match_programs: HashMap<TeamId, Entry<Vec<MatchRecord>>>,
    calendars: HashMap<String, Entry<String>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Entry<T> {
    stored_at: DateTime<Utc>,
    value: T,
}

impl<T> Entry<T> {
    fn fresh(&self, ttl: Duration, now: DateTime<Utc>) -> Option<&T> {
        // An expiry beyond the representable range never comes
        let fresh = self.stored_at.checked_add_signed(ttl).map_or(true, |expiry| now < expiry);
        if fresh {
            Some(&self.value)
        } else {
            None
        }
    }
}

impl Cache {
    /// Initialize an empty cache, that only lives in memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(Error::Config(format!("Unable to open file {:?}: {}", path, err)));
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: Some(PathBuf::from(path)),
            data,
        })
    }

    /// Initialize an empty cache, that will be saved to `path`
    pub fn with_backing_file(path: &Path) -> Self {
        Self {
            backing_file: Some(PathBuf::from(path)),
            data: CachedData::default(),
        }
    }

    /// The file this cache is saved to, if any
    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    /// The content of the backing file
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.data)?)
    }

    /// Store the current cache to its backing file, if any
    pub fn save_to_file(&self) -> Result<()> {
        let path = match &self.backing_file {
            None => return Ok(()),
            Some(p) => p,
        };
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Returns the match program of a team, unless it is missing or older than `ttl`
    pub fn match_program(&self, team_id: TeamId, ttl: Duration, now: DateTime<Utc>) -> Option<&Vec<MatchRecord>> {
        self.data.match_programs.get(&team_id).and_then(|entry| entry.fresh(ttl, now))
    }

    pub fn store_match_program(&mut self, team_id: TeamId, records: Vec<MatchRecord>, now: DateTime<Utc>) {
        self.data.match_programs.insert(team_id, Entry { stored_at: now, value: records });
    }

    /// Returns a rendered calendar, unless it is missing or older than `ttl`
    pub fn calendar(&self, key: &str, ttl: Duration, now: DateTime<Utc>) -> Option<&String> {
        self.data.calendars.get(key).and_then(|entry| entry.fresh(ttl, now))
    }

    pub fn store_calendar(&mut self, key: String, ics: String, now: DateTime<Utc>) {
        self.data.calendars.insert(key, Entry { stored_at: now, value: ics });
    }

    /// Drop every entry that is older than its time to live
    pub fn purge_expired(&mut self, match_program_ttl: Duration, calendar_ttl: Duration, now: DateTime<Utc>) {
        let before = self.len();
        self.data.match_programs.retain(|_, entry| entry.fresh(match_program_ttl, now).is_some());
        self.data.calendars.retain(|_, entry| entry.fresh(calendar_ttl, now).is_some());
        let purged = before - self.len();
        if purged > 0 {
            log::debug!("Purged {} expired cache entries", purged);
        }
    }

    /// The number of entries (match programs and calendars), fresh or not
    pub fn len(&self) -> usize {
        self.data.match_programs.len() + self.data.calendars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
