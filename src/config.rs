//! Support for service configuration options

use std::convert::TryFrom;
use std::path::{Path, PathBuf};

use chrono::Duration;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::calendar::CalendarOptions;
use crate::error::{Error, Result};
use crate::timezone::WallClock;

/// Cache TTLs cannot exceed a year
pub const MAX_CACHE_TTL_SECS: u64 = 365 * 24 * 3600;

/// Service settings. Every field has a default value, so that a config file only needs to list what it overrides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the match program API
    pub api_url: Url,
    pub bind_address: String,
    /// How long the match program of a team is kept in cache
    pub api_cache_ttl_secs: u64,
    /// How long a rendered calendar is kept in cache. This is also advertised in the `Cache-Control` header
    pub calendar_cache_ttl_secs: u64,
    /// Max number of teams in a single calendar
    pub max_team_ids: usize,
    /// Part of the PRODID string that describes the product
    pub product_name: String,
    /// Appended to event UIDs
    pub uid_domain: String,
    pub wall_clock: WallClock,
    /// If set, the cache is loaded from and saved to this file
    pub cache_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let calendar = CalendarOptions::default();
        Self {
            api_url: default_api_url(),
            bind_address: String::from("127.0.0.1:8787"),
            api_cache_ttl_secs: 30 * 60,
            calendar_cache_ttl_secs: 15 * 60,
            max_team_ids: 10,
            product_name: calendar.product_name,
            uid_domain: calendar.uid_domain,
            wall_clock: calendar.wall_clock,
            cache_file: None,
        }
    }
}

fn default_api_url() -> Url {
    match Url::parse("https://api.dart-ddu.dk/") {
        Ok(url) => url,
        Err(err) => unreachable!("hard-coded URL is valid: {}", err),
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .map_err(|err| Error::Config(format!("Unable to open file {:?}: {}", path, err)))?;
        let settings: Settings = serde_json::from_reader(file)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.max_team_ids == 0 {
            return Err(Error::Config("max_team_ids must be at least 1".to_string()));
        }
        for (name, secs) in &[
            ("api_cache_ttl_secs", self.api_cache_ttl_secs),
            ("calendar_cache_ttl_secs", self.calendar_cache_ttl_secs),
        ] {
            if *secs > MAX_CACHE_TTL_SECS {
                return Err(Error::Config(format!("{} must be at most {} ({} given)", name, MAX_CACHE_TTL_SECS, secs)));
            }
        }
        if self.api_url.cannot_be_a_base() {
            return Err(Error::Config(format!("api_url {} cannot be used as a base URL", self.api_url)));
        }
        Ok(())
    }

    /// How long the match program of a team is kept in cache
    pub fn match_program_ttl(&self) -> Result<Duration> {
        ttl("api_cache_ttl_secs", self.api_cache_ttl_secs)
    }

    /// How long a rendered calendar is kept in cache
    pub fn calendar_ttl(&self) -> Result<Duration> {
        ttl("calendar_cache_ttl_secs", self.calendar_cache_ttl_secs)
    }

    /// The options used to render calendars
    pub fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions {
            product_name: self.product_name.clone(),
            uid_domain: self.uid_domain.clone(),
            wall_clock: self.wall_clock,
            ..CalendarOptions::default()
        }
    }
}

fn ttl(name: &str, secs: u64) -> Result<Duration> {
    i64::try_from(secs)
        .ok()
        .filter(|secs| *secs as u64 <= MAX_CACHE_TTL_SECS)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| Error::Config(format!("{} is out of range ({} given)", name, secs)))
}
