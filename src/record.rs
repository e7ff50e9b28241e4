//! Match records, as delivered by the match program API
//!
//! Every field is optional: the upstream data is not validated, and records with missing fields are
//! either filtered out or patched with fallbacks later on in the pipeline.

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// The identifier of a team, as used by the upstream API
pub type TeamId = u64;

/// A single match, as listed in the match program of a team
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// The match number. It is not globally unique on its own
    #[serde(rename = "kampprogram_kampnr", default, deserialize_with = "deserialize_lenient")]
    pub match_number: Option<MatchNumber>,

    #[serde(rename = "kampprogram_dato", default, deserialize_with = "deserialize_lenient_date")]
    pub start: Option<DateTime<Utc>>,

    #[serde(rename = "kampprogram_hjemmehold", default, deserialize_with = "deserialize_lenient")]
    pub home: Option<Participant>,

    #[serde(rename = "kampprogram_udehold", default, deserialize_with = "deserialize_lenient")]
    pub away: Option<Participant>,

    #[serde(rename = "raekke_id", default, deserialize_with = "deserialize_lenient")]
    pub competition: Option<Competition>,
}

impl MatchRecord {
    pub fn home_name(&self) -> Option<&str> {
        self.home.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn away_name(&self) -> Option<&str> {
        self.away.as_ref().and_then(|p| p.name.as_deref())
    }

    pub fn competition_name(&self) -> Option<&str> {
        self.competition.as_ref().and_then(|c| c.name.as_deref())
    }
}

/// A team taking part in a match
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, deserialize_with = "deserialize_lenient_id")]
    pub id: Option<TeamId>,

    #[serde(rename = "hold_holdnavn", default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,
}

/// The division ("række") a match is played in
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    #[serde(rename = "raekke_navn", default, deserialize_with = "deserialize_lenient")]
    pub name: Option<String>,
}

/// Match numbers are usually integers, but nothing prevents the API from sending strings
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MatchNumber {
    Number(i64),
    Text(String),
}

impl Display for MatchNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchNumber::Number(n) => write!(f, "{}", n),
            MatchNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for MatchNumber {
    fn from(n: i64) -> Self {
        MatchNumber::Number(n)
    }
}

/// Parses an ISO-8601 date.
/// Dates without an offset are considered as UTC. Anything that cannot be parsed is dropped (i.e. `None`)
pub fn parse_start(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn deserialize_lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let text: Option<String> = deserialize_lenient(deserializer)?;
    Ok(text.and_then(|t| {
        let parsed = parse_start(&t);
        if parsed.is_none() {
            log::warn!("Unable to parse match date {:?}. Ignoring it", t);
        }
        parsed
    }))
}

/// Deserializes a field that may come with an unexpected shape (e.g. a relation sent as a bare ID
/// instead of an object, or a float match number). Such values are dropped (i.e. `None`)
fn deserialize_lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => {
            log::warn!("Unexpected value {} ({}). Ignoring it", value, err);
            Ok(None)
        },
    }
}

/// Team IDs are numbers, but accept numeric strings as well
fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<Option<TeamId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let id = match &value {
        serde_json::Value::Null => return Ok(None),
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    if id.is_none() {
        log::warn!("Unexpected team ID {}. Ignoring it", value);
    }
    Ok(id)
}
