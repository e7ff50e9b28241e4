use async_trait::async_trait;

use crate::error::Result;
use crate::record::{MatchRecord, TeamId};

/// Something that knows the match program of teams (usually the upstream API)
#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Returns every match a team plays in, either at home or away.
    /// This may be a long process, and may fail (e.g. in case of a remote server)
    async fn fetch_matches(&self, team_id: TeamId) -> Result<Vec<MatchRecord>>;
}
