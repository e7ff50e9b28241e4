//! Merges the match programs of several teams into a single list
//!
//! A match between two requested teams shows up in both of their programs. This is expected, and
//! duplicates are removed by the [`sequencer`](crate::sequencer), not here.

use crate::record::MatchRecord;

/// Concatenates batches of records, keeping the order of batches and the order within each batch
pub fn merge_batches<I>(batches: I) -> Vec<MatchRecord>
where
    I: IntoIterator<Item = Vec<MatchRecord>>,
{
    let mut merged = Vec::new();
    for batch in batches {
        merged.extend(batch);
    }
    log::debug!("Merged {} match records", merged.len());
    merged
}
