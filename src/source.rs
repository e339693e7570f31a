//! The record source seam between the pipeline and storage.

use crate::error::Result;
use crate::models::AuctionRecord;
use crate::pipeline::{self, FilterSpec};

/// Anything that can hand the pipeline a materialized record set.
///
/// The pipeline needs no more than "all records" or "records matching one
/// equality filter", so implementations stay small.
pub trait RecordSource {
    fn fetch(&self, filter: &FilterSpec) -> Result<Vec<AuctionRecord>>;
}

/// In-memory records, filtered with the same predicate the SQL path pushes down.
impl RecordSource for [AuctionRecord] {
    fn fetch(&self, filter: &FilterSpec) -> Result<Vec<AuctionRecord>> {
        Ok(pipeline::apply_filter(self, filter))
    }
}
