//! Aggregate statistics over a set of shelters.
//!
//! Everything here is recomputed from the slice it is given. Data volumes are
//! tens to low hundreds of records, so there is no incremental state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{ShelterRecord, ShelterStatus};

/// Shelter counts per status, shown in the stats bar.
///
/// `good + warning + critical == total` always holds because status is a
/// closed enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelterStats {
    pub total: usize,
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
}

impl ShelterStats {
    /// Count `records` by status.
    pub fn from_records(records: &[ShelterRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            match record.status {
                ShelterStatus::Good => stats.good += 1,
                ShelterStatus::Warning => stats.warning += 1,
                ShelterStatus::Critical => stats.critical += 1,
            }
        }

        stats
    }
}

/// Shorthand for [`ShelterStats::from_records`].
pub fn summarize(records: &[ShelterRecord]) -> ShelterStats {
    ShelterStats::from_records(records)
}

/// Distinct identifiers available to the filter selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct DVR ids, sorted ascending.
    pub dvr_ids: Vec<String>,

    /// Distinct bus ids, sorted ascending.
    pub bus_ids: Vec<String>,
}

impl FilterOptions {
    /// Collect options from the full, unfiltered record set.
    pub fn from_records(records: &[ShelterRecord]) -> Self {
        let dvr_ids: BTreeSet<&str> = records.iter().map(|r| r.dvr_id.as_str()).collect();
        let bus_ids: BTreeSet<&str> = records.iter().map(|r| r.bus_id.as_str()).collect();

        Self {
            dvr_ids: dvr_ids.into_iter().map(str::to_string).collect(),
            bus_ids: bus_ids.into_iter().map(str::to_string).collect(),
        }
    }
}
