//! Dashboard views over the shelter store.
//!
//! This module assembles what the front-end renders: the filtered shelter
//! list with its stats bar, the filter selector options, and the drill-down
//! detail of a single shelter.
//!
//! # Usage
//!
//! ```ignore
//! let dashboard = Dashboard::new(store);
//! let view = dashboard.view(&FilterCriteria::default()).await;
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregation::{FilterOptions, ShelterStats};
use crate::filter::{FilterCriteria, apply_filters};
use crate::model::{RatingBand, ShelterRecord};
use crate::store::ShelterStore;

/// Filtered shelter list plus the stats of that list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    /// When this response was generated.
    pub timestamp: DateTime<Utc>,

    /// Criteria the list was filtered with.
    pub criteria: FilterCriteria,

    /// Number of active filter groups.
    pub active_filters: usize,

    /// Shelters shown ("Showing N ...").
    pub filtered_count: usize,

    /// Shelters in the store ("... of M stops").
    pub total_count: usize,

    /// Status counts of the filtered list.
    pub stats: ShelterStats,

    /// Matching shelters, in store order.
    pub shelters: Vec<ShelterRecord>,
}

impl DashboardResponse {
    /// Build the view of `records` under `criteria`.
    pub fn build(records: &[ShelterRecord], criteria: FilterCriteria, now: DateTime<Utc>) -> Self {
        let shelters = apply_filters(records, &criteria);

        Self {
            timestamp: now,
            active_filters: criteria.active_count(),
            filtered_count: shelters.len(),
            total_count: records.len(),
            stats: ShelterStats::from_records(&shelters),
            criteria,
            shelters,
        }
    }
}

/// Drill-down view of one shelter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterDetail {
    #[serde(flatten)]
    pub shelter: ShelterRecord,

    /// Badge text for the shelter's status.
    pub status_label: &'static str,

    /// Tone of the current rating.
    pub rating_band: RatingBand,

    /// Tone of each history item's rating, parallel to `history`.
    pub history_bands: Vec<RatingBand>,
}

impl ShelterDetail {
    pub fn from_record(shelter: ShelterRecord) -> Self {
        Self {
            status_label: shelter.status.label(),
            rating_band: RatingBand::from_rating(shelter.condition.rating),
            history_bands: shelter
                .history
                .iter()
                .map(|item| RatingBand::from_rating(item.rating))
                .collect(),
            shelter,
        }
    }
}

/// Read-side facade over the store.
#[derive(Clone)]
pub struct Dashboard {
    store: ShelterStore,
}

impl Dashboard {
    pub fn new(store: ShelterStore) -> Self {
        Self { store }
    }

    /// Filtered list and stats for `criteria`.
    pub async fn view(&self, criteria: FilterCriteria) -> DashboardResponse {
        let records = self.store.snapshot().await;
        DashboardResponse::build(&records, criteria, Utc::now())
    }

    /// Only the stats of the filtered list.
    pub async fn stats(&self, criteria: &FilterCriteria) -> ShelterStats {
        let records = self.store.snapshot().await;
        ShelterStats::from_records(&apply_filters(&records, criteria))
    }

    /// Selector options across every shelter in the store.
    pub async fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.store.snapshot().await)
    }

    /// Detail of one shelter, if it exists.
    pub async fn detail(&self, id: &str) -> Option<ShelterDetail> {
        self.store.get(id).await.map(ShelterDetail::from_record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::HasObjects;
    use crate::model::ShelterStatus;
    use crate::seed::seed_records;

    #[test]
    fn test_build_counts() {
        let criteria = FilterCriteria {
            has_objects: HasObjects::Yes,
            ..Default::default()
        };

        let view = DashboardResponse::build(&seed_records(), criteria, Utc::now());

        assert_eq!(view.filtered_count, 3);
        assert_eq!(view.total_count, 6);
        assert_eq!(view.active_filters, 1);
        assert_eq!(view.stats.total, 3);
        assert_eq!(view.stats.warning, 2);
        assert_eq!(view.stats.critical, 1);
        assert_eq!(view.stats.good, 0);
    }

    #[test]
    fn test_detail_bands() {
        let record = seed_records().remove(2);
        let detail = ShelterDetail::from_record(record);

        assert_eq!(detail.shelter.status, ShelterStatus::Critical);
        assert_eq!(detail.status_label, "Critical");
        assert_eq!(detail.rating_band, RatingBand::Poor);
        assert_eq!(detail.history_bands, vec![RatingBand::Poor, RatingBand::Poor]);
    }

    #[test]
    fn test_detail_flattens_record() {
        let detail = ShelterDetail::from_record(seed_records().remove(0));
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["id"], "BS-001");
        assert_eq!(value["statusLabel"], "Good Condition");
        assert_eq!(value["ratingBand"], "good");
        assert_eq!(value["historyBands"].as_array().unwrap().len(), 5);
        assert_eq!(value["historyBands"][3], "fair");
    }

    #[tokio::test]
    async fn test_dashboard_reads_store() {
        let dashboard = Dashboard::new(ShelterStore::with_records(seed_records()));

        let view = dashboard.view(FilterCriteria::default()).await;
        assert_eq!(view.shelters.len(), 6);

        let stats = dashboard
            .stats(&FilterCriteria {
                min_stops: "50".to_string(),
                ..Default::default()
            })
            .await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.good, 2);

        assert!(dashboard.detail("BS-404").await.is_none());
        assert_eq!(dashboard.filter_options().await.dvr_ids.len(), 6);
    }
}
