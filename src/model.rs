//! Data models for Shelterwatch.
//!
//! A [`ShelterRecord`] is one monitored bus stop/shelter with its latest
//! capture, condition scores, detection results, and a short history of past
//! observations. Field names serialize in camelCase so the JSON matches what
//! the dashboard front-end consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Overall condition category assigned to a shelter.
///
/// Status is assigned when a record is created. It is not recomputed from
/// [`Condition::rating`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelterStatus {
    Good,
    Warning,
    Critical,
}

impl ShelterStatus {
    /// Badge label shown in the drill-down view.
    pub fn label(&self) -> &'static str {
        match self {
            ShelterStatus::Good => "Good Condition",
            ShelterStatus::Warning => "Warning",
            ShelterStatus::Critical => "Critical",
        }
    }
}

/// Display tone of a 0-10 rating.
///
/// This is a presentation helper only; it never feeds back into
/// [`ShelterStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    /// Rating of 8 or above.
    Good,
    /// Rating from 5 up to 8.
    Fair,
    /// Rating below 5.
    Poor,
}

impl RatingBand {
    pub fn from_rating(rating: u8) -> Self {
        if rating >= 8 {
            RatingBand::Good
        } else if rating >= 5 {
            RatingBand::Fair
        } else {
            RatingBand::Poor
        }
    }
}

/// Where a shelter is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub stop_name: String,
}

/// Condition scores, each on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub rating: u8,
    pub cleanliness_score: u8,
    pub structural_score: u8,
    pub lighting_score: u8,
}

/// Result of object/person detection on the latest capture.
///
/// `objects_found` is expected to agree with `objects_list` being non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub objects_found: bool,
    pub objects_list: Vec<String>,
    pub persons_detected: u32,
}

/// The latest capture taken at the shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capture {
    /// When the camera captured the clip.
    pub timestamp: DateTime<Utc>,

    /// Clip length in seconds.
    pub clip_duration: u32,

    /// When the clip was generated. Never earlier than `timestamp`.
    pub clip_generated_at: DateTime<Utc>,

    pub image_url: String,
}

/// One past observation of a shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: String,
    pub bus_id: String,
    pub dvr_id: String,
    pub timestamp: DateTime<Utc>,
    pub image_url: String,
    pub rating: u8,
    pub persons_detected: u32,
    pub objects_detected: Vec<String>,
}

/// A monitored bus shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelterRecord {
    /// Store-unique identifier, `BS-###`.
    pub id: String,

    /// Bus that triggered the latest capture, `BUS-####`.
    pub bus_id: String,

    /// Recorder that produced the capture, `DVR-<letter><3 digits>`.
    pub dvr_id: String,

    pub bus_stops_count: u32,
    pub location: Location,
    pub status: ShelterStatus,
    pub condition: Condition,
    pub detection: Detection,
    pub capture: Capture,
    pub last_update: DateTime<Utc>,

    /// Past observations, most recent first.
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_band_thresholds() {
        assert_eq!(RatingBand::from_rating(10), RatingBand::Good);
        assert_eq!(RatingBand::from_rating(8), RatingBand::Good);
        assert_eq!(RatingBand::from_rating(7), RatingBand::Fair);
        assert_eq!(RatingBand::from_rating(5), RatingBand::Fair);
        assert_eq!(RatingBand::from_rating(4), RatingBand::Poor);
        assert_eq!(RatingBand::from_rating(0), RatingBand::Poor);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&ShelterStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");

        let parsed: ShelterStatus = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(parsed, ShelterStatus::Warning);
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let record = crate::seed::seed_records().remove(0);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["busId"], "BUS-4521");
        assert_eq!(value["dvrId"], "DVR-A001");
        assert_eq!(value["busStopsCount"], 47);
        assert_eq!(value["location"]["stopName"], "Downtown Plano Station");
        assert_eq!(value["detection"]["objectsFound"], false);
        assert_eq!(value["capture"]["clipDuration"], 3);
    }
}
