//! Seed data loaded into the store at startup.
//!
//! Six shelters around Plano, TX, with their recent capture history, plus the
//! pool of locally bundled capture images the generator draws from.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{
    Capture, Condition, Detection, HistoryItem, Location, ShelterRecord, ShelterStatus,
};

/// Locally bundled capture images.
pub const LOCAL_IMAGES: [&str; 8] = [
    "/assets/1.webp",
    "/assets/2.jpg",
    "/assets/3.jpg",
    "/assets/4.webp",
    "/assets/5.jpg",
    "/assets/6.jpg",
    "/assets/7.jpg",
    "/assets/8.webp",
];

/// Image `n` of the bundled pool, 1-based like the asset file names.
fn img(n: usize) -> String {
    LOCAL_IMAGES[n - 1].to_string()
}

/// An instant in early February 2026 (UTC).
fn at(day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, day, hour, minute, second)
        .single()
        .unwrap_or_default()
}

fn objects(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn history(
    id: &str,
    bus_id: &str,
    dvr_id: &str,
    timestamp: DateTime<Utc>,
    image: usize,
    rating: u8,
    persons_detected: u32,
    objects_detected: &[&str],
) -> HistoryItem {
    HistoryItem {
        id: id.to_string(),
        bus_id: bus_id.to_string(),
        dvr_id: dvr_id.to_string(),
        timestamp,
        image_url: img(image),
        rating,
        persons_detected,
        objects_detected: objects(objects_detected),
    }
}

/// Capture taken at `timestamp`; the 3-second clip is generated 3 seconds later.
fn capture(timestamp: DateTime<Utc>, image: usize) -> Capture {
    Capture {
        timestamp,
        clip_duration: 3,
        clip_generated_at: timestamp + chrono::Duration::seconds(3),
        image_url: img(image),
    }
}

/// The initial six shelter records, `BS-001` through `BS-006`.
pub fn seed_records() -> Vec<ShelterRecord> {
    vec![
        ShelterRecord {
            id: "BS-001".to_string(),
            bus_id: "BUS-4521".to_string(),
            dvr_id: "DVR-A001".to_string(),
            bus_stops_count: 47,
            location: Location {
                lat: 33.0198,
                lng: -96.6989,
                address: "1000 E 15th St, Plano, TX".to_string(),
                stop_name: "Downtown Plano Station".to_string(),
            },
            status: ShelterStatus::Good,
            condition: Condition {
                rating: 9,
                cleanliness_score: 9,
                structural_score: 10,
                lighting_score: 8,
            },
            detection: Detection {
                objects_found: false,
                objects_list: vec![],
                persons_detected: 3,
            },
            capture: capture(at(2, 8, 45, 0), 1),
            last_update: at(2, 8, 45, 10),
            history: vec![
                history("H001-1", "BUS-4521", "DVR-A001", at(2, 8, 45, 0), 1, 9, 3, &[]),
                history("H001-2", "BUS-2233", "DVR-A001", at(2, 7, 30, 0), 2, 8, 5, &[]),
                history("H001-3", "BUS-1122", "DVR-A001", at(2, 6, 15, 0), 3, 9, 2, &[]),
                history("H001-4", "BUS-8899", "DVR-A001", at(1, 18, 45, 0), 4, 7, 8, &["plastic bag"]),
                history("H001-5", "BUS-4455", "DVR-A001", at(1, 16, 30, 0), 5, 9, 1, &[]),
            ],
        },
        ShelterRecord {
            id: "BS-002".to_string(),
            bus_id: "BUS-7823".to_string(),
            dvr_id: "DVR-A002".to_string(),
            bus_stops_count: 32,
            location: Location {
                lat: 33.0462,
                lng: -96.7479,
                address: "5908 Legacy Dr, Plano, TX".to_string(),
                stop_name: "Legacy West Transit".to_string(),
            },
            status: ShelterStatus::Warning,
            condition: Condition {
                rating: 6,
                cleanliness_score: 5,
                structural_score: 7,
                lighting_score: 6,
            },
            detection: Detection {
                objects_found: true,
                objects_list: objects(&["plastic bag", "bottle"]),
                persons_detected: 1,
            },
            capture: capture(at(2, 8, 30, 0), 2),
            last_update: at(2, 8, 30, 15),
            history: vec![
                history("H002-1", "BUS-7823", "DVR-A002", at(2, 8, 30, 0), 2, 6, 1, &["plastic bag", "bottle"]),
                history("H002-2", "BUS-3344", "DVR-A002", at(2, 6, 45, 0), 6, 7, 4, &[]),
                history("H002-3", "BUS-5566", "DVR-A002", at(1, 20, 0, 0), 7, 5, 2, &["cup"]),
            ],
        },
        ShelterRecord {
            id: "BS-003".to_string(),
            bus_id: "BUS-1234".to_string(),
            dvr_id: "DVR-A003".to_string(),
            bus_stops_count: 18,
            location: Location {
                lat: 32.9987,
                lng: -96.6792,
                address: "2150 Parker Rd, Plano, TX".to_string(),
                stop_name: "Parker Road Station".to_string(),
            },
            status: ShelterStatus::Critical,
            condition: Condition {
                rating: 3,
                cleanliness_score: 2,
                structural_score: 4,
                lighting_score: 3,
            },
            detection: Detection {
                objects_found: true,
                objects_list: objects(&["mattress", "various bags", "cardboard boxes"]),
                persons_detected: 2,
            },
            capture: capture(at(2, 7, 15, 0), 3),
            last_update: at(2, 7, 15, 20),
            history: vec![
                history(
                    "H003-1",
                    "BUS-1234",
                    "DVR-A003",
                    at(2, 7, 15, 0),
                    3,
                    3,
                    2,
                    &["mattress", "various bags", "cardboard boxes"],
                ),
                history("H003-2", "BUS-9988", "DVR-A003", at(1, 22, 0, 0), 8, 4, 1, &["sleeping bag"]),
            ],
        },
        ShelterRecord {
            id: "BS-004".to_string(),
            bus_id: "BUS-9087".to_string(),
            dvr_id: "DVR-A004".to_string(),
            bus_stops_count: 56,
            location: Location {
                lat: 33.0336,
                lng: -96.7128,
                address: "3100 Spring Creek Pkwy, Plano, TX".to_string(),
                stop_name: "Spring Creek Parkway".to_string(),
            },
            status: ShelterStatus::Good,
            condition: Condition {
                rating: 8,
                cleanliness_score: 8,
                structural_score: 9,
                lighting_score: 7,
            },
            detection: Detection {
                objects_found: false,
                objects_list: vec![],
                persons_detected: 5,
            },
            capture: capture(at(2, 9, 0, 0), 4),
            last_update: at(2, 9, 0, 12),
            history: vec![
                history("H004-1", "BUS-9087", "DVR-A004", at(2, 9, 0, 0), 4, 8, 5, &[]),
                history("H004-2", "BUS-1122", "DVR-A004", at(2, 7, 0, 0), 1, 9, 3, &[]),
                history("H004-3", "BUS-3344", "DVR-A004", at(2, 5, 30, 0), 5, 8, 1, &[]),
                history("H004-4", "BUS-5566", "DVR-A004", at(1, 19, 0, 0), 6, 7, 6, &["newspaper"]),
            ],
        },
        ShelterRecord {
            id: "BS-005".to_string(),
            bus_id: "BUS-5566".to_string(),
            dvr_id: "DVR-A005".to_string(),
            bus_stops_count: 29,
            location: Location {
                lat: 33.0127,
                lng: -96.7324,
                address: "4500 Preston Rd, Plano, TX".to_string(),
                stop_name: "Preston Road & Park Blvd".to_string(),
            },
            status: ShelterStatus::Warning,
            condition: Condition {
                rating: 5,
                cleanliness_score: 4,
                structural_score: 6,
                lighting_score: 5,
            },
            detection: Detection {
                objects_found: true,
                objects_list: objects(&["organic waste"]),
                persons_detected: 8,
            },
            capture: capture(at(2, 8, 50, 0), 5),
            last_update: at(2, 8, 50, 18),
            history: vec![
                history("H005-1", "BUS-5566", "DVR-A005", at(2, 8, 50, 0), 5, 5, 8, &["organic waste"]),
                history("H005-2", "BUS-7788", "DVR-A005", at(2, 6, 30, 0), 7, 6, 4, &[]),
                history("H005-3", "BUS-9900", "DVR-A005", at(1, 21, 0, 0), 8, 4, 2, &["trash bag"]),
            ],
        },
        ShelterRecord {
            id: "BS-006".to_string(),
            bus_id: "BUS-3344".to_string(),
            dvr_id: "DVR-A006".to_string(),
            bus_stops_count: 63,
            location: Location {
                lat: 33.0540,
                lng: -96.7501,
                address: "7401 Windrose Ave, Plano, TX".to_string(),
                stop_name: "Shops at Legacy".to_string(),
            },
            status: ShelterStatus::Good,
            condition: Condition {
                rating: 10,
                cleanliness_score: 10,
                structural_score: 10,
                lighting_score: 10,
            },
            detection: Detection {
                objects_found: false,
                objects_list: vec![],
                persons_detected: 2,
            },
            capture: capture(at(2, 9, 10, 0), 6),
            last_update: at(2, 9, 10, 8),
            history: vec![
                history("H006-1", "BUS-3344", "DVR-A006", at(2, 9, 10, 0), 6, 10, 2, &[]),
                history("H006-2", "BUS-1122", "DVR-A006", at(2, 7, 45, 0), 1, 10, 4, &[]),
                history("H006-3", "BUS-5566", "DVR-A006", at(2, 6, 0, 0), 2, 9, 1, &[]),
                history("H006-4", "BUS-7788", "DVR-A006", at(1, 20, 30, 0), 3, 10, 3, &[]),
                history("H006-5", "BUS-9900", "DVR-A006", at(1, 18, 0, 0), 4, 10, 5, &[]),
                history("H006-6", "BUS-2233", "DVR-A006", at(1, 15, 30, 0), 8, 9, 2, &[]),
            ],
        },
    ]
}
