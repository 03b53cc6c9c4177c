//! Synthetic shelter records.
//!
//! A generated record stands in for a shelter that a real detection pipeline
//! would report. All randomness comes from a [`RandomSource`] so tests can
//! drive the generator deterministically.

use chrono::{DateTime, Utc};

use crate::model::{
    Capture, Condition, Detection, HistoryItem, Location, ShelterRecord, ShelterStatus,
};
use crate::seed::LOCAL_IMAGES;

/// Stop names a generated shelter may get.
const STOP_NAMES: [&str; 9] = [
    "Legacy West Station",
    "Shops at Willow Bend",
    "Medical District Stop",
    "Preston Hollow Center",
    "Bishop Arts District",
    "Deep Ellum Station",
    "Uptown Transit Hub",
    "Knox-Henderson Stop",
    "Greenville Avenue Station",
];

/// Addresses a generated shelter may get.
///
/// Sampled independently of [`STOP_NAMES`], so a stop name and its address
/// need not belong together.
const ADDRESSES: [&str; 8] = [
    "5800 Legacy Dr, Plano, TX",
    "6121 W Park Blvd, Plano, TX",
    "8300 Douglas Ave, Dallas, TX",
    "6500 Preston Rd, Dallas, TX",
    "400 N Bishop Ave, Dallas, TX",
    "2800 Main St, Dallas, TX",
    "3200 McKinney Ave, Dallas, TX",
    "4100 Knox St, Dallas, TX",
];

/// South-west corner and extent of the Dallas/Plano bounding box.
const MIN_LAT: f64 = 32.9;
const MAX_LNG: f64 = -96.6;
const BOX_SPAN_DEGREES: f64 = 0.3;

/// Length of every generated clip.
const CLIP_DURATION_SECS: u32 = 3;

/// A source of uniform random numbers in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: rand::RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        rand::Rng::r#gen::<f64>(self)
    }
}

/// Integer drawn uniformly from `lo..lo + span`.
fn int_in<R: RandomSource + ?Sized>(rng: &mut R, lo: u32, span: u32) -> u32 {
    let offset = (rng.next_f64() * f64::from(span)).floor() as u32;
    lo + offset.min(span.saturating_sub(1))
}

/// Element drawn uniformly from `items`, which must be non-empty.
fn pick<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    let index = (rng.next_f64() * items.len() as f64).floor() as usize;
    &items[index.min(items.len() - 1)]
}

/// Build the record for a freshly detected shelter.
///
/// The id is `BS-` followed by `existing_count + 1` padded to three digits.
/// No uniqueness check happens here: `existing_count` must be the store size
/// right before the new record is appended.
///
/// Generated shelters always have status `good`, a rating of 7-10, no
/// detected objects, and a single history entry. Capture, clip generation and
/// last update are all stamped with `now`.
pub fn generate_new_stop<R: RandomSource + ?Sized>(
    existing_count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ShelterRecord {
    let id = format!("BS-{:03}", existing_count + 1);
    let bus_id = format!("BUS-{}", int_in(rng, 1000, 9000));
    let letter = char::from(b'A' + int_in(rng, 0, 26) as u8);
    let dvr_id = format!("DVR-{}{:03}", letter, int_in(rng, 100, 900));

    let lat = MIN_LAT + rng.next_f64() * BOX_SPAN_DEGREES;
    let lng = MAX_LNG - rng.next_f64() * BOX_SPAN_DEGREES;
    let rating = int_in(rng, 7, 4) as u8;

    let capture_image = pick(rng, &LOCAL_IMAGES).to_string();
    let history_image = pick(rng, &LOCAL_IMAGES).to_string();

    let bus_stops_count = int_in(rng, 20, 50);
    let address = pick(rng, &ADDRESSES).to_string();
    let stop_name = pick(rng, &STOP_NAMES).to_string();

    let condition = Condition {
        rating,
        cleanliness_score: int_in(rng, 7, 4) as u8,
        structural_score: int_in(rng, 8, 3) as u8,
        lighting_score: int_in(rng, 7, 4) as u8,
    };
    let persons_detected = int_in(rng, 0, 8);

    let history = vec![HistoryItem {
        id: format!("{id}-H1"),
        bus_id: bus_id.clone(),
        dvr_id: dvr_id.clone(),
        timestamp: now,
        image_url: history_image,
        rating,
        persons_detected: int_in(rng, 0, 5),
        objects_detected: vec![],
    }];

    ShelterRecord {
        id,
        bus_id,
        dvr_id,
        bus_stops_count,
        location: Location {
            lat,
            lng,
            address,
            stop_name,
        },
        status: ShelterStatus::Good,
        condition,
        detection: Detection {
            objects_found: false,
            objects_list: vec![],
            persons_detected,
        },
        capture: Capture {
            timestamp: now,
            clip_duration: CLIP_DURATION_SECS,
            clip_generated_at: now,
            image_url: capture_image,
        },
        last_update: now,
        history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays a fixed value for every draw.
    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_f64(&mut self) -> f64 {
            self.0
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_id_is_zero_padded() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate_new_stop(6, now(), &mut rng).id, "BS-007");
        assert_eq!(generate_new_stop(0, now(), &mut rng).id, "BS-001");
        assert_eq!(generate_new_stop(99, now(), &mut rng).id, "BS-100");
        assert_eq!(generate_new_stop(1234, now(), &mut rng).id, "BS-1235");
    }

    #[test]
    fn test_lowest_draws() {
        let record = generate_new_stop(6, now(), &mut Constant(0.0));

        assert_eq!(record.bus_id, "BUS-1000");
        assert_eq!(record.dvr_id, "DVR-A100");
        assert_eq!(record.bus_stops_count, 20);
        assert_eq!(record.condition.rating, 7);
        assert_eq!(record.condition.structural_score, 8);
        assert_eq!(record.location.address, ADDRESSES[0]);
        assert_eq!(record.location.stop_name, STOP_NAMES[0]);
        assert_eq!(record.capture.image_url, LOCAL_IMAGES[0]);
        assert_eq!(record.detection.persons_detected, 0);
        assert!((record.location.lat - MIN_LAT).abs() < 1e-9);
        assert!((record.location.lng - MAX_LNG).abs() < 1e-9);
    }

    #[test]
    fn test_highest_draws_stay_in_range() {
        let record = generate_new_stop(6, now(), &mut Constant(0.999_999_9));

        assert_eq!(record.bus_id, "BUS-9999");
        assert_eq!(record.dvr_id, "DVR-Z999");
        assert_eq!(record.bus_stops_count, 69);
        assert_eq!(record.condition.rating, 10);
        assert_eq!(record.condition.cleanliness_score, 10);
        assert_eq!(record.condition.structural_score, 10);
        assert_eq!(record.condition.lighting_score, 10);
        assert_eq!(record.detection.persons_detected, 7);
        assert_eq!(record.history[0].persons_detected, 4);
        assert_eq!(record.location.address, ADDRESSES[7]);
        assert_eq!(record.location.stop_name, STOP_NAMES[8]);
        assert_eq!(record.capture.image_url, LOCAL_IMAGES[7]);
    }

    #[test]
    fn test_generated_record_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        for count in 0..200 {
            let record = generate_new_stop(count, now(), &mut rng);

            assert_eq!(record.status, ShelterStatus::Good);
            assert!((7..=10).contains(&record.condition.rating));
            assert!((7..=10).contains(&record.condition.cleanliness_score));
            assert!((8..=10).contains(&record.condition.structural_score));
            assert!((7..=10).contains(&record.condition.lighting_score));
            assert!((20..70).contains(&record.bus_stops_count));

            assert!(!record.detection.objects_found);
            assert!(record.detection.objects_list.is_empty());
            assert!(record.detection.persons_detected <= 7);

            assert!((32.9..33.2).contains(&record.location.lat));
            assert!(record.location.lng <= -96.6 && record.location.lng > -96.9);
            assert!(ADDRESSES.contains(&record.location.address.as_str()));
            assert!(STOP_NAMES.contains(&record.location.stop_name.as_str()));

            assert_eq!(record.capture.timestamp, now());
            assert_eq!(record.capture.clip_generated_at, now());
            assert_eq!(record.last_update, now());
            assert_eq!(record.capture.clip_duration, 3);
            assert!(LOCAL_IMAGES.contains(&record.capture.image_url.as_str()));

            assert_eq!(record.history.len(), 1);
            let item = &record.history[0];
            assert_eq!(item.id, format!("{}-H1", record.id));
            assert_eq!(item.bus_id, record.bus_id);
            assert_eq!(item.dvr_id, record.dvr_id);
            assert_eq!(item.rating, record.condition.rating);
            assert!(item.persons_detected <= 4);
            assert!(item.objects_detected.is_empty());
            assert!(LOCAL_IMAGES.contains(&item.image_url.as_str()));

            assert_eq!(record.bus_id.len(), "BUS-1234".len());
            assert_eq!(record.dvr_id.len(), "DVR-A123".len());
        }
    }

    #[test]
    fn test_same_seed_same_record() {
        let a = generate_new_stop(3, now(), &mut StdRng::seed_from_u64(7));
        let b = generate_new_stop(3, now(), &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_consecutive_counts_give_distinct_ids() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut records = crate::seed::seed_records();

        let first = generate_new_stop(records.len(), now(), &mut rng);
        records.push(first);
        let second = generate_new_stop(records.len(), now(), &mut rng);

        assert_ne!(records[6].id, second.id);
        assert_eq!(second.id, "BS-008");
    }
}
