//! Filter predicate engine for the shelter list.
//!
//! A record is kept when every active criterion passes. Criteria arrive as the
//! raw strings typed into the filter panel; anything that does not parse
//! (an empty field, a malformed date, a non-numeric stop count) imposes no
//! constraint rather than failing the request.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ShelterRecord;

/// Constraint on whether detection found objects at the shelter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HasObjects {
    #[default]
    All,
    Yes,
    No,
}

/// User-specified constraints narrowing the visible shelters.
///
/// Every field defaults to "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the DVR id.
    pub dvr_id: String,

    /// Case-insensitive substring of the bus id.
    pub bus_id: String,

    /// Inclusive lower bound on the capture timestamp.
    pub captured_from: String,

    /// Inclusive upper bound on the capture timestamp, extended to the end of
    /// that calendar day.
    pub captured_to: String,

    /// Inclusive lower bound on the clip generation timestamp.
    pub clip_gen_from: String,

    /// Inclusive upper bound on the clip generation timestamp, extended to
    /// the end of that calendar day.
    pub clip_gen_to: String,

    pub has_objects: HasObjects,

    /// Inclusive minimum bus stop count.
    pub min_stops: String,

    /// Inclusive maximum bus stop count.
    pub max_stops: String,
}

impl FilterCriteria {
    /// Number of active filter groups, as shown on the filter panel badge.
    ///
    /// A date or stop-count range counts once even when both of its bounds
    /// are set.
    pub fn active_count(&self) -> usize {
        let groups = [
            !self.dvr_id.is_empty(),
            !self.bus_id.is_empty(),
            !self.captured_from.is_empty() || !self.captured_to.is_empty(),
            !self.clip_gen_from.is_empty() || !self.clip_gen_to.is_empty(),
            self.has_objects != HasObjects::All,
            !self.min_stops.is_empty() || !self.max_stops.is_empty(),
        ];

        groups.iter().filter(|active| **active).count()
    }

    /// Parse the raw criteria once so they can be checked against many records.
    pub fn compile(&self) -> CompiledFilter {
        CompiledFilter {
            dvr_id: non_empty_lowercase(&self.dvr_id),
            bus_id: non_empty_lowercase(&self.bus_id),
            captured_from: parse_lower_bound(&self.captured_from),
            captured_to: parse_upper_bound(&self.captured_to),
            clip_gen_from: parse_lower_bound(&self.clip_gen_from),
            clip_gen_to: parse_upper_bound(&self.clip_gen_to),
            has_objects: self.has_objects,
            min_stops: parse_leading_int(&self.min_stops),
            max_stops: parse_leading_int(&self.max_stops),
        }
    }
}

/// Criteria with every bound already parsed. `None` means unconstrained.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFilter {
    dvr_id: Option<String>,
    bus_id: Option<String>,
    captured_from: Option<DateTime<Utc>>,
    captured_to: Option<DateTime<Utc>>,
    clip_gen_from: Option<DateTime<Utc>>,
    clip_gen_to: Option<DateTime<Utc>>,
    has_objects: HasObjects,
    min_stops: Option<i64>,
    max_stops: Option<i64>,
}

impl CompiledFilter {
    /// Whether `record` passes every active constraint.
    pub fn matches(&self, record: &ShelterRecord) -> bool {
        if let Some(needle) = &self.dvr_id {
            if !record.dvr_id.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if let Some(needle) = &self.bus_id {
            if !record.bus_id.to_lowercase().contains(needle.as_str()) {
                return false;
            }
        }

        if !within(record.capture.timestamp, self.captured_from, self.captured_to) {
            return false;
        }

        if !within(
            record.capture.clip_generated_at,
            self.clip_gen_from,
            self.clip_gen_to,
        ) {
            return false;
        }

        match self.has_objects {
            HasObjects::Yes if !record.detection.objects_found => return false,
            HasObjects::No if record.detection.objects_found => return false,
            _ => {}
        }

        let stops = i64::from(record.bus_stops_count);
        if self.min_stops.is_some_and(|min| stops < min) {
            return false;
        }
        if self.max_stops.is_some_and(|max| stops > max) {
            return false;
        }

        true
    }
}

/// Keep the records that satisfy `criteria`, preserving their order.
pub fn apply_filters(records: &[ShelterRecord], criteria: &FilterCriteria) -> Vec<ShelterRecord> {
    let filter = criteria.compile();

    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

fn within(
    value: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    from.is_none_or(|from| value >= from) && to.is_none_or(|to| value <= to)
}

fn non_empty_lowercase(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_lowercase())
    }
}

/// Parse a date bound.
///
/// Accepts RFC 3339 instants, `datetime-local` style values without an offset
/// (`2026-02-02T08:30`, taken as UTC), and plain dates (`2026-02-02`, taken as
/// midnight UTC).
fn parse_bound(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    Some(naive.and_utc().fixed_offset())
}

fn parse_lower_bound(raw: &str) -> Option<DateTime<Utc>> {
    parse_bound(raw).map(|dt| dt.with_timezone(&Utc))
}

/// Parse an upper date bound and move it to 23:59:59.999 of the same calendar
/// day, so selecting a single day includes everything captured on it.
fn parse_upper_bound(raw: &str) -> Option<DateTime<Utc>> {
    let dt = parse_bound(raw)?;
    dt.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)?
        .and_local_timezone(*dt.offset())
        .single()
        .map(|end| end.with_timezone(&Utc))
}

/// Parse the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage (`"30 stops"` is 30). Returns `None` when no digits lead.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    // Saturate absurdly long inputs instead of dropping the constraint
    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
