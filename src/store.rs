//! In-memory shelter store.
//!
//! The store is an append-only, ordered collection shared by every reader in
//! the process. Records are never updated or removed; the store lives as long
//! as the server and starts over on restart.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::generator::{RandomSource, generate_new_stop};
use crate::model::ShelterRecord;

/// Errors raised when appending to the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("shelter id {0} already exists")]
    DuplicateId(String),
}

struct Inner {
    records: Vec<ShelterRecord>,
    revision: u64,
    last_refresh: DateTime<Utc>,
}

/// Shared handle to the shelter records.
///
/// Cloning is cheap; clones see the same records.
#[derive(Clone)]
pub struct ShelterStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for ShelterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ShelterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store holding `records` in the given order.
    ///
    /// The caller is responsible for the ids being unique.
    pub fn with_records(records: Vec<ShelterRecord>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records,
                revision: 0,
                last_refresh: Utc::now(),
            })),
        }
    }

    /// Append one record.
    ///
    /// Returns the new store size.
    pub async fn append(&self, record: ShelterRecord) -> Result<usize, StoreError> {
        let mut inner = self.inner.write().await;
        push(&mut inner, record, Utc::now())
    }

    /// Generate a synthetic record and append it in one step.
    ///
    /// The generator sees the store size under the same write lock that
    /// appends the result, so concurrent callers cannot hand it a stale count.
    pub async fn append_generated<R: RandomSource + ?Sized>(
        &self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ShelterRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let record = generate_new_stop(inner.records.len(), now, rng);
        push(&mut inner, record.clone(), now)?;
        Ok(record)
    }

    /// Copy of every record, in insertion order.
    pub async fn snapshot(&self) -> Vec<ShelterRecord> {
        self.inner.read().await.records.clone()
    }

    /// Look up a record by id.
    pub async fn get(&self, id: &str) -> Option<ShelterRecord> {
        self.inner
            .read()
            .await
            .records
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }

    /// Number of appends since the store was created.
    pub async fn revision(&self) -> u64 {
        self.inner.read().await.revision
    }

    /// When the store last changed (or was created).
    pub async fn last_refresh(&self) -> DateTime<Utc> {
        self.inner.read().await.last_refresh
    }
}

fn push(inner: &mut Inner, record: ShelterRecord, now: DateTime<Utc>) -> Result<usize, StoreError> {
    if inner.records.iter().any(|r| r.id == record.id) {
        return Err(StoreError::DuplicateId(record.id));
    }

    inner.records.push(record);
    inner.revision += 1;
    inner.last_refresh = now;
    Ok(inner.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_records;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_append_preserves_order() {
        let store = ShelterStore::new();
        assert!(store.is_empty().await);

        let mut records = seed_records();
        let second = records.remove(1);
        let first = records.remove(0);

        assert_eq!(store.append(first).await, Ok(1));
        assert_eq!(store.append(second).await, Ok(2));

        let ids: Vec<String> = store.snapshot().await.into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["BS-001", "BS-002"]);
        assert_eq!(store.revision().await, 2);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = ShelterStore::with_records(seed_records());
        let duplicate = seed_records().remove(2);

        let err = assert_err!(store.append(duplicate).await);

        assert_eq!(err, StoreError::DuplicateId("BS-003".to_string()));
        assert_eq!(store.len().await, 6);
        assert_eq!(store.revision().await, 0);
    }

    #[tokio::test]
    async fn test_append_generated_uses_current_size() {
        let store = ShelterStore::with_records(seed_records());
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();

        let first = assert_ok!(store.append_generated(now, &mut rng).await);
        let second = assert_ok!(store.append_generated(now, &mut rng).await);

        assert_eq!(first.id, "BS-007");
        assert_eq!(second.id, "BS-008");
        assert_eq!(store.len().await, 8);
        assert_eq!(store.last_refresh().await, now);
        assert_eq!(store.get("BS-008").await, Some(second));
    }

    #[tokio::test]
    async fn test_get_unknown_id() {
        let store = ShelterStore::with_records(seed_records());

        assert!(store.get("BS-999").await.is_none());
        assert_eq!(store.get("BS-004").await.unwrap().bus_stops_count, 56);
    }

    #[tokio::test]
    async fn test_clones_share_records() {
        let store = ShelterStore::new();
        let clone = store.clone();

        clone.append(seed_records().remove(0)).await.unwrap();

        assert_eq!(store.len().await, 1);
    }
}
