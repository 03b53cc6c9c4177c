//! Simulated ingestion workflow.
//!
//! Stands in for the pipeline that would normally report a new shelter: a bus
//! stops, the camera captures a short clip, the recorder triggers the
//! processor, and the processed frame is pushed to the shelter service.
//!
//! A run goes `idle -> running -> idle`. It waits one fixed delay, appends a
//! generated record to the store, and records a notice about the new shelter.
//! Triggering while a run is in progress does nothing; runs are never queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::generator::RandomSource;
use crate::model::ShelterRecord;
use crate::store::{ShelterStore, StoreError};

/// Default simulated pipeline latency.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1200);

/// Whether a simulated run is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowState {
    Idle,
    Running,
}

/// One stage of the ingestion pipeline, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowStep {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

pub const WORKFLOW_STEPS: [WorkflowStep; 5] = [
    WorkflowStep {
        id: 1,
        title: "Bus Stops",
        description: "Bus stops at the boarding point",
    },
    WorkflowStep {
        id: 2,
        title: "Capture Video",
        description: "Camera captures 3-second video",
    },
    WorkflowStep {
        id: 3,
        title: "Send Trigger",
        description: "Sends trigger to the edge processor",
    },
    WorkflowStep {
        id: 4,
        title: "Process Frame",
        description: "Edge processor sends the frame to the cloud",
    },
    WorkflowStep {
        id: 5,
        title: "Update Map",
        description: "Data sent to the bus shelter service",
    },
];

/// Notice raised when a run inserts a new shelter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStopNotice {
    pub id: String,
    pub stop_name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub inserted_at: DateTime<Utc>,
}

impl NewStopNotice {
    fn for_record(record: &ShelterRecord) -> Self {
        Self {
            id: record.id.clone(),
            stop_name: record.location.stop_name.clone(),
            address: record.location.address.clone(),
            lat: record.location.lat,
            lng: record.location.lng,
            inserted_at: record.last_update,
        }
    }
}

/// Current workflow state plus the latest insertion.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStatus {
    pub state: WorkflowState,
    pub steps: Vec<WorkflowStep>,
    pub last_inserted: Option<NewStopNotice>,
    pub last_refresh: DateTime<Utc>,
}

type SharedRng = Arc<Mutex<Box<dyn RandomSource + Send>>>;

/// Runs the simulated ingestion workflow against a store.
#[derive(Clone)]
pub struct WorkflowSimulator {
    store: ShelterStore,
    delay: Duration,
    running: Arc<AtomicBool>,
    rng: SharedRng,
    last_inserted: Arc<RwLock<Option<NewStopNotice>>>,
}

impl WorkflowSimulator {
    pub fn new(store: ShelterStore, delay: Duration, rng: Box<dyn RandomSource + Send>) -> Self {
        Self {
            store,
            delay,
            running: Arc::new(AtomicBool::new(false)),
            rng: Arc::new(Mutex::new(rng)),
            last_inserted: Arc::new(RwLock::new(None)),
        }
    }

    pub fn state(&self) -> WorkflowState {
        if self.running.load(Ordering::Acquire) {
            WorkflowState::Running
        } else {
            WorkflowState::Idle
        }
    }

    /// Start a run.
    ///
    /// Returns `None` without doing anything if a run is already in progress.
    /// Otherwise returns the handle of the spawned run, which resolves to the
    /// inserted record.
    pub fn trigger(&self) -> Option<JoinHandle<Result<ShelterRecord, StoreError>>> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Workflow already running, ignoring trigger");
            return None;
        }

        info!(delay_ms = self.delay.as_millis() as u64, "Workflow started");

        let this = self.clone();
        Some(tokio::spawn(async move {
            tokio::time::sleep(this.delay).await;
            let result = this.complete(Utc::now()).await;
            this.running.store(false, Ordering::Release);
            result
        }))
    }

    /// Insert the generated shelter and publish the notice.
    async fn complete(&self, now: DateTime<Utc>) -> Result<ShelterRecord, StoreError> {
        let mut rng = self.rng.lock().await;

        match self.store.append_generated(now, &mut **rng).await {
            Ok(record) => {
                info!(
                    id = %record.id,
                    stop_name = %record.location.stop_name,
                    lat = record.location.lat,
                    lng = record.location.lng,
                    "New shelter inserted"
                );
                *self.last_inserted.write().await = Some(NewStopNotice::for_record(&record));
                Ok(record)
            }
            Err(e) => {
                warn!(error = %e, "Workflow failed to insert shelter");
                Err(e)
            }
        }
    }

    pub async fn status(&self) -> WorkflowStatus {
        WorkflowStatus {
            state: self.state(),
            steps: WORKFLOW_STEPS.to_vec(),
            last_inserted: self.last_inserted.read().await.clone(),
            last_refresh: self.store.last_refresh().await,
        }
    }
}
