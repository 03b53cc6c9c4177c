//! HTTP API handlers for Shelterwatch.
//!
//! The handlers are thin wrappers: filtering, stats and record generation all
//! live in the library modules, and the handlers only translate query strings
//! to [`FilterCriteria`] and results to JSON.
//!
//! Filter criteria travel as query parameters named like the criteria fields
//! (`dvrId`, `busId`, `capturedFrom`, `capturedTo`, `clipGenFrom`,
//! `clipGenTo`, `hasObjects`, `minStops`, `maxStops`). Missing parameters
//! impose no constraint.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::{FilterOptions, ShelterStats};
use crate::dashboard::{Dashboard, DashboardResponse, ShelterDetail};
use crate::filter::FilterCriteria;
use crate::workflow::{WorkflowSimulator, WorkflowStatus};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dashboard: Dashboard,
    pub workflow: WorkflowSimulator,
}

/// Build the router with every endpoint mounted.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/shelters", get(get_shelters))
        .route("/shelters/:id", get(get_shelter))
        .route("/stats", get(get_stats))
        .route("/filters/options", get(get_filter_options))
        .route("/workflow", get(get_workflow))
        .route("/workflow/simulate", post(post_simulate_workflow))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// GET /shelters - Filtered shelter list with stats.
///
/// # Response
///
/// ```json
/// {
///     "timestamp": "2026-02-02T09:15:00Z",
///     "criteria": { "dvrId": "", "hasObjects": "no", "minStops": "30", ... },
///     "activeFilters": 2,
///     "filteredCount": 2,
///     "totalCount": 6,
///     "stats": { "total": 2, "good": 2, "warning": 0, "critical": 0 },
///     "shelters": [ ... ]
/// }
/// ```
#[instrument(skip(state))]
pub async fn get_shelters(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<DashboardResponse> {
    let response = state.dashboard.view(criteria).await;

    info!(
        active_filters = response.active_filters,
        filtered = response.filtered_count,
        total = response.total_count,
        "Shelters queried"
    );

    Json(response)
}

/// GET /shelters/:id - Drill-down detail of one shelter.
#[instrument(skip(state))]
pub async fn get_shelter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShelterDetail>, StatusCode> {
    match state.dashboard.detail(&id).await {
        Some(detail) => {
            info!(id = %id, status = ?detail.shelter.status, "Shelter detail queried");
            Ok(Json(detail))
        }
        None => {
            warn!(id = %id, "Unknown shelter");
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// GET /stats - Status counts of the filtered shelter list.
#[instrument(skip(state))]
pub async fn get_stats(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<ShelterStats> {
    let stats = state.dashboard.stats(&criteria).await;

    info!(
        total = stats.total,
        good = stats.good,
        warning = stats.warning,
        critical = stats.critical,
        "Stats queried"
    );

    Json(stats)
}

/// GET /filters/options - Distinct DVR and bus ids for the filter selectors.
#[instrument(skip(state))]
pub async fn get_filter_options(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.dashboard.filter_options().await)
}

/// GET /workflow - Workflow state and the most recently inserted shelter.
#[instrument(skip(state))]
pub async fn get_workflow(State(state): State<AppState>) -> Json<WorkflowStatus> {
    Json(state.workflow.status().await)
}

/// POST /workflow/simulate - Start a simulated ingestion run.
///
/// Returns `202 Accepted` when a run starts and `409 Conflict` when one is
/// already in progress. Conflicting triggers are dropped, not queued.
#[instrument(skip(state))]
pub async fn post_simulate_workflow(State(state): State<AppState>) -> impl IntoResponse {
    match state.workflow.trigger() {
        Some(_handle) => {
            info!("Workflow simulation accepted");
            (StatusCode::ACCEPTED, Json(state.workflow.status().await))
        }
        None => {
            warn!("Workflow simulation rejected, run in progress");
            (StatusCode::CONFLICT, Json(state.workflow.status().await))
        }
    }
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_records;
    use crate::store::ShelterStore;
    use axum::body::Body;
    use axum::http::Request;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = ShelterStore::with_records(seed_records());
        router(AppState {
            dashboard: Dashboard::new(store.clone()),
            workflow: WorkflowSimulator::new(
                store,
                std::time::Duration::from_millis(10),
                Box::new(StdRng::seed_from_u64(0)),
            ),
        })
    }

    #[tokio::test]
    async fn test_health_oneshot() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = app()
            .oneshot(Request::builder().uri("/bus-stops").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
