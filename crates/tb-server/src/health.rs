//! Health checks
//!
//! The only component is the in-memory store; it is healthy whenever its
//! lock can be taken and the collections read.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tb_store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreHealth {
    pub teams: usize,
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
    pub task_links: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub store: StoreHealth,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

pub struct HealthState {
    store: Arc<Store>,
    start_time: Instant,
}

impl HealthState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            start_time: Instant::now(),
        }
    }

    pub fn report(&self) -> HealthReport {
        let store = self.store.read(|c| StoreHealth {
            teams: c.teams.len(),
            users: c.users.len(),
            projects: c.projects.len(),
            tasks: c.tasks.len(),
            task_links: c.task_links.len(),
        });

        HealthReport {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            store,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// GET /health
pub async fn health(State(state): State<Arc<HealthState>>) -> (StatusCode, Json<HealthReport>) {
    (StatusCode::OK, Json(state.report()))
}

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
