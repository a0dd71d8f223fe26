use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{extract::State, Json, Router};
use pageforge_core::{now_ms, AckResponse, HealthResponse, TaskRequest};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::pipeline;
use crate::vcs::VersionControl;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
    pub vcs: Arc<dyn VersionControl>,
}

impl AppState {
    pub fn new(config: Arc<Config>, vcs: Arc<dyn VersionControl>) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
            vcs,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Webhook entry point. Validates the shared secret, acknowledges
/// immediately, and runs the pipeline as a detached task. The response never
/// waits on the pipeline; post-acknowledgment failures are only logged.
pub async fn webhook(
    State(state): State<AppState>,
    Json(req): Json<TaskRequest>,
) -> Result<Json<AckResponse>, StatusCode> {
    if req.secret != state.config.webhook_secret {
        warn!(task = %req.task, "webhook rejected: bad secret");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let ack = AckResponse {
        status: "accepted".into(),
        task: req.task.clone(),
        round: req.round,
    };

    info!(task = %req.task, round = req.round, "task accepted");

    let pipeline_state = state.clone();
    tokio::spawn(async move {
        let task = req.task.clone();
        let round = req.round;
        if let Err(e) = pipeline::run(&pipeline_state, req).await {
            error!(task = %task, round, error = %e, "pipeline failed");
        }
    });

    Ok(Json(ack))
}

/// Unauthenticated liveness probe.
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        timestamp_ms: now_ms(),
    })
}
