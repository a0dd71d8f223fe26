//! HTTP shell contract: acknowledge-then-process with a shared secret gate.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pageforge_core::TaskRequest;
use pageforge_server::{
    config::Config,
    http::{healthz, webhook, AppState},
    vcs::GitCli,
};

fn test_state() -> AppState {
    // Upstreams point at a closed port: the detached pipeline fails fast and
    // only logs, which is exactly the acknowledge-then-process contract.
    let config = Config {
        listen: "127.0.0.1:0".into(),
        webhook_secret: "s3cret".into(),
        llm_base_url: "http://127.0.0.1:9".into(),
        llm_api_key: "test-key".into(),
        llm_model: "gpt-4o".into(),
        llm_max_tokens: 512,
        llm_temperature: 0.2,
        hosting_base_url: "http://127.0.0.1:9".into(),
        hosting_token: "token".into(),
        hosting_owner: "owner".into(),
        workspaces_root: PathBuf::from("/tmp/pageforge-tests"),
        settle_delay: Duration::from_millis(1),
        report_backoff: vec![Duration::from_millis(1); 2],
    };
    AppState::new(Arc::new(config), Arc::new(GitCli))
}

fn request(secret: &str) -> TaskRequest {
    TaskRequest {
        secret: secret.into(),
        email: "dev@example.com".into(),
        task: "My Task".into(),
        round: 1,
        nonce: "abc123".into(),
        brief: "Build a markdown previewer".into(),
        checks: vec![],
        attachments: vec![],
        evaluation_url: "http://127.0.0.1:9/notify".into(),
    }
}

#[tokio::test]
async fn wrong_secret_is_rejected_with_401() {
    let state = test_state();
    let result = webhook(State(state), Json(request("wrong"))).await;
    assert!(matches!(result, Err(StatusCode::UNAUTHORIZED)));
}

#[tokio::test]
async fn correct_secret_is_acknowledged_immediately() {
    let state = test_state();
    let started = std::time::Instant::now();
    let ack = webhook(State(state), Json(request("s3cret")))
        .await
        .expect("ack expected")
        .0;

    assert_eq!(ack.status, "accepted");
    assert_eq!(ack.task, "My Task");
    assert_eq!(ack.round, 1);
    // Response must not wait on the pipeline (settle delay, retries, ...).
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn unknown_round_is_still_acknowledged() {
    // Round validation happens inside the detached pipeline; the HTTP
    // contract is acknowledge-anything-authenticated.
    let state = test_state();
    let mut req = request("s3cret");
    req.round = 7;
    let ack = webhook(State(state), Json(req)).await.expect("ack").0;
    assert_eq!(ack.round, 7);
}

#[tokio::test]
async fn health_endpoint_reports_a_timestamp() {
    let health = healthz().await.0;
    assert_eq!(health.status, "ok");
    assert!(health.timestamp_ms > 0);
}
