//! Generator contract against a mock completions endpoint.

use std::path::PathBuf;
use std::time::Duration;

use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use pageforge_core::PipelineError;
use pageforge_server::{config::Config, generator::LlmClient};

fn test_config(llm_base: String) -> Config {
    Config {
        listen: "127.0.0.1:0".into(),
        webhook_secret: "s3cret".into(),
        llm_base_url: llm_base,
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
    }
}

async fn spawn_completions(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn render_extracts_fenced_block_from_response() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            Json(serde_json::json!({
                "choices": [{"message": {"content": "```html\n<p>x</p>\n```"}}]
            }))
        }),
    );
    let config = test_config(spawn_completions(app).await);
    let client = reqwest::Client::new();
    let llm = LlmClient::new(&config, &client);

    let artifact = llm
        .render("build a thing", &["check one".into()], &[])
        .await
        .unwrap();
    assert_eq!(artifact.as_str(), "<p>x</p>");
}

#[tokio::test]
async fn render_falls_back_to_raw_text_without_fence() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async {
            Json(serde_json::json!({
                "choices": [{"message": {"content": "<p>bare</p>"}}]
            }))
        }),
    );
    let config = test_config(spawn_completions(app).await);
    let client = reqwest::Client::new();
    let llm = LlmClient::new(&config, &client);

    let artifact = llm.render("build", &[], &[]).await.unwrap();
    assert_eq!(artifact.as_str(), "<p>bare</p>");
}

#[tokio::test]
async fn upstream_error_surfaces_as_generation_failed() {
    let app = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model overloaded") }),
    );
    let config = test_config(spawn_completions(app).await);
    let client = reqwest::Client::new();
    let llm = LlmClient::new(&config, &client);

    let err = llm.render("build", &[], &[]).await.unwrap_err();
    match err {
        PipelineError::GenerationFailed(msg) => {
            assert!(msg.contains("model overloaded"), "message was: {msg}")
        }
        other => panic!("expected GenerationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_error_surfaces_as_generation_failed() {
    let config = test_config("http://127.0.0.1:9".into());
    let client = reqwest::Client::new();
    let llm = LlmClient::new(&config, &client);

    let err = llm.render("build", &[], &[]).await.unwrap_err();
    assert!(matches!(err, PipelineError::GenerationFailed(_)));
}
