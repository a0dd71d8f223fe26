//! Integration tests for the core crate.

use pageforge_core::{
    extract_fenced_block, project_slug, Artifact, PipelineError, ReportPayload, TaskRequest,
};

#[test]
fn test_task_request_deserializes_webhook_body() {
    let body = r#"{
        "secret": "s3cret",
        "email": "dev@example.com",
        "task": "My Task",
        "round": 1,
        "nonce": "abc123",
        "brief": "Build a markdown previewer",
        "checks": ["renders markdown", "works offline"],
        "attachments": [{"name": "notes.txt", "url": "data:text/plain;base64,aGk="}],
        "evaluation_url": "https://evaluator.example.com/notify"
    }"#;

    let req: TaskRequest = serde_json::from_str(body).unwrap();
    assert_eq!(req.round, 1);
    assert_eq!(req.checks.len(), 2);
    assert_eq!(req.attachments[0].name, "notes.txt");
}

#[test]
fn test_task_request_defaults_optional_lists() {
    let body = r#"{
        "secret": "s",
        "email": "dev@example.com",
        "task": "t",
        "round": 2,
        "nonce": "n",
        "brief": "b",
        "evaluation_url": "https://evaluator.example.com/notify"
    }"#;

    let req: TaskRequest = serde_json::from_str(body).unwrap();
    assert!(req.checks.is_empty());
    assert!(req.attachments.is_empty());
}

#[test]
fn test_artifact_serializes_transparently() {
    let artifact = Artifact("<p>x</p>".into());
    assert_eq!(serde_json::to_string(&artifact).unwrap(), r#""<p>x</p>""#);
}

#[test]
fn test_report_payload_round_trip() {
    let payload = ReportPayload {
        email: "dev@example.com".into(),
        task: "My Task".into(),
        round: 1,
        nonce: "abc123".into(),
        repo_url: "https://github.com/owner/my-task".into(),
        commit_sha: "deadbeef".into(),
        pages_url: "https://owner.github.io/my-task/".into(),
    };

    let serialized = serde_json::to_string(&payload).unwrap();
    let back: ReportPayload = serde_json::from_str(&serialized).unwrap();
    assert_eq!(back.nonce, payload.nonce);
    assert_eq!(back.commit_sha, payload.commit_sha);
}

#[test]
fn test_error_messages_name_the_failure() {
    assert_eq!(
        PipelineError::ProjectNotFound("my-task".into()).to_string(),
        "no project found for slug 'my-task'"
    );
    assert_eq!(PipelineError::UnknownRound(3).to_string(), "unknown round 3");
}

#[test]
fn test_slug_and_fence_end_to_end() {
    assert_eq!(project_slug("A/B Test!!"), "a-b-test");
    assert_eq!(extract_fenced_block("```html\n<p>x</p>\n```"), "<p>x</p>");
}
