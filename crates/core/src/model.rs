//! Wire types for the webhook, callback and hosting flows.

use serde::{Deserialize, Serialize};

/// Inbound webhook body describing one round of a task.
///
/// Immutable once received; the pipeline only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Shared secret; checked synchronously before anything else runs.
    pub secret: String,
    /// Requester identity. Also used as the git author/committer.
    pub email: String,
    /// Human task name; the project slug is derived from it.
    pub task: String,
    /// 1 = initial creation, 2 = revision of prior output.
    pub round: u32,
    /// Idempotency token, echoed back in the report.
    pub nonce: String,
    /// Free-text description of the application to build.
    pub brief: String,
    /// Ordered, human-readable constraints. Preserved for display only.
    #[serde(default)]
    pub checks: Vec<String>,
    /// Inline attachments to summarize into the prompt.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Callback URL that receives the final [`ReportPayload`].
    pub evaluation_url: String,
}

/// Inline attachment; `url` is a data URI carrying a base64 payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    /// Display name, e.g. "wireframe.txt".
    pub name: String,
    /// `data:<mime>;base64,<payload>`
    pub url: String,
}

/// The rendered single-file application produced for one round.
///
/// One text blob (markup/script/style combined); no internal structure is
/// validated anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact(pub String);

impl Artifact {
    /// Borrow the rendered document.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stable identifiers returned by a publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResult {
    /// Canonical project URL on the hosting platform.
    pub repo_url: String,
    /// Head commit after the push.
    pub commit_sha: String,
    /// Public URL of the published site.
    pub pages_url: String,
    /// Owning account identifier.
    pub owner: String,
}

/// Terminal payload delivered to the caller-supplied evaluation URL.
///
/// Its successful delivery is the only durable commit of the whole flow;
/// there is no persistent store otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    /// Requester identity, echoed from the request.
    pub email: String,
    /// Task identifier, echoed from the request.
    pub task: String,
    /// Round that produced this report.
    pub round: u32,
    /// Idempotency token, echoed from the request.
    pub nonce: String,
    /// Canonical project URL.
    pub repo_url: String,
    /// Head commit after the push.
    pub commit_sha: String,
    /// Public URL of the published site.
    pub pages_url: String,
}

/// Immediate acknowledgment sent before the pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    /// Always "accepted"; the real outcome is delivered via the callback.
    pub status: String,
    /// Echo of the task name.
    pub task: String,
    /// Echo of the round.
    pub round: u32,
}

/// Body of the unauthenticated health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "ok".
    pub status: String,
    /// Server time, unix epoch milliseconds.
    pub timestamp_ms: i64,
}
