use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// All tunables and credentials, read once at process start and passed by
/// reference into each component. No ambient lookups happen after this.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: String,
    /// Shared secret every webhook body must carry.
    pub webhook_secret: String,

    pub llm_base_url: String,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,

    pub hosting_base_url: String,
    pub hosting_token: String,
    /// Account that owns the created projects.
    pub hosting_owner: String,

    /// Root for per-attempt publish workspaces.
    pub workspaces_root: PathBuf,

    /// Fixed wait after a publish so the platform's asynchronous site build
    /// can finish before the report goes out. Contractually 10 seconds.
    pub settle_delay: Duration,

    /// Callback retry schedule; contractually {1,2,4,...,512} seconds.
    pub report_backoff: Vec<Duration>,
}

impl Config {
    /// Builds the runtime configuration, failing fast on missing secrets.
    pub fn from_env(listen: String, workspaces_root: PathBuf) -> Result<Self> {
        Ok(Self {
            listen,
            webhook_secret: require("PAGEFORGE_SECRET")?,
            llm_base_url: env_or("PAGEFORGE_LLM_BASE_URL", "https://api.openai.com/v1"),
            llm_api_key: require("PAGEFORGE_LLM_API_KEY")?,
            llm_model: env_or("PAGEFORGE_LLM_MODEL", "gpt-4o"),
            llm_max_tokens: 8_192,
            llm_temperature: 0.2,
            hosting_base_url: env_or("PAGEFORGE_HOSTING_BASE_URL", "https://api.github.com"),
            hosting_token: require("PAGEFORGE_HOSTING_TOKEN")?,
            hosting_owner: require("PAGEFORGE_HOSTING_OWNER")?,
            workspaces_root,
            settle_delay: Duration::from_secs(10),
            report_backoff: pageforge_core::report_backoff(),
        })
    }
}

fn require(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("missing environment variable {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
