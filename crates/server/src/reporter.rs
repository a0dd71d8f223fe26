use std::time::Duration;

use pageforge_core::ReportPayload;
use tracing::{info, warn};

/// Delivers the completion payload to the caller-supplied callback URL.
///
/// One POST per schedule entry; success is exactly HTTP 200. The schedule's
/// entry `n` is slept after failed attempt `n`; the final failure returns
/// without a terminal sleep. Exhaustion is reported to the caller as `false`
/// and goes no further (the pipeline is fire-and-forget).
pub struct Reporter<'a> {
    client: &'a reqwest::Client,
    schedule: &'a [Duration],
}

impl<'a> Reporter<'a> {
    pub fn new(client: &'a reqwest::Client, schedule: &'a [Duration]) -> Self {
        Self { client, schedule }
    }

    pub async fn report(&self, url: &str, payload: &ReportPayload) -> bool {
        let attempts = self.schedule.len();
        for (i, delay) in self.schedule.iter().enumerate() {
            let attempt = i + 1;
            match self.client.post(url).json(payload).send().await {
                Ok(response) if response.status() == reqwest::StatusCode::OK => {
                    info!(attempt, "report delivered");
                    return true;
                }
                Ok(response) => {
                    warn!(attempt, status = %response.status(), "report rejected")
                }
                Err(e) => warn!(attempt, error = %e, "report send failed"),
            }
            if attempt < attempts {
                tokio::time::sleep(*delay).await;
            }
        }
        false
    }
}
