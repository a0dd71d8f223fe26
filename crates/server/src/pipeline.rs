use pageforge_core::{PipelineError, ReportPayload, TaskRequest};
use tracing::info;

use crate::generator::LlmClient;
use crate::hosting::HostingClient;
use crate::http::AppState;
use crate::publisher::Publisher;
use crate::reporter::Reporter;

/// Runs one task request to completion: generate or revise, publish, wait for
/// the platform's site build to settle, then deliver the report.
///
/// Invoked from a detached task after the acknowledgment has gone out; every
/// error returned here is logged at the spawn site and goes nowhere else.
pub async fn run(state: &AppState, req: TaskRequest) -> Result<(), PipelineError> {
    let config = state.config.as_ref();
    let llm = LlmClient::new(config, &state.client);
    let hosting = HostingClient::new(config, &state.client);
    let publisher = Publisher::new(config, &hosting, &llm, state.vcs.as_ref());

    let published = match req.round {
        1 => {
            let artifact = llm.render(&req.brief, &req.checks, &req.attachments).await?;
            publisher.create_project(&req, &artifact).await?
        }
        2 => publisher.update_project(&req).await?,
        other => return Err(PipelineError::UnknownRound(other)),
    };

    info!(
        task = %req.task,
        round = req.round,
        repo = %published.repo_url,
        commit = %published.commit_sha,
        "published; settling"
    );

    // Heuristic wait for the platform's asynchronous site build, not a
    // readiness poll.
    tokio::time::sleep(config.settle_delay).await;

    let payload = ReportPayload {
        email: req.email.clone(),
        task: req.task.clone(),
        round: req.round,
        nonce: req.nonce.clone(),
        repo_url: published.repo_url,
        commit_sha: published.commit_sha,
        pages_url: published.pages_url,
    };

    let reporter = Reporter::new(&state.client, &config.report_backoff);
    if !reporter.report(&req.evaluation_url, &payload).await {
        return Err(PipelineError::ReportDeliveryFailed(
            req.evaluation_url.clone(),
        ));
    }

    info!(task = %req.task, round = req.round, "report delivered");
    Ok(())
}
