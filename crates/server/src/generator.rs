use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use pageforge_core::{extract_fenced_block, Artifact, Attachment, PipelineError};

use crate::config::Config;

/// Only this much of each decoded attachment is forwarded into the prompt.
const ATTACHMENT_PREFIX_CHARS: usize = 4_096;

/// Client for the text-generation endpoint. Stateless; one outbound POST per
/// render/revise, no retry at this layer.
pub struct LlmClient<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
}

impl<'a> LlmClient<'a> {
    pub fn new(config: &'a Config, client: &'a reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Renders a fresh single-file application from a brief, a checklist, and
    /// optional attachments.
    pub async fn render(
        &self,
        brief: &str,
        checks: &[String],
        attachments: &[Attachment],
    ) -> Result<Artifact, PipelineError> {
        self.complete(render_prompt(brief, checks, attachments)).await
    }

    /// Revises an existing application against new requirements. The model is
    /// told to improve the given document, not rewrite it.
    pub async fn revise(
        &self,
        existing: &Artifact,
        brief: &str,
        checks: &[String],
    ) -> Result<Artifact, PipelineError> {
        self.complete(revise_prompt(existing, brief, checks)).await
    }

    async fn complete(&self, prompt: String) -> Result<Artifact, PipelineError> {
        let body = serde_json::json!({
            "model": self.config.llm_model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": self.config.llm_max_tokens,
            "temperature": self.config.llm_temperature,
        });

        let url = format!(
            "{}/chat/completions",
            self.config.llm_base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.llm_api_key),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::GenerationFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::GenerationFailed(format!(
                "generation endpoint error ({status}): {body}"
            )));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| PipelineError::GenerationFailed(e.to_string()))?;
        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string();

        Ok(Artifact(extract_fenced_block(&content)))
    }
}

fn render_prompt(brief: &str, checks: &[String], attachments: &[Attachment]) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Build a complete single-file web application (HTML, CSS and JavaScript \
         in one document). Respond with the full document in one fenced code block.\n\n",
    );
    prompt.push_str("## Task\n\n");
    prompt.push_str(brief);
    prompt.push_str("\n\n");
    push_checks(&mut prompt, checks);

    let summaries: Vec<String> = attachments.iter().filter_map(attachment_summary).collect();
    if !summaries.is_empty() {
        prompt.push_str("## Attachments\n\n");
        for s in summaries {
            prompt.push_str(&s);
            prompt.push_str("\n\n");
        }
    }
    prompt
}

fn revise_prompt(existing: &Artifact, brief: &str, checks: &[String]) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Below is an existing single-file web application. Improve it to meet the \
         new requirements; do not rewrite it from scratch. Respond with the full \
         updated document in one fenced code block.\n\n",
    );
    prompt.push_str("## Current application\n\n```html\n");
    prompt.push_str(existing.as_str());
    prompt.push_str("\n```\n\n## New requirements\n\n");
    prompt.push_str(brief);
    prompt.push_str("\n\n");
    push_checks(&mut prompt, checks);
    prompt
}

fn push_checks(prompt: &mut String, checks: &[String]) {
    if checks.is_empty() {
        return;
    }
    prompt.push_str("## Checks\n\n");
    for check in checks {
        prompt.push_str("- ");
        prompt.push_str(check);
        prompt.push('\n');
    }
    prompt.push('\n');
}

/// Decodes a data-URI attachment and returns a bounded prefix for the prompt.
/// Attachments that are not base64 data URIs (or not valid base64) are skipped.
fn attachment_summary(att: &Attachment) -> Option<String> {
    let (_, payload) = att.url.split_once("base64,")?;
    let bytes = BASE64.decode(payload.trim()).ok()?;
    let text = String::from_utf8_lossy(&bytes);
    let prefix: String = text.chars().take(ATTACHMENT_PREFIX_CHARS).collect();
    Some(format!("### {}\n\n{}", att.name, prefix))
}
