use std::path::Path;

use anyhow::{Context, Result};
use pageforge_core::{project_slug, Artifact, TaskRequest};

const LICENSE_MIT: &str = include_str!("templates/LICENSE");

/// Writes the fixed support-file set into a working copy: the artifact as the
/// site's entry document plus license, readme, ignore list and manifest.
pub async fn write_support_files(
    workdir: &Path,
    req: &TaskRequest,
    artifact: &Artifact,
) -> Result<()> {
    let slug = project_slug(&req.task);

    write(workdir, "index.html", artifact.as_str()).await?;
    write(workdir, "LICENSE", LICENSE_MIT).await?;
    write(workdir, "README.md", &render_readme(req)).await?;
    write(workdir, ".gitignore", "node_modules/\n.DS_Store\n*.log\n").await?;

    let manifest = serde_json::json!({
        "name": slug,
        "version": format!("{}.0.0", req.round),
        "private": true,
        "description": first_line(&req.brief),
    });
    write(
        workdir,
        "manifest.json",
        &serde_json::to_string_pretty(&manifest).context("serialize manifest")?,
    )
    .await?;

    Ok(())
}

async fn write(workdir: &Path, name: &str, content: &str) -> Result<()> {
    tokio::fs::write(workdir.join(name), content)
        .await
        .with_context(|| format!("write {name}"))
}

/// Readme summarizing brief, checklist and usage.
pub fn render_readme(req: &TaskRequest) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", req.task));
    out.push_str(&req.brief);
    out.push_str("\n\n");

    if !req.checks.is_empty() {
        out.push_str("## Checks\n\n");
        for check in &req.checks {
            out.push_str(&format!("- {check}\n"));
        }
        out.push('\n');
    }

    out.push_str("## Usage\n\n");
    out.push_str("Open `index.html` in a browser, or visit the published site.\n");
    out
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
