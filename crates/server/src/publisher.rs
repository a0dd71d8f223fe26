use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pageforge_core::{project_slug, Artifact, PipelineError, PublishResult, TaskRequest};
use tracing::{info, warn};
use ulid::Ulid;

use crate::config::Config;
use crate::generator::LlmClient;
use crate::hosting::{HostingClient, Repo};
use crate::scaffold;
use crate::vcs::VersionControl;

/// Publishes a rendered artifact as a hosted project: repository plus static
/// site, committed and pushed through the [`VersionControl`] seam.
pub struct Publisher<'a> {
    config: &'a Config,
    hosting: &'a HostingClient<'a>,
    llm: &'a LlmClient<'a>,
    vcs: &'a dyn VersionControl,
}

impl<'a> Publisher<'a> {
    pub fn new(
        config: &'a Config,
        hosting: &'a HostingClient<'a>,
        llm: &'a LlmClient<'a>,
        vcs: &'a dyn VersionControl,
    ) -> Self {
        Self {
            config,
            hosting,
            llm,
            vcs,
        }
    }

    /// Round 1: creates a new remote project for the task and publishes the
    /// artifact into it.
    pub async fn create_project(
        &self,
        req: &TaskRequest,
        artifact: &Artifact,
    ) -> Result<PublishResult, PipelineError> {
        let slug = project_slug(&req.task);
        let repo = self
            .hosting
            .create_repo(&slug, first_line(&req.brief))
            .await
            .map_err(publish_err)?;
        info!(slug = %slug, "created project");

        self.publish(req, &slug, &repo, artifact).await
    }

    /// Round 2: locates the existing project for the task, revises its prior
    /// artifact, and publishes the update. Performs no write when the project
    /// is absent.
    pub async fn update_project(&self, req: &TaskRequest) -> Result<PublishResult, PipelineError> {
        let slug = project_slug(&req.task);
        let repo = self
            .hosting
            .find_repo(&slug)
            .await
            .map_err(publish_err)?
            .ok_or_else(|| PipelineError::ProjectNotFound(slug.clone()))?;

        let existing = Artifact(self.hosting.fetch_artifact(&slug).await.map_err(publish_err)?);
        let revised = self.llm.revise(&existing, &req.brief, &req.checks).await?;
        info!(slug = %slug, "revised artifact");

        self.publish(req, &slug, &repo, &revised).await
    }

    /// Materializes a per-attempt working copy, writes the support files,
    /// commits, pushes, and toggles the pages site (best-effort). The working
    /// copy is removed on both success and failure paths.
    async fn publish(
        &self,
        req: &TaskRequest,
        slug: &str,
        repo: &Repo,
        artifact: &Artifact,
    ) -> Result<PublishResult, PipelineError> {
        let workdir = self.attempt_workdir(slug);
        let result = self.publish_inner(req, slug, repo, artifact, &workdir).await;

        if let Err(e) = tokio::fs::remove_dir_all(&workdir).await {
            if workdir.exists() {
                warn!(workdir = %workdir.display(), error = %e, "workspace cleanup failed");
            }
        }

        result.map_err(publish_err)
    }

    async fn publish_inner(
        &self,
        req: &TaskRequest,
        slug: &str,
        repo: &Repo,
        artifact: &Artifact,
        workdir: &Path,
    ) -> Result<PublishResult> {
        if let Some(parent) = workdir.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("create workspaces root")?;
        }

        let remote = self.hosting.authenticated_remote(repo);
        self.vcs.clone_into(&remote, workdir).await?;

        scaffold::write_support_files(workdir, req, artifact).await?;

        let message = format!("round {}: {}", req.round, slug);
        self.vcs.commit_all(workdir, &req.email, &message).await?;
        self.vcs.push(workdir).await?;
        let commit_sha = self.vcs.head_revision(workdir).await?;

        if let Err(e) = self.hosting.enable_pages(slug).await {
            warn!(slug = %slug, error = %e, "pages toggle failed (continuing)");
        }

        Ok(PublishResult {
            repo_url: repo.html_url.clone(),
            commit_sha,
            pages_url: self.hosting.pages_url(slug),
            owner: repo.owner.login.clone(),
        })
    }

    /// Isolated directory for one publish attempt; never reused across
    /// attempts or rounds.
    fn attempt_workdir(&self, slug: &str) -> PathBuf {
        self.config
            .workspaces_root
            .join(format!("{slug}-{}", Ulid::new()))
    }
}

fn publish_err(e: impl std::fmt::Display) -> PipelineError {
    // Alternate formatting keeps anyhow's context chain in the message.
    PipelineError::PublishFailed(format!("{e:#}"))
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
