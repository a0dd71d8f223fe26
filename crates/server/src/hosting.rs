use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Remote project as returned by the hosting platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub clone_url: String,
    pub html_url: String,
    pub owner: RepoOwner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Token-authenticated client for the hosting platform's REST API.
pub struct HostingClient<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
}

impl<'a> HostingClient<'a> {
    pub fn new(config: &'a Config, client: &'a reqwest::Client) -> Self {
        Self { config, client }
    }

    fn base(&self) -> &str {
        self.config.hosting_base_url.trim_end_matches('/')
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(
            "Authorization",
            format!("Bearer {}", self.config.hosting_token),
        )
        .header("User-Agent", "pageforge")
    }

    /// Creates a new project under the configured owner. `auto_init` gives the
    /// clone a default branch to commit onto.
    pub async fn create_repo(&self, slug: &str, description: &str) -> Result<Repo> {
        let body = serde_json::json!({
            "name": slug,
            "description": description,
            "auto_init": true,
        });
        let response = self
            .auth(self.client.post(format!("{}/user/repos", self.base())))
            .json(&body)
            .send()
            .await
            .context("create repo request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("create repo failed ({status}): {body}"));
        }
        response.json::<Repo>().await.context("decode created repo")
    }

    /// Fetches the owner's project named `slug` directly; a 404 means the
    /// project does not exist. No listing, so owner size never matters.
    pub async fn find_repo(&self, slug: &str) -> Result<Option<Repo>> {
        let url = format!(
            "{}/repos/{}/{}",
            self.base(),
            self.config.hosting_owner,
            slug
        );
        let response = self
            .auth(self.client.get(url))
            .send()
            .await
            .context("fetch repo request")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let repo = response
            .error_for_status()
            .context("fetch repo status")?
            .json::<Repo>()
            .await
            .context("decode repo")?;
        Ok(Some(repo))
    }

    /// Enables static-site publishing from the default branch. Best-effort:
    /// callers log failures and continue.
    pub async fn enable_pages(&self, slug: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/pages",
            self.base(),
            self.config.hosting_owner,
            slug
        );
        let body = serde_json::json!({
            "source": { "branch": "main", "path": "/" }
        });
        let response = self
            .auth(self.client.post(url))
            .json(&body)
            .send()
            .await
            .context("enable pages request")?;

        // 409 means the site already exists (round 2); that is fine.
        if !response.status().is_success() && response.status().as_u16() != 409 {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("enable pages failed ({status}): {body}"));
        }
        Ok(())
    }

    /// Fetches the published entry document for an existing project (round 2
    /// reads the prior artifact without touching a working copy).
    pub async fn fetch_artifact(&self, slug: &str) -> Result<String> {
        let url = format!(
            "{}/repos/{}/{}/contents/index.html",
            self.base(),
            self.config.hosting_owner,
            slug
        );
        let text = self
            .auth(self.client.get(url))
            .header("Accept", "application/vnd.github.raw+json")
            .send()
            .await
            .context("fetch artifact request")?
            .error_for_status()
            .context("fetch artifact status")?
            .text()
            .await
            .context("read artifact body")?;
        Ok(text)
    }

    /// Deterministic public site URL for a slug.
    pub fn pages_url(&self, slug: &str) -> String {
        format!("https://{}.github.io/{}/", self.config.hosting_owner, slug)
    }

    /// Clone URL with the access token embedded, for subprocess pushes.
    /// Never logged.
    pub fn authenticated_remote(&self, repo: &Repo) -> String {
        repo.clone_url.replacen(
            "https://",
            &format!(
                "https://{}:{}@",
                self.config.hosting_owner, self.config.hosting_token
            ),
            1,
        )
    }
}
