//! GitLab issue service implementation

use crate::error::{Error, Result};
use crate::platform::{IssueService, REQUEST_TIMEOUT};
use crate::types::{
    AUTO_GENERATED_LABEL, CreatedIssue, ExistingIssue, NewIssue, Platform, PlatformConfig,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabIssueService {
    client: Client,
    token: String,
    api_base: String,
    config: PlatformConfig,
    project_path: String,
}

#[derive(Deserialize)]
struct GitLabIssue {
    iid: u64,
    title: String,
    web_url: String,
    description: Option<String>,
}

#[derive(Serialize)]
struct CreateIssuePayload<'a> {
    title: &'a str,
    description: &'a str,
    labels: String,
}

/// Issues fetched per page while searching for a title
const PAGE_SIZE: usize = 100;

impl GitLabIssueService {
    /// Create a new GitLab service
    pub fn new(token: String, owner: String, repo: String, host: Option<String>) -> Self {
        let host = host.unwrap_or_else(|| "gitlab.com".to_string());
        let api_base = format!("https://{host}/api/v4");
        let host = if host == "gitlab.com" { None } else { Some(host) };
        Self::build(token, owner, repo, host, api_base)
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(token: String, owner: String, repo: String, api_base: &str) -> Self {
        Self::build(
            token,
            owner,
            repo,
            None,
            api_base.trim_end_matches('/').to_string(),
        )
    }

    fn build(
        token: String,
        owner: String,
        repo: String,
        host: Option<String>,
        api_base: String,
    ) -> Self {
        let project_path = format!("{owner}/{repo}");

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            api_base,
            config: PlatformConfig {
                platform: Platform::GitLab,
                owner,
                repo,
                host,
            },
            project_path,
        }
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/projects/{}/issues",
            self.api_base,
            urlencoding::encode(&self.project_path)
        )
    }
}

#[async_trait]
impl IssueService for GitLabIssueService {
    async fn find_auto_generated_issue_by_title(
        &self,
        title: &str,
    ) -> Result<Option<ExistingIssue>> {
        let url = self.issues_url();
        let per_page = PAGE_SIZE.to_string();

        // `search` is a fuzzy narrowing; the exact comparison happens below
        for page in 1_u32.. {
            let page_param = page.to_string();
            let issues: Vec<GitLabIssue> = self
                .client
                .get(&url)
                .header("PRIVATE-TOKEN", &self.token)
                .query(&[
                    ("labels", AUTO_GENERATED_LABEL),
                    ("search", title),
                    ("in", "title"),
                    ("scope", "all"),
                    ("order_by", "created_at"),
                    ("sort", "desc"),
                    ("per_page", per_page.as_str()),
                    ("page", page_param.as_str()),
                ])
                .send()
                .await?
                .error_for_status()
                .map_err(|e| Error::GitLabApi(e.to_string()))?
                .json()
                .await?;
            debug!(page, count = issues.len(), "fetched auto-generated issues");

            let page_len = issues.len();
            if let Some(issue) = issues.into_iter().find(|issue| issue.title == title) {
                return Ok(Some(ExistingIssue {
                    number: issue.iid,
                    html_url: issue.web_url,
                    body: issue.description.unwrap_or_default(),
                }));
            }

            if page_len < PAGE_SIZE {
                break;
            }
        }

        Ok(None)
    }

    async fn submit_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let payload = CreateIssuePayload {
            title: &issue.title,
            description: &issue.body,
            labels: issue.labels.join(","),
        };

        let created: GitLabIssue = self
            .client
            .post(self.issues_url())
            .header("PRIVATE-TOKEN", &self.token)
            .json(&payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        Ok(CreatedIssue {
            number: created.iid,
            html_url: created.web_url,
        })
    }

    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        let url = format!("{}/{issue_number}/notes", self.issues_url());

        self.client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?;

        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
