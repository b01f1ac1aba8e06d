//! GitHub issue service implementation

use crate::error::{Error, Result};
use crate::platform::{IssueService, REQUEST_TIMEOUT};
use crate::types::{
    AUTO_GENERATED_LABEL, CreatedIssue, ExistingIssue, NewIssue, Platform, PlatformConfig,
};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Issues fetched per page while searching for a title
const PAGE_SIZE: u8 = 100;

/// GitHub service using octocrab
pub struct GitHubIssueService {
    client: Octocrab,
    config: PlatformConfig,
}

/// Subset of the GitHub issue payload we rely on
#[derive(Deserialize)]
struct IssuePayload {
    number: u64,
    title: String,
    html_url: String,
    body: Option<String>,
    /// Present when the "issue" is actually a pull request
    pull_request: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ListIssuesParams<'a> {
    labels: &'a str,
    state: &'a str,
    sort: &'a str,
    direction: &'a str,
    per_page: u8,
    page: u32,
}

#[derive(Serialize)]
struct CreateIssuePayload<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
}

#[derive(Serialize)]
struct CreateCommentPayload<'a> {
    body: &'a str,
}

impl GitHubIssueService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map(|h| format!("https://{h}/api/v3"));
        Self::build(token, owner, repo, host, api_base.as_deref())
    }

    /// Create a service talking to an explicit API base URL
    pub fn with_api_base(token: &str, owner: String, repo: String, api_base: &str) -> Result<Self> {
        Self::build(token, owner, repo, None, Some(api_base))
    }

    fn build(
        token: &str,
        owner: String,
        repo: String,
        host: Option<String>,
        api_base: Option<&str>,
    ) -> Result<Self> {
        let mut builder = Octocrab::builder()
            .personal_token(token.to_string())
            .set_connect_timeout(Some(REQUEST_TIMEOUT))
            .set_read_timeout(Some(REQUEST_TIMEOUT))
            .set_write_timeout(Some(REQUEST_TIMEOUT));

        if let Some(base_url) = api_base {
            builder = builder
                .base_uri(base_url)
                .map_err(|e| Error::GitHubApi(e.to_string()))?;
        }

        let client = builder.build().map_err(|e| Error::GitHubApi(e.to_string()))?;

        Ok(Self {
            client,
            config: PlatformConfig {
                platform: Platform::GitHub,
                owner,
                repo,
                host,
            },
        })
    }

    fn issues_route(&self) -> String {
        format!("/repos/{}/{}/issues", self.config.owner, self.config.repo)
    }
}

#[async_trait]
impl IssueService for GitHubIssueService {
    async fn find_auto_generated_issue_by_title(
        &self,
        title: &str,
    ) -> Result<Option<ExistingIssue>> {
        let route = self.issues_route();

        for page in 1.. {
            let params = ListIssuesParams {
                labels: AUTO_GENERATED_LABEL,
                state: "all",
                sort: "created",
                direction: "desc",
                per_page: PAGE_SIZE,
                page,
            };

            let issues: Vec<IssuePayload> = self.client.get(&route, Some(&params)).await?;
            debug!(page, count = issues.len(), "fetched auto-generated issues");

            let page_len = issues.len();
            let found = issues
                .into_iter()
                .filter(|issue| issue.pull_request.is_none())
                .find(|issue| issue.title == title);

            if let Some(issue) = found {
                return Ok(Some(ExistingIssue {
                    number: issue.number,
                    html_url: issue.html_url,
                    body: issue.body.unwrap_or_default(),
                }));
            }

            if page_len < usize::from(PAGE_SIZE) {
                break;
            }
        }

        Ok(None)
    }

    async fn submit_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
        let payload = CreateIssuePayload {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
        };

        let created: IssuePayload = self
            .client
            .post(self.issues_route(), Some(&payload))
            .await?;

        Ok(CreatedIssue {
            number: created.number,
            html_url: created.html_url,
        })
    }

    async fn add_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        let route = format!("{}/{issue_number}/comments", self.issues_route());

        let _: serde_json::Value = self
            .client
            .post(route, Some(&CreateCommentPayload { body }))
            .await?;
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn issue_json(number: u64, title: &str, body: Option<&str>) -> serde_json::Value {
        json!({
            "number": number,
            "title": title,
            "html_url": format!("https://github.com/owner/repo/issues/{number}"),
            "body": body,
        })
    }

    fn service(server: &Server) -> GitHubIssueService {
        GitHubIssueService::with_api_base("token", "owner".into(), "repo".into(), &server.url())
            .unwrap()
    }

    #[tokio::test]
    async fn test_new_builds_client_with_timeouts() {
        let service = GitHubIssueService::new(
            "token",
            "owner".into(),
            "repo".into(),
            Some("ghe.example.com".into()),
        )
        .unwrap();
        assert_eq!(service.config().host.as_deref(), Some("ghe.example.com"));
        assert_eq!(REQUEST_TIMEOUT.as_secs(), 30);
    }

    #[tokio::test]
    async fn test_find_matches_exact_title_only() {
        let mut server = Server::new_async().await;
        let body = json!([
            issue_json(3, "test error [hash]", None),
            issue_json(2, "Test error [hash]", Some("fixed:1.2.0")),
            issue_json(1, "Test error [hash]", None),
        ]);
        let mock = server
            .mock("GET", "/repos/owner/repo/issues")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("labels".into(), "auto-generated".into()),
                Matcher::UrlEncoded("state".into(), "all".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await;

        let found = service(&server)
            .find_auto_generated_issue_by_title("Test error [hash]")
            .await
            .unwrap()
            .unwrap();

        mock.assert_async().await;
        assert_eq!(found.number, 2);
        assert_eq!(found.body, "fixed:1.2.0");
        assert_eq!(found.html_url, "https://github.com/owner/repo/issues/2");
    }

    #[tokio::test]
    async fn test_find_skips_pull_requests() {
        let mut server = Server::new_async().await;
        let mut pr = issue_json(5, "Test error [hash]", None);
        pr["pull_request"] = json!({ "url": "https://api.github.com/pulls/5" });
        server
            .mock("GET", "/repos/owner/repo/issues")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!([pr]).to_string())
            .create_async()
            .await;

        let found = service(&server)
            .find_auto_generated_issue_by_title("Test error [hash]")
            .await
            .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_propagates_api_errors() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/repos/owner/repo/issues")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(json!({ "message": "Bad credentials" }).to_string())
            .create_async()
            .await;

        let result = service(&server)
            .find_auto_generated_issue_by_title("Test error [hash]")
            .await;

        assert!(matches!(result, Err(Error::GitHubApi(_))));
    }

    #[tokio::test]
    async fn test_submit_issue_sends_label() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/owner/repo/issues")
            .match_body(Matcher::PartialJson(json!({
                "title": "Test error [hash]",
                "body": "details",
                "labels": ["auto-generated"],
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(issue_json(7, "Test error [hash]", Some("details")).to_string())
            .create_async()
            .await;

        let created = service(&server)
            .submit_issue(&NewIssue {
                title: "Test error [hash]".into(),
                body: "details".into(),
                labels: vec![AUTO_GENERATED_LABEL.into()],
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(created.number, 7);
        assert_eq!(created.html_url, "https://github.com/owner/repo/issues/7");
    }

    #[tokio::test]
    async fn test_add_comment() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/repos/owner/repo/issues/4/comments")
            .match_body(Matcher::PartialJson(json!({ "body": "The same as in #1." })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(json!({ "id": 99, "body": "The same as in #1." }).to_string())
            .create_async()
            .await;

        service(&server)
            .add_comment(4, "The same as in #1.")
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
