use std::time::Duration;

use prlens_core::PrlensError;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub client for fetching pull request diffs.
///
/// Holds a single `reqwest` client with a bounded timeout. Every call is a
/// single attempt; there are no retries and no caching.
///
/// # Examples
///
/// ```no_run
/// use prlens_github::GitHubClient;
///
/// let client = GitHubClient::new(Some("ghp_xxxx"), None).unwrap();
/// ```
pub struct GitHubClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl GitHubClient {
    /// Create a client from an explicit token or the `GITHUB_TOKEN` environment variable.
    ///
    /// `api_url` overrides the default `https://api.github.com` base, which is
    /// mainly useful for GitHub Enterprise hosts and tests.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::Config`] if no token is available, or
    /// [`PrlensError::Upstream`] if the HTTP client cannot be built. The token
    /// check happens here, before any network call is ever attempted.
    pub fn new(token: Option<&str>, api_url: Option<&str>) -> Result<Self, PrlensError> {
        let token = match token {
            Some(t) => t.to_string(),
            None => std::env::var("GITHUB_TOKEN").map_err(|_| {
                PrlensError::Config(
                    "GitHub token not configured. Set [github].token or the GITHUB_TOKEN env var"
                        .into(),
                )
            })?,
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PrlensError::Upstream(format!("failed to create HTTP client: {e}")))?;

        let api_url = api_url
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            token,
            api_url,
        })
    }

    /// Fetch the unified diff for a pull request.
    ///
    /// Issues a single GET to the pull request resource with the
    /// `application/vnd.github.v3.diff` media type, returning the diff as
    /// plain text.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::NotFound`] when the upstream answers 404, and
    /// [`PrlensError::Upstream`] on any other non-success response or
    /// transport failure.
    pub async fn get_pr_diff(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> Result<String, PrlensError> {
        let url = format!("{}/repos/{owner}/{repo}/pulls/{pr_number}", self.api_url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.v3.diff")
            .header("Authorization", format!("Bearer {}", self.token))
            .header("User-Agent", "prlens")
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, owner, repo, pr_number, "PR diff request failed");
                PrlensError::Upstream(format!("failed to fetch PR diff: {e}"))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!(owner, repo, pr_number, "PR not found upstream");
            return Err(PrlensError::NotFound("PR not found".into()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, owner, repo, pr_number, "GitHub API error");
            return Err(PrlensError::Upstream(format!(
                "failed to fetch PR diff: GitHub API error {status}: {body}"
            )));
        }

        response
            .text()
            .await
            .map_err(|e| PrlensError::Upstream(format!("failed to read diff response: {e}")))
    }
}

/// Split a repository identifier into its `(owner, repo)` components.
///
/// The identifier must contain exactly one `/` with non-empty segments on
/// both sides.
///
/// # Errors
///
/// Returns [`PrlensError::Validation`] if the format is invalid.
///
/// # Examples
///
/// ```
/// use prlens_github::parse_repo;
///
/// let (owner, repo) = parse_repo("octocat/hello-world").unwrap();
/// assert_eq!(owner, "octocat");
/// assert_eq!(repo, "hello-world");
///
/// assert!(parse_repo("not-a-repo").is_err());
/// ```
pub fn parse_repo(repo: &str) -> Result<(String, String), PrlensError> {
    let mut parts = repo.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(PrlensError::Validation(
            "Invalid repository format. Use owner/repo".into(),
        )),
    }
}
