use prlens_core::{AnalysisRequest, AnalysisResult, PrlensError};
use prlens_github::{parse_repo, GitHubClient};

use crate::llm::{ChatMessage, LlmClient, Role};
use crate::prompt;

/// Analysis orchestrator driving the full pipeline.
///
/// Each request walks Validate -> Fetch -> Generate, in that order, with no
/// retries and no state carried between requests. The first failing stage
/// short-circuits the rest.
pub struct AnalysisPipeline {
    github: GitHubClient,
    llm: LlmClient,
}

impl AnalysisPipeline {
    /// Create a new pipeline from the two upstream clients.
    pub fn new(github: GitHubClient, llm: LlmClient) -> Self {
        Self { github, llm }
    }

    /// Analyze a pull request: validate the request, fetch the diff, and
    /// generate the summary.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::Validation`] for a malformed `repo` or a zero
    /// `pr_number` without touching the network. Fetch errors
    /// ([`PrlensError::NotFound`], [`PrlensError::Config`],
    /// [`PrlensError::Upstream`]) propagate unchanged, as do the classified
    /// generation errors; anything unclassified surfaces as
    /// [`PrlensError::Processing`].
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, PrlensError> {
        let (owner, repo) = parse_repo(&request.repo)?;
        if request.pr_number == 0 {
            return Err(PrlensError::Validation(
                "pr_number must be a positive integer".into(),
            ));
        }

        tracing::info!(owner, repo, pr_number = request.pr_number, "analyzing pull request");

        let diff = self
            .github
            .get_pr_diff(&owner, &repo, request.pr_number)
            .await?;

        self.generate_summary(&diff).await.map_err(|e| match e {
            e @ (PrlensError::Parse(_)
            | PrlensError::Format(_)
            | PrlensError::Generation(_)
            | PrlensError::Config(_)
            | PrlensError::Upstream(_)
            | PrlensError::NotFound(_)
            | PrlensError::Validation(_)) => e,
            other => {
                tracing::error!(error = %other, "unclassified generation failure");
                PrlensError::Processing("failed to generate PR summary".into())
            }
        })
    }

    /// Generate a summary and risk score for a diff.
    ///
    /// Sends a single prompt to the model and parses its reply. The diff is
    /// truncated to [`prompt::MAX_DIFF_CHARS`] before prompting.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::Generation`] if the model call fails,
    /// [`PrlensError::Parse`] if the reply is not JSON, or
    /// [`PrlensError::Format`] if the reply lacks the required fields.
    pub async fn generate_summary(&self, diff: &str) -> Result<AnalysisResult, PrlensError> {
        let messages = vec![ChatMessage {
            role: Role::User,
            content: prompt::build_summary_prompt(diff),
        }];

        let response = self.llm.chat(messages).await?;
        let result = prompt::parse_model_response(&response)?;

        tracing::info!(
            risk_score = result.risk_score,
            model = self.llm.model(),
            "summary generated"
        );
        Ok(result)
    }
}
