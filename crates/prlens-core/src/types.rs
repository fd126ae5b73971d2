use serde::{Deserialize, Serialize};

/// An incoming request to analyze a pull request.
///
/// Unknown fields are rejected during deserialization so that malformed
/// client payloads fail loudly instead of being silently accepted.
///
/// # Examples
///
/// ```
/// use prlens_core::AnalysisRequest;
///
/// let request: AnalysisRequest =
///     serde_json::from_str(r#"{"repo":"octocat/hello-world","pr_number":42}"#).unwrap();
/// assert_eq!(request.repo, "octocat/hello-world");
/// assert_eq!(request.pr_number, 42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisRequest {
    /// Repository identifier in `owner/repo` form.
    pub repo: String,
    /// Pull request number (must be >= 1).
    pub pr_number: u64,
}

/// The result of analyzing a pull request.
///
/// Immutable once constructed; produced once per request.
///
/// # Examples
///
/// ```
/// use prlens_core::AnalysisResult;
///
/// let result = AnalysisResult {
///     summary: "Adds input validation to the login form.".into(),
///     risk_score: 2,
/// };
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["risk_score"], 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Natural-language summary of the changes.
    pub summary: String,
    /// Risk score in the inclusive range `[1, 5]`.
    pub risk_score: u8,
}
