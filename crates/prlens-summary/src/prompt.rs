use prlens_core::{AnalysisResult, PrlensError};

/// Maximum number of characters of diff text sent to the model.
pub const MAX_DIFF_CHARS: usize = 30_000;

/// Marker appended to a diff that was shortened to fit [`MAX_DIFF_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n[Diff was truncated due to length]";

/// Risk score used when the model returns a non-numeric value.
pub const DEFAULT_RISK_SCORE: u8 = 3;

/// Cap a diff at [`MAX_DIFF_CHARS`] characters, appending the truncation
/// marker when it was shortened.
///
/// # Examples
///
/// ```
/// use prlens_summary::prompt::{truncate_diff, MAX_DIFF_CHARS, TRUNCATION_MARKER};
///
/// assert_eq!(truncate_diff("+short diff"), "+short diff");
///
/// let long = "x".repeat(MAX_DIFF_CHARS + 1);
/// assert!(truncate_diff(&long).ends_with(TRUNCATION_MARKER));
/// ```
pub fn truncate_diff(diff: &str) -> String {
    if diff.len() <= MAX_DIFF_CHARS {
        return diff.to_string();
    }
    // len > MAX_DIFF_CHARS bytes can still be <= MAX_DIFF_CHARS chars.
    match diff.char_indices().nth(MAX_DIFF_CHARS) {
        Some((cut, _)) => format!("{}{}", &diff[..cut], TRUNCATION_MARKER),
        None => diff.to_string(),
    }
}

/// Build the prompt asking the model to summarize a diff and score its risk.
///
/// The diff is truncated before being embedded. The prompt instructs the
/// model to reply with a JSON object carrying `summary` and `risk_score`
/// fields; [`parse_model_response`] handles the replies that do not follow
/// that instruction cleanly.
///
/// # Examples
///
/// ```
/// use prlens_summary::prompt::build_summary_prompt;
///
/// let prompt = build_summary_prompt("+new line");
/// assert!(prompt.contains("+new line"));
/// assert!(prompt.contains("risk_score"));
/// ```
pub fn build_summary_prompt(diff: &str) -> String {
    let truncated = truncate_diff(diff);
    format!(
        "Analyze the following GitHub PR diff and provide:\n\
         1. A 100-word summary of the changes\n\
         2. A risk score from 1 (low risk) to 5 (high risk)\n\n\
         Format your response as a JSON object with 'summary' and 'risk_score' fields.\n\n\
         Diff:\n{truncated}"
    )
}

/// Parse the model's free-form reply into an [`AnalysisResult`].
///
/// Models do not reliably emit raw JSON, so extraction walks an ordered
/// fallback chain: a fenced ```` ```json ```` block, then the first-to-last
/// brace-delimited substring, then the whole reply. Leftover fence markers
/// are stripped before parsing.
///
/// # Errors
///
/// Returns [`PrlensError::Parse`] when no candidate parses as JSON, and
/// [`PrlensError::Format`] when the parsed object lacks a non-empty
/// `summary` or a `risk_score` field. A present-but-non-numeric
/// `risk_score` is not an error; it falls back to [`DEFAULT_RISK_SCORE`].
///
/// # Examples
///
/// ```
/// use prlens_summary::prompt::parse_model_response;
///
/// let reply = "```json\n{\"summary\": \"Adds a test\", \"risk_score\": 2}\n```";
/// let result = parse_model_response(reply).unwrap();
/// assert_eq!(result.risk_score, 2);
/// ```
pub fn parse_model_response(text: &str) -> Result<AnalysisResult, PrlensError> {
    let candidate = strip_code_fences(extract_json_candidate(text));

    let value: serde_json::Value = serde_json::from_str(&candidate).map_err(|e| {
        tracing::warn!(error = %e, "model reply is not valid JSON");
        PrlensError::Parse("failed to parse model response as JSON".into())
    })?;

    let summary = value
        .get("summary")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty());
    let risk = value.get("risk_score");

    let (Some(summary), Some(risk)) = (summary, risk) else {
        tracing::warn!("model reply missing summary or risk_score");
        return Err(PrlensError::Format("invalid response format".into()));
    };

    Ok(AnalysisResult {
        summary: summary.to_string(),
        risk_score: clamp_risk_score(coerce_risk_score(risk)),
    })
}

/// Pick the most JSON-looking substring of a model reply.
fn extract_json_candidate(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + "```json".len()..];
        let rest = rest.strip_prefix('\n').unwrap_or(rest);
        if let Some(end) = rest.find("```") {
            return rest[..end].trim();
        }
    }
    if let Some(open) = text.find('{') {
        if let Some(close) = text.rfind('}') {
            if close > open {
                return &text[open..=close];
            }
        }
    }
    text
}

/// Remove any leftover markdown fence markers from a JSON candidate.
fn strip_code_fences(s: &str) -> String {
    s.replace("```json", "").replace("```", "").trim().to_string()
}

/// Coerce a JSON `risk_score` value to a number.
///
/// Numbers pass through; numeric strings are parsed; everything else
/// (null, booleans, non-numeric strings like `"high"`) falls back to
/// [`DEFAULT_RISK_SCORE`].
fn coerce_risk_score(value: &serde_json::Value) -> f64 {
    let default = f64::from(DEFAULT_RISK_SCORE);
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(default),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(default),
        _ => default,
    }
}

/// Clamp a risk score into the inclusive range `[1, 5]`.
///
/// Total over all inputs (NaN falls back to [`DEFAULT_RISK_SCORE`]) and
/// idempotent.
///
/// # Examples
///
/// ```
/// use prlens_summary::prompt::clamp_risk_score;
///
/// assert_eq!(clamp_risk_score(0.0), 1);
/// assert_eq!(clamp_risk_score(10.0), 5);
/// assert_eq!(clamp_risk_score(3.0), 3);
/// ```
pub fn clamp_risk_score(score: f64) -> u8 {
    if score.is_nan() {
        return DEFAULT_RISK_SCORE;
    }
    score.clamp(1.0, 5.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_diff_is_untouched() {
        let diff = "+added line\n-removed line";
        assert_eq!(truncate_diff(diff), diff);
    }

    #[test]
    fn long_diff_is_truncated_with_marker() {
        let diff = "a".repeat(MAX_DIFF_CHARS + 100);
        let truncated = truncate_diff(&diff);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            truncated.len(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.len()
        );
    }

    #[test]
    fn diff_at_exact_limit_is_untouched() {
        let diff = "b".repeat(MAX_DIFF_CHARS);
        assert_eq!(truncate_diff(&diff), diff);
    }

    #[test]
    fn multibyte_diff_truncates_on_char_boundary() {
        // 3 bytes per char, so byte length exceeds the limit well before
        // the char count does.
        let diff = "\u{4e16}".repeat(MAX_DIFF_CHARS + 1);
        let truncated = truncate_diff(&diff);
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert_eq!(
            truncated.chars().count(),
            MAX_DIFF_CHARS + TRUNCATION_MARKER.chars().count()
        );
    }

    #[test]
    fn prompt_includes_diff_and_instructions() {
        let prompt = build_summary_prompt("+hello world");
        assert!(prompt.contains("+hello world"));
        assert!(prompt.contains("100-word summary"));
        assert!(prompt.contains("1 (low risk) to 5 (high risk)"));
        assert!(prompt.contains("'summary' and 'risk_score'"));
    }

    #[test]
    fn prompt_truncates_long_diff() {
        let diff = "c".repeat(MAX_DIFF_CHARS * 2);
        let prompt = build_summary_prompt(&diff);
        assert!(prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn parse_raw_json() {
        let reply = r#"{"summary": "Adds logging", "risk_score": 2}"#;
        let result = parse_model_response(reply).unwrap();
        assert_eq!(result.summary, "Adds logging");
        assert_eq!(result.risk_score, 2);
    }

    #[test]
    fn parse_fenced_json() {
        let reply = "```json\n{\"summary\": \"Refactors auth\", \"risk_score\": 4}\n```";
        let result = parse_model_response(reply).unwrap();
        assert_eq!(result.summary, "Refactors auth");
        assert_eq!(result.risk_score, 4);
    }

    #[test]
    fn parse_json_embedded_in_prose() {
        let reply = "Sure! Here is the analysis you asked for:\n\
                     {\"summary\": \"Bumps dependencies\", \"risk_score\": 1}\n\
                     Let me know if you need anything else.";
        let result = parse_model_response(reply).unwrap();
        assert_eq!(result.summary, "Bumps dependencies");
        assert_eq!(result.risk_score, 1);
    }

    #[test]
    fn parse_bare_fenced_json() {
        let reply = "```\n{\"summary\": \"Fixes typo\", \"risk_score\": 1}\n```";
        let result = parse_model_response(reply).unwrap();
        assert_eq!(result.summary, "Fixes typo");
    }

    #[test]
    fn parse_non_json_fails_with_parse_error() {
        let err = parse_model_response("this is not json at all").unwrap_err();
        assert!(matches!(err, PrlensError::Parse(_)));
        assert!(err.to_string().contains("failed to parse model response"));
    }

    #[test]
    fn parse_missing_summary_fails_with_format_error() {
        let err = parse_model_response(r#"{"risk_score": 2}"#).unwrap_err();
        assert!(matches!(err, PrlensError::Format(_)));
        assert!(err.to_string().contains("invalid response format"));
    }

    #[test]
    fn parse_missing_risk_score_fails_with_format_error() {
        let err = parse_model_response(r#"{"summary": "hi"}"#).unwrap_err();
        assert!(matches!(err, PrlensError::Format(_)));
    }

    #[test]
    fn parse_empty_summary_fails_with_format_error() {
        let err = parse_model_response(r#"{"summary": "", "risk_score": 2}"#).unwrap_err();
        assert!(matches!(err, PrlensError::Format(_)));
    }

    #[test]
    fn parse_non_object_fails_with_format_error() {
        let err = parse_model_response("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, PrlensError::Format(_)));
    }

    #[test]
    fn numeric_string_score_is_parsed() {
        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": "2"}"#).unwrap();
        assert_eq!(result.risk_score, 2);
    }

    #[test]
    fn non_numeric_score_defaults_to_three() {
        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": "high"}"#).unwrap();
        assert_eq!(result.risk_score, DEFAULT_RISK_SCORE);
    }

    #[test]
    fn null_score_defaults_to_three() {
        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": null}"#).unwrap();
        assert_eq!(result.risk_score, DEFAULT_RISK_SCORE);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": 99}"#).unwrap();
        assert_eq!(result.risk_score, 5);

        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": -4}"#).unwrap();
        assert_eq!(result.risk_score, 1);
    }

    #[test]
    fn clamp_boundary_values() {
        assert_eq!(clamp_risk_score(0.0), 1);
        assert_eq!(clamp_risk_score(1.0), 1);
        assert_eq!(clamp_risk_score(3.0), 3);
        assert_eq!(clamp_risk_score(5.0), 5);
        assert_eq!(clamp_risk_score(10.0), 5);
        assert_eq!(clamp_risk_score(-5.0), 1);
    }

    #[test]
    fn clamp_is_idempotent() {
        for s in [-10.0, 0.0, 1.0, 2.5, 3.0, 5.0, 42.0] {
            let once = clamp_risk_score(s);
            let twice = clamp_risk_score(f64::from(once));
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn clamp_handles_non_finite_input() {
        assert_eq!(clamp_risk_score(f64::NAN), DEFAULT_RISK_SCORE);
        assert_eq!(clamp_risk_score(f64::INFINITY), 5);
        assert_eq!(clamp_risk_score(f64::NEG_INFINITY), 1);
    }

    #[test]
    fn fractional_score_is_rounded() {
        let result =
            parse_model_response(r#"{"summary": "s", "risk_score": 2.6}"#).unwrap();
        assert_eq!(result.risk_score, 3);
    }
}
