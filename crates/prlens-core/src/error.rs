/// Errors that can occur across the prlens service.
///
/// Each variant corresponds to one failure class in the analysis pipeline.
/// Library crates use this type directly; the server crate maps variants to
/// HTTP status codes, and the binary converts to `miette` diagnostics at the
/// boundary.
///
/// # Examples
///
/// ```
/// use prlens_core::PrlensError;
///
/// let err = PrlensError::Config("missing API key".into());
/// assert!(err.to_string().contains("missing API key"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PrlensError {
    /// Filesystem I/O failure (configuration loading).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration, including absent secrets.
    #[error("configuration error: {0}")]
    Config(String),

    /// Client input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested resource does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// A non-404 failure from an upstream API or the transport layer.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The model response could not be parsed as JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// The model response parsed but lacks the required fields.
    #[error("invalid format: {0}")]
    Format(String),

    /// The generation call to the LLM failed.
    #[error("generation error: {0}")]
    Generation(String),

    /// Catch-all for unclassified pipeline failures.
    #[error("processing error: {0}")]
    Processing(String),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
