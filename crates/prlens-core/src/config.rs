use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PrlensError;

/// Top-level configuration loaded from `.prlens.toml`.
///
/// Supports layered resolution: CLI flags > env vars > config file > defaults.
/// Secrets (the GitHub token and the LLM API key) may live in the file or in
/// the `GITHUB_TOKEN` / `OPENAI_API_KEY` environment variables; the env
/// fallback is resolved by the component constructors, not here.
///
/// # Examples
///
/// ```
/// use prlens_core::PrlensConfig;
///
/// let config = PrlensConfig::default();
/// assert_eq!(config.server.port, 3000);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrlensConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,
    /// LLM provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl PrlensConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::Io`] if the file cannot be read, or
    /// [`PrlensError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prlens_core::PrlensConfig;
    /// use std::path::Path;
    ///
    /// let config = PrlensConfig::from_file(Path::new(".prlens.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, PrlensError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`PrlensError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use prlens_core::PrlensConfig;
    ///
    /// let toml = r#"
    /// [server]
    /// port = 8080
    /// "#;
    /// let config = PrlensConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.server.port, 8080);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, PrlensError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// HTTP server configuration.
///
/// # Examples
///
/// ```
/// use prlens_core::ServerConfig;
///
/// let config = ServerConfig::default();
/// assert_eq!(config.host, "0.0.0.0");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind (default: `"0.0.0.0"`).
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on (default: 3000).
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// GitHub API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token. Falls back to `GITHUB_TOKEN` when unset.
    pub token: Option<String>,
    /// Base URL for API requests (default: `"https://api.github.com"`).
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

fn default_github_api_url() -> String {
    "https://api.github.com".into()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: default_github_api_url(),
        }
    }
}

/// LLM provider configuration.
///
/// # Examples
///
/// ```
/// use prlens_core::LlmConfig;
///
/// let config = LlmConfig::default();
/// assert_eq!(config.model, "gpt-4o");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Provider name (e.g. `"openai"`, `"ollama"`, `"litellm"`).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key for the provider. Falls back to `OPENAI_API_KEY` when unset.
    pub api_key: Option<String>,
    /// Custom base URL for API requests.
    pub base_url: Option<String>,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "gpt-4o".into()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_key: None,
            base_url: None,
        }
    }
}
