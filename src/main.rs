use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use miette::{Context, IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

use prlens_core::PrlensConfig;
use prlens_github::GitHubClient;
use prlens_server::AppState;
use prlens_summary::llm::LlmClient;
use prlens_summary::AnalysisPipeline;

#[derive(Parser)]
#[command(
    name = "prlens",
    version,
    about = "AI-powered pull request summary and risk analysis service",
    long_about = "prlens exposes a single HTTP endpoint that fetches a GitHub pull request's\n\
                   diff, asks an LLM for a natural-language summary, and returns it together\n\
                   with a 1-5 risk score.\n\n\
                   Examples:\n  \
                     prlens                          Serve on 0.0.0.0:3000\n  \
                     prlens --port 8080              Serve on a custom port\n  \
                     prlens --config prlens.toml     Use an explicit config file\n\n\
                   Secrets come from the config file or from the GITHUB_TOKEN and\n\
                   OPENAI_API_KEY environment variables."
)]
struct Cli {
    /// Path to configuration file (default: .prlens.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and the PORT env var)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    let host = cli.host.unwrap_or_else(|| config.server.host.clone());
    let port = resolve_port(cli.port, config.server.port)?;

    // Fail fast on missing secrets before binding the listener.
    let github = GitHubClient::new(
        config.github.token.as_deref(),
        Some(&config.github.api_url),
    )
    .into_diagnostic()
    .wrap_err("setting up the GitHub client")?;
    let llm = LlmClient::new(&config.llm)
        .into_diagnostic()
        .wrap_err("setting up the LLM client")?;

    let state = Arc::new(AppState {
        pipeline: AnalysisPipeline::new(github, llm),
    });
    let app = prlens_server::app(state);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .into_diagnostic()
        .wrap_err("parsing the bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .into_diagnostic()
        .wrap_err("binding the listener")?;

    tracing::info!(%addr, model = %config.llm.model, "prlens listening");
    axum::serve(listener, app)
        .await
        .into_diagnostic()
        .wrap_err("serving HTTP")?;

    Ok(())
}

/// Load configuration from an explicit path, or from `.prlens.toml` when it
/// exists, falling back to defaults otherwise.
///
/// An explicit `--config` that cannot be read is an error; the implicit
/// default path is allowed to be absent.
fn load_config(path: Option<&std::path::Path>) -> Result<PrlensConfig> {
    match path {
        Some(p) => PrlensConfig::from_file(p)
            .into_diagnostic()
            .wrap_err_with(|| format!("loading config from {}", p.display())),
        None => {
            let default = std::path::Path::new(".prlens.toml");
            if default.exists() {
                PrlensConfig::from_file(default)
                    .into_diagnostic()
                    .wrap_err("loading .prlens.toml")
            } else {
                Ok(PrlensConfig::default())
            }
        }
    }
}

/// Resolve the port with flag > `PORT` env var > config precedence.
fn resolve_port(flag: Option<u16>, config_port: u16) -> Result<u16> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match std::env::var("PORT") {
        Ok(raw) => raw
            .parse()
            .into_diagnostic()
            .wrap_err("PORT must be a valid u16"),
        Err(_) => Ok(config_port),
    }
}
