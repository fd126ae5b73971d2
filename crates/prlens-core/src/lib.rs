//! Core types, configuration, and error handling for the prlens service.
//!
//! This crate provides the shared foundation used by all other prlens crates:
//! - [`PrlensError`] — unified error type using `thiserror`
//! - [`PrlensConfig`] — configuration loaded from `.prlens.toml`
//! - Shared types: [`AnalysisRequest`], [`AnalysisResult`]

mod config;
mod error;
mod types;

pub use config::{GithubConfig, LlmConfig, PrlensConfig, ServerConfig};
pub use error::PrlensError;
pub use types::{AnalysisRequest, AnalysisResult};

/// A convenience `Result` type for prlens operations.
pub type Result<T> = std::result::Result<T, PrlensError>;
