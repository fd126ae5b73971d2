//! GitHub integration for the prlens service.
//!
//! Provides [`GitHubClient`] for fetching pull request diffs and
//! [`parse_repo`] for validating `owner/repo` identifiers.

mod client;

pub use client::{parse_repo, GitHubClient};
