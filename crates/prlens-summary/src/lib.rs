//! PR summary generation for the prlens service.
//!
//! Provides the analysis pipeline: LLM client, prompt construction with diff
//! truncation, model response parsing with risk-score normalization, and the
//! orchestration that ties diff fetching and generation together.

pub mod llm;
pub mod pipeline;
pub mod prompt;

pub use pipeline::AnalysisPipeline;
