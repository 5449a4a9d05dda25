//! The collaborator seam: anything that can turn resume text into an
//! `AnalysisResult` implements `ResumeAnalyzer`.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>` chosen at startup; controllers
//! and handlers never know which backend answers.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::analysis::prompts::{RESUME_ANALYSIS_PROMPT, RESUME_ANALYSIS_SYSTEM};
use crate::llm_client::prompts::{EXTRACTION_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("collaborator error: {0}")]
    Collaborator(String),

    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),
}

impl AnalysisError {
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Collaborator(_) => "collaborator",
            AnalysisError::Timeout(_) => "timeout",
        }
    }
}

/// Produces a structured analysis from raw resume text.
///
/// Implementations must not retain state between calls: the same text may be
/// analyzed any number of times and each call stands alone.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError>;

    /// Short label surfaced on `/health` and in logs.
    fn backend(&self) -> &'static str;
}

/// Runs one analysis bounded by `timeout`. Elapsed time becomes `AnalysisError::Timeout`.
pub async fn analyze_within(
    analyzer: &dyn ResumeAnalyzer,
    text: &str,
    timeout: Duration,
) -> Result<AnalysisResult, AnalysisError> {
    match tokio::time::timeout(timeout, analyzer.analyze(text)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AnalysisError::Timeout(timeout)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAnalyzer — Claude-backed extraction
// ────────────────────────────────────────────────────────────────────────────

/// Sends the resume through the extraction prompt and deserializes the reply.
pub struct LlmAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmAnalyzer {
    async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        let prompt = build_prompt(text);
        let system = format!("{RESUME_ANALYSIS_SYSTEM} {JSON_ONLY_SYSTEM}");
        self.0
            .call_json::<AnalysisResult>(&prompt, &system)
            .await
            .map_err(|e| AnalysisError::Collaborator(format!("Resume analysis failed: {e}")))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_prompt(text: &str) -> String {
    let prompt = RESUME_ANALYSIS_PROMPT.replace("{resume_text}", text.trim());
    format!("{prompt}\n\n{EXTRACTION_INSTRUCTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stalled;

    #[async_trait]
    impl ResumeAnalyzer for Stalled {
        async fn analyze(&self, _text: &str) -> Result<AnalysisResult, AnalysisError> {
            std::future::pending().await
        }

        fn backend(&self) -> &'static str {
            "stalled"
        }
    }

    struct Instant;

    #[async_trait]
    impl ResumeAnalyzer for Instant {
        async fn analyze(&self, _text: &str) -> Result<AnalysisResult, AnalysisError> {
            Ok(AnalysisResult::default())
        }

        fn backend(&self) -> &'static str {
            "instant"
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_collaborator_times_out() {
        let err = analyze_within(&Stalled, "resume", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert_eq!(err, AnalysisError::Timeout(Duration::from_secs(5)));
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test]
    async fn test_fast_collaborator_passes_through() {
        let result = analyze_within(&Instant, "resume", Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(result, AnalysisResult::default());
    }

    #[test]
    fn test_prompt_embeds_trimmed_resume() {
        let prompt = build_prompt("  John Doe, Software Engineer  \n");
        assert!(prompt.contains("John Doe, Software Engineer\n"));
        assert!(!prompt.contains("{resume_text}"));
        assert!(prompt.ends_with(EXTRACTION_INSTRUCTION));
    }
}
