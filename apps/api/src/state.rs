use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::controller::RequestLimits;
use crate::analysis::sessions::SessionStore;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable collaborator. Fixture or LLM, chosen by ANALYZER_BACKEND.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// One request controller per client session.
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, analyzer: Arc<dyn ResumeAnalyzer>) -> Self {
        let sessions = SessionStore::new(
            Arc::clone(&analyzer),
            RequestLimits::from(&config),
            config.max_sessions,
            config.session_idle,
        );
        Self {
            analyzer,
            sessions: Arc::new(sessions),
            config,
        }
    }

    pub fn limits(&self) -> RequestLimits {
        RequestLimits::from(&self.config)
    }
}
