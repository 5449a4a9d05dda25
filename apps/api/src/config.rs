use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

/// Which collaborator answers `analyze` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerBackend {
    /// Fixed demo result after an artificial delay.
    Fixture,
    /// Claude-backed extraction.
    Llm,
}

impl FromStr for AnalyzerBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixture" => Ok(AnalyzerBackend::Fixture),
            "llm" => Ok(AnalyzerBackend::Llm),
            other => Err(anyhow!(
                "ANALYZER_BACKEND must be 'fixture' or 'llm', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub analyzer_backend: AnalyzerBackend,
    pub anthropic_api_key: Option<String>,
    pub analysis_timeout: Duration,
    pub fixture_delay: Duration,
    pub max_resume_chars: usize,
    pub max_sessions: usize,
    /// Sessions untouched for this long are evicted.
    pub session_idle: Duration,
    pub port: u16,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analyzer_backend: AnalyzerBackend::Fixture,
            anthropic_api_key: None,
            analysis_timeout: Duration::from_secs(180),
            fixture_delay: Duration::from_millis(3000),
            max_resume_chars: 50_000,
            max_sessions: 1_000,
            session_idle: Duration::from_secs(1800),
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup so parsing can be tested
    /// without touching the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let analyzer_backend = match lookup("ANALYZER_BACKEND") {
            Some(raw) => raw.parse()?,
            None => defaults.analyzer_backend,
        };

        let anthropic_api_key = lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty());
        if analyzer_backend == AnalyzerBackend::Llm && anthropic_api_key.is_none() {
            bail!("ANTHROPIC_API_KEY is required when ANALYZER_BACKEND=llm");
        }

        let analysis_timeout = match lookup("ANALYSIS_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                parse_number::<u64>("ANALYSIS_TIMEOUT_SECS", &raw)?,
            ),
            None => defaults.analysis_timeout,
        };
        if analysis_timeout.is_zero() {
            bail!("ANALYSIS_TIMEOUT_SECS must be greater than zero");
        }

        let fixture_delay = match lookup("FIXTURE_DELAY_MS") {
            Some(raw) => Duration::from_millis(parse_number::<u64>("FIXTURE_DELAY_MS", &raw)?),
            None => defaults.fixture_delay,
        };

        let max_resume_chars = match lookup("MAX_RESUME_CHARS") {
            Some(raw) => parse_number::<usize>("MAX_RESUME_CHARS", &raw)?,
            None => defaults.max_resume_chars,
        };
        if max_resume_chars == 0 {
            bail!("MAX_RESUME_CHARS must be greater than zero");
        }

        let max_sessions = match lookup("MAX_SESSIONS") {
            Some(raw) => parse_number::<usize>("MAX_SESSIONS", &raw)?,
            None => defaults.max_sessions,
        };
        if max_sessions == 0 {
            bail!("MAX_SESSIONS must be greater than zero");
        }

        let session_idle = match lookup("SESSION_IDLE_SECS") {
            Some(raw) => Duration::from_secs(parse_number::<u64>("SESSION_IDLE_SECS", &raw)?),
            None => defaults.session_idle,
        };
        if session_idle.is_zero() {
            bail!("SESSION_IDLE_SECS must be greater than zero");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        Ok(Config {
            analyzer_backend,
            anthropic_api_key,
            analysis_timeout,
            fixture_delay,
            max_resume_chars,
            max_sessions,
            session_idle,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a non-negative integer, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.analyzer_backend, AnalyzerBackend::Fixture);
        assert_eq!(config.fixture_delay, Duration::from_millis(3000));
        assert_eq!(config.analysis_timeout, Duration::from_secs(180));
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_llm_backend_requires_api_key() {
        let err = Config::from_lookup(lookup_from(&[("ANALYZER_BACKEND", "llm")])).unwrap_err();
        assert!(err.to_string().contains("ANTHROPIC_API_KEY"));
    }

    #[test]
    fn test_llm_backend_with_key() {
        let config = Config::from_lookup(lookup_from(&[
            ("ANALYZER_BACKEND", "LLM"),
            ("ANTHROPIC_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.analyzer_backend, AnalyzerBackend::Llm);
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("ANALYZER_BACKEND", "regex")])).is_err());
    }

    #[test]
    fn test_zero_limits_rejected() {
        for key in [
            "ANALYSIS_TIMEOUT_SECS",
            "MAX_RESUME_CHARS",
            "MAX_SESSIONS",
            "SESSION_IDLE_SECS",
        ] {
            let err = Config::from_lookup(lookup_from(&[(key, "0")])).unwrap_err();
            assert!(err.to_string().contains(key), "{key}: {err}");
        }
    }

    #[test]
    fn test_bad_port_rejected() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_overrides_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("FIXTURE_DELAY_MS", "250"),
            ("ANALYSIS_TIMEOUT_SECS", "5"),
            ("MAX_RESUME_CHARS", "1000"),
            ("MAX_SESSIONS", "4"),
            ("SESSION_IDLE_SECS", "60"),
            ("PORT", "9090"),
        ]))
        .unwrap();
        assert_eq!(config.fixture_delay, Duration::from_millis(250));
        assert_eq!(config.analysis_timeout, Duration::from_secs(5));
        assert_eq!(config.max_resume_chars, 1000);
        assert_eq!(config.max_sessions, 4);
        assert_eq!(config.session_idle, Duration::from_secs(60));
        assert_eq!(config.port, 9090);
    }
}
