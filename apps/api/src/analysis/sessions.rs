//! In-memory registry of per-client request controllers.
//!
//! Removing a session drops its controller, which cancels any request it still
//! has in flight. Sessions untouched for longer than the idle window are
//! evicted the next time a session is created.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::analysis::controller::{RequestController, RequestLimits};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("session limit of {0} reached")]
    Full(usize),
}

struct Session {
    controller: Arc<RequestController>,
    last_seen: Instant,
}

pub struct SessionStore {
    analyzer: Arc<dyn ResumeAnalyzer>,
    limits: RequestLimits,
    max_sessions: usize,
    idle_ttl: Duration,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new(
        analyzer: Arc<dyn ResumeAnalyzer>,
        limits: RequestLimits,
        max_sessions: usize,
        idle_ttl: Duration,
    ) -> Self {
        Self {
            analyzer,
            limits,
            max_sessions,
            idle_ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn create(&self) -> Result<(Uuid, Arc<RequestController>), SessionError> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let now = Instant::now();
        let before = sessions.len();
        sessions.retain(|_, session| now.duration_since(session.last_seen) < self.idle_ttl);
        if sessions.len() < before {
            info!("Evicted {} idle session(s)", before - sessions.len());
        }

        if sessions.len() >= self.max_sessions {
            return Err(SessionError::Full(self.max_sessions));
        }

        let id = Uuid::new_v4();
        let controller = Arc::new(RequestController::new(
            Arc::clone(&self.analyzer),
            self.limits,
        ));
        sessions.insert(
            id,
            Session {
                controller: Arc::clone(&controller),
                last_seen: now,
            },
        );
        info!("Opened session {id} ({} active)", sessions.len());
        Ok((id, controller))
    }

    /// Looks up a session and marks it as active.
    pub fn get(&self, id: Uuid) -> Option<Arc<RequestController>> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let session = sessions.get_mut(&id)?;
        session.last_seen = Instant::now();
        Some(Arc::clone(&session.controller))
    }

    /// Returns false when no such session existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
        if removed.is_some() {
            info!("Closed session {id}");
        }
        removed.is_some()
    }

    pub fn active_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
