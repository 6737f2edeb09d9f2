//! Session Management
//!
//! Sessions hold one user's flow processors and chatbot turn count. Storage
//! goes through the [`SessionStore`] trait so handlers never touch a global
//! map.
//!
//! - `InMemorySessionStore` - default, process memory only, no eviction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use avatar_core::Language;
use avatar_flow::{
    BookingProcessor, CheckInProcessor, FlowKind, FlowSummary, TurnCounter, VideoUrlResolver,
};

use crate::ServerError;

/// Mutable per-session state, guarded by [`Session::with_state`]
#[derive(Debug)]
pub struct SessionState {
    pub language: Language,
    pub active_flow: Option<FlowKind>,
    /// Step the client is expected to submit next
    pub current_step: Option<String>,
    pub booking: BookingProcessor,
    pub check_in: CheckInProcessor,
    pub turns: TurnCounter,
}

/// One end user's conversation
#[derive(Debug)]
pub struct Session {
    pub id: String,
    pub created_at: DateTime<Utc>,
    state: Mutex<SessionState>,
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub language: Language,
    pub active_flow: Option<FlowKind>,
    pub in_avatar_flow: bool,
    pub current_step: Option<String>,
    pub chat_turns: u32,
    pub booking: FlowSummary,
    pub checkin: FlowSummary,
}

impl Session {
    pub fn new(id: impl Into<String>, language: Language, videos: Arc<VideoUrlResolver>) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            state: Mutex::new(SessionState {
                language,
                active_flow: None,
                current_step: None,
                booking: BookingProcessor::new(videos.clone()),
                check_in: CheckInProcessor::new(videos),
                turns: TurnCounter::default(),
            }),
        }
    }

    /// Run `f` with the state locked
    ///
    /// The closure is synchronous, so the lock can never be held across an
    /// await point.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut state = self.state.lock();
        f(&mut state)
    }

    pub fn language(&self) -> Language {
        self.state.lock().language
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            session_id: self.id.clone(),
            created_at: self.created_at,
            language: state.language,
            active_flow: state.active_flow,
            in_avatar_flow: state.active_flow.is_some(),
            current_step: state.current_step.clone(),
            chat_turns: state.turns.count(),
            booking: state.booking.summary(),
            checkin: state.check_in.summary(),
        }
    }
}

/// Session store trait for pluggable backends
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Look up a session by ID
    async fn get(&self, id: &str) -> Result<Option<Arc<Session>>, ServerError>;

    /// Insert `session` unless its ID is taken; returns the stored session
    async fn get_or_insert(&self, session: Arc<Session>) -> Result<Arc<Session>, ServerError>;

    /// Remove a session, reporting whether it existed
    async fn remove(&self, id: &str) -> Result<bool, ServerError>;

    /// List all session IDs
    async fn list_ids(&self) -> Result<Vec<String>, ServerError>;

    /// Number of live sessions
    async fn count(&self) -> Result<usize, ServerError>;

    /// Check if this store shares sessions across instances
    fn is_distributed(&self) -> bool;
}

/// In-memory session store (default)
///
/// Sessions live until deleted or until the process exits.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<Session>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<Arc<Session>>, ServerError> {
        Ok(self.sessions.read().get(id).cloned())
    }

    async fn get_or_insert(&self, session: Arc<Session>) -> Result<Arc<Session>, ServerError> {
        let mut sessions = self.sessions.write();
        let stored = sessions
            .entry(session.id.clone())
            .or_insert_with(|| {
                tracing::info!(session_id = %session.id, "Created session");
                session
            })
            .clone();
        Ok(stored)
    }

    async fn remove(&self, id: &str) -> Result<bool, ServerError> {
        let removed = self.sessions.write().remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Removed session");
        }
        Ok(removed)
    }

    async fn list_ids(&self) -> Result<Vec<String>, ServerError> {
        Ok(self.sessions.read().keys().cloned().collect())
    }

    async fn count(&self) -> Result<usize, ServerError> {
        Ok(self.sessions.read().len())
    }

    fn is_distributed(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(id: &str) -> Arc<Session> {
        Arc::new(Session::new(
            id,
            Language::English,
            Arc::new(VideoUrlResolver::new("http://localhost:8000/videos")),
        ))
    }

    #[tokio::test]
    async fn test_get_or_insert_keeps_existing() {
        let store = InMemorySessionStore::new();
        let first = store.get_or_insert(session("u-1")).await.unwrap();
        first.with_state(|state| state.language = Language::Hindi);

        let second = store.get_or_insert(session("u-1")).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.language(), Language::Hindi);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::new();
        store.get_or_insert(session("u-2")).await.unwrap();

        assert!(store.remove("u-2").await.unwrap());
        assert!(!store.remove("u-2").await.unwrap());
        assert!(store.get("u-2").await.unwrap().is_none());
        assert!(!store.is_distributed());
    }

    #[tokio::test]
    async fn test_list_ids() {
        let store = InMemorySessionStore::new();
        store.get_or_insert(session("a")).await.unwrap();
        store.get_or_insert(session("b")).await.unwrap();

        let mut ids = store.list_ids().await.unwrap();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_snapshot() {
        let session = session("u-3");
        session.with_state(|state| {
            let start = state.booking.start(Language::English);
            state.active_flow = Some(FlowKind::Booking);
            state.current_step = Some(start.step.to_string());
            state.booking.process("welcome", json!({"ok": true}), Language::English);
        });

        let snapshot = session.snapshot();
        assert!(snapshot.in_avatar_flow);
        assert_eq!(snapshot.current_step.as_deref(), Some("welcome"));
        assert_eq!(snapshot.booking.data.len(), 1);
        assert_eq!(snapshot.checkin.progress, 0);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["session_id"], "u-3");
        assert_eq!(json["active_flow"], "booking");
    }
}
