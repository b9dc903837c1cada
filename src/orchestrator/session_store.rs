//! Conversation sessions - orchestration layer
//!
//! One short-lived session per chat, created explicitly on /start and torn
//! down explicitly on completion, /cancel or idle timeout. The store is the
//! only holder of conversation state; there is no ambient map.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

/// Conversation step a chat is currently at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the school name (a single `-` skips it)
    AwaitingSchool,
    /// Waiting for the exam questions
    AwaitingQuestions,
}

/// State carried across the turns of one chat
#[derive(Debug)]
pub struct Session {
    pub chat_id: i64,
    pub state: SessionState,
    pub school: Option<String>,
    last_activity: Instant,
}

impl Session {
    fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            state: SessionState::AwaitingSchool,
            school: None,
            last_activity: Instant::now(),
        }
    }

    /// Record activity so the session is not pruned mid-conversation
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// Per-chat session store
pub struct SessionStore {
    sessions: HashMap<i64, Session>,
    timeout: Duration,
}

impl SessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            timeout,
        }
    }

    /// Start a fresh session for a chat, replacing any previous one
    pub fn open(&mut self, chat_id: i64) -> &mut Session {
        debug!("💬 opening session for chat {}", chat_id);
        let session = self
            .sessions
            .entry(chat_id)
            .or_insert_with(|| Session::new(chat_id));
        *session = Session::new(chat_id);
        session
    }

    pub fn get_mut(&mut self, chat_id: i64) -> Option<&mut Session> {
        self.sessions.get_mut(&chat_id)
    }

    /// Tear a session down; returns whether one existed
    pub fn close(&mut self, chat_id: i64) -> bool {
        let existed = self.sessions.remove(&chat_id).is_some();
        if existed {
            debug!("💬 closed session for chat {}", chat_id);
        }
        existed
    }

    /// Drop sessions idle for longer than the configured timeout
    pub fn prune_stale(&mut self) -> usize {
        let timeout = self.timeout;
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_activity.elapsed() < timeout);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_starts_at_awaiting_school() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let session = store.open(42);
        assert_eq!(session.state, SessionState::AwaitingSchool);
        assert!(session.school.is_none());
    }

    #[test]
    fn reopen_replaces_previous_session() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        let session = store.open(42);
        session.state = SessionState::AwaitingQuestions;
        session.school = Some("مدرسة بغداد".to_string());

        let fresh = store.open(42);
        assert_eq!(fresh.state, SessionState::AwaitingSchool);
        assert!(fresh.school.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn close_removes_the_session() {
        let mut store = SessionStore::new(Duration::from_secs(60));
        store.open(42);
        assert!(store.close(42));
        assert!(!store.close(42));
        assert!(store.is_empty());
    }

    #[test]
    fn prune_drops_idle_sessions_only() {
        let mut store = SessionStore::new(Duration::ZERO);
        store.open(1);
        store.open(2);
        assert_eq!(store.prune_stale(), 2);
        assert!(store.is_empty());

        let mut patient = SessionStore::new(Duration::from_secs(3600));
        patient.open(3);
        assert_eq!(patient.prune_stale(), 0);
        assert_eq!(patient.len(), 1);
    }
}
