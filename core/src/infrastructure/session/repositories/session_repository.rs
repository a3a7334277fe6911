use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    session::{
        entities::{Session, SessionTransition},
        ports::SessionRepository,
    },
};

/// Sessions live only as long as the process; nothing is written to disk.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    async fn create_session(&self) -> Result<Session, CoreError> {
        let session = Session::new();
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());

        Ok(session)
    }

    async fn get_session(&self, session_id: Uuid) -> Result<Option<Session>, CoreError> {
        Ok(self.sessions.read().await.get(&session_id).cloned())
    }

    async fn apply_transition(
        &self,
        session_id: Uuid,
        transition: SessionTransition,
    ) -> Result<Session, CoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(&session_id)
            .ok_or(CoreError::SessionNotFound)?;

        session.apply(transition)?;

        Ok(session.clone())
    }

    async fn purge_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, CoreError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|_, session| session.is_pending() || session.updated_at >= cutoff);

        Ok(before - sessions.len())
    }
}
