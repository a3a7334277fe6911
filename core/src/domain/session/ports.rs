use std::future::Future;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    image::value_objects::ImageUpload,
    session::{
        entities::{Session, SessionTransition},
        value_objects::SessionView,
    },
};

/// Repository trait for in-memory visitor sessions
#[cfg_attr(test, mockall::automock)]
pub trait SessionRepository: Send + Sync + 'static {
    fn create_session(&self) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn get_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<Option<Session>, CoreError>> + Send;

    /// Applies the transition atomically and returns the updated session
    fn apply_transition(
        &self,
        session_id: Uuid,
        transition: SessionTransition,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    /// Removes sessions not updated since `cutoff`, except pending ones
    fn purge_expired(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl Future<Output = Result<usize, CoreError>> + Send;
}

/// Service trait driving the page state machine
#[cfg_attr(test, mockall::automock)]
pub trait SessionService: Send + Sync {
    /// Returns the session with this id, or a fresh one when it is missing
    fn get_or_create_session(
        &self,
        session_id: Option<Uuid>,
    ) -> impl Future<Output = Result<Session, CoreError>> + Send;

    fn get_session_view(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionView, CoreError>> + Send;

    /// Encodes the upload, moves the session to `Awaiting` and starts the
    /// analysis in the background
    fn submit_image(
        &self,
        session_id: Uuid,
        upload: ImageUpload,
    ) -> impl Future<Output = Result<SessionView, CoreError>> + Send;

    fn reset_session(
        &self,
        session_id: Uuid,
    ) -> impl Future<Output = Result<SessionView, CoreError>> + Send;

    fn purge_expired_sessions(&self) -> impl Future<Output = Result<usize, CoreError>> + Send;
}
