use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    image::value_objects::ImageMimeType,
    session::entities::{Session, SessionState},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    Awaiting,
    Done,
    Failed,
}

/// Everything the page needs to draw one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub status: SessionStatus,
    /// Data URI of the selected image
    pub preview: Option<String>,
    pub mime_type: Option<ImageMimeType>,
    pub result_text: Option<String>,
    pub result_html: Option<String>,
    pub error: Option<String>,
    pub is_pending: bool,
    pub can_reset: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        let status = match session.state {
            SessionState::Idle => SessionStatus::Idle,
            SessionState::Awaiting { .. } => SessionStatus::Awaiting,
            SessionState::Done { .. } => SessionStatus::Done,
            SessionState::Failed { .. } => SessionStatus::Failed,
        };
        let image = session.image();
        let report = session.report();

        Self {
            session_id: session.id,
            status,
            preview: image.map(|i| i.data_uri()),
            mime_type: image.map(|i| i.mime_type()),
            result_text: report.map(|r| r.text.clone()),
            result_html: report.map(|r| r.html.clone()),
            error: session.error().map(str::to_string),
            is_pending: session.is_pending(),
            can_reset: session.can_reset(),
            updated_at: session.updated_at,
        }
    }
}
