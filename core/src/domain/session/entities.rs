use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    analysis::entities::AnalysisReport, common::entities::app_errors::CoreError,
    image::value_objects::EncodedImage,
};

/// Screen state of one visitor.
///
/// `Awaiting` is the only state with a request in flight. A failed request
/// keeps the image and records the reason so the page can offer a reset.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Awaiting {
        image: EncodedImage,
        started_at: DateTime<Utc>,
    },
    Done {
        image: EncodedImage,
        report: AnalysisReport,
    },
    Failed {
        image: EncodedImage,
        reason: String,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Awaiting { .. } => "awaiting",
            SessionState::Done { .. } => "done",
            SessionState::Failed { .. } => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionTransition {
    Begin(EncodedImage),
    Settle(Result<AnalysisReport, CoreError>),
    Reset,
}

impl SessionTransition {
    pub fn action(&self) -> &'static str {
        match self {
            SessionTransition::Begin(_) => "submit an image",
            SessionTransition::Settle(_) => "settle an analysis",
            SessionTransition::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: Uuid,
    pub state: SessionState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a transition, leaving the session untouched when the
    /// transition is not allowed from the current state.
    pub fn apply(&mut self, transition: SessionTransition) -> Result<(), CoreError> {
        let invalid = CoreError::InvalidTransition {
            action: transition.action(),
            state: self.state.name(),
        };

        let next = match (&self.state, transition) {
            (
                SessionState::Idle | SessionState::Failed { .. },
                SessionTransition::Begin(image),
            ) => SessionState::Awaiting {
                image,
                started_at: Utc::now(),
            },
            (SessionState::Awaiting { image, .. }, SessionTransition::Settle(outcome)) => {
                match outcome {
                    Ok(report) => SessionState::Done {
                        image: image.clone(),
                        report,
                    },
                    Err(e) => SessionState::Failed {
                        image: image.clone(),
                        reason: e.to_string(),
                    },
                }
            }
            (SessionState::Idle, SessionTransition::Reset) => return Ok(()),
            (SessionState::Done { .. } | SessionState::Failed { .. }, SessionTransition::Reset) => {
                SessionState::Idle
            }
            _ => return Err(invalid),
        };

        self.state = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Awaiting { .. })
    }

    /// When the in-flight request started, while the session is awaiting
    pub fn awaiting_since(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            SessionState::Awaiting { started_at, .. } => Some(*started_at),
            _ => None,
        }
    }

    pub fn can_reset(&self) -> bool {
        matches!(
            self.state,
            SessionState::Done { .. } | SessionState::Failed { .. }
        )
    }

    pub fn image(&self) -> Option<&EncodedImage> {
        match &self.state {
            SessionState::Idle => None,
            SessionState::Awaiting { image, .. }
            | SessionState::Done { image, .. }
            | SessionState::Failed { image, .. } => Some(image),
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            SessionState::Done { report, .. } => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
