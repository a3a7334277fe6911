use chrono::{DateTime, Utc};
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::AnalysisReport,
        ports::{AnswerGenerator, NutritionAnalysisService},
    },
    common::{entities::app_errors::CoreError, services::Service},
    image::{services::encode_upload, value_objects::ImageUpload},
    session::{
        entities::{Session, SessionTransition},
        ports::{SessionRepository, SessionService},
        value_objects::SessionView,
    },
};

impl<AG, SR> Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    async fn settle_session(
        &self,
        session_id: Uuid,
        started_at: Option<DateTime<Utc>>,
        outcome: Result<AnalysisReport, CoreError>,
    ) {
        let succeeded = outcome.is_ok();
        let elapsed_ms = started_at
            .map(|started| (Utc::now() - started).num_milliseconds())
            .unwrap_or_default();

        match self
            .session_repository
            .apply_transition(session_id, SessionTransition::Settle(outcome))
            .await
        {
            Ok(session) if succeeded => {
                info!(session_id = %session.id, elapsed_ms, "Session analysis settled");
            }
            Ok(session) => {
                warn!(
                    session_id = %session.id,
                    elapsed_ms,
                    error = session.error().unwrap_or_default(),
                    "Session analysis failed"
                );
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Dropping analysis outcome");
            }
        }
    }
}

impl<AG, SR> SessionService for Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    async fn get_or_create_session(&self, session_id: Option<Uuid>) -> Result<Session, CoreError> {
        if let Some(session_id) = session_id {
            if let Some(session) = self.session_repository.get_session(session_id).await? {
                return Ok(session);
            }
        }

        let session = self.session_repository.create_session().await?;
        debug!(session_id = %session.id, "Created session");

        Ok(session)
    }

    async fn get_session_view(&self, session_id: Uuid) -> Result<SessionView, CoreError> {
        let session = self
            .session_repository
            .get_session(session_id)
            .await?
            .ok_or(CoreError::SessionNotFound)?;

        Ok(SessionView::from(&session))
    }

    async fn submit_image(
        &self,
        session_id: Uuid,
        upload: ImageUpload,
    ) -> Result<SessionView, CoreError> {
        let image = encode_upload(&upload, &self.upload_policy)?;

        let session = self
            .session_repository
            .apply_transition(session_id, SessionTransition::Begin(image.clone()))
            .await?;

        info!(
            session_id = %session_id,
            mime_type = %image.mime_type(),
            size_bytes = image.size_bytes(),
            "Started nutrition analysis"
        );

        let started_at = session.awaiting_since();
        let service = self.clone();
        tokio::spawn(
            async move {
                let outcome = service.analyze_image(image).await;
                service.settle_session(session_id, started_at, outcome).await;
            }
            .instrument(info_span!("session_analysis", session_id = %session_id)),
        );

        Ok(SessionView::from(&session))
    }

    async fn reset_session(&self, session_id: Uuid) -> Result<SessionView, CoreError> {
        let session = self
            .session_repository
            .apply_transition(session_id, SessionTransition::Reset)
            .await?;

        debug!(session_id = %session_id, "Reset session");

        Ok(SessionView::from(&session))
    }

    async fn purge_expired_sessions(&self) -> Result<usize, CoreError> {
        let Some(cutoff) = Utc::now().checked_sub_signed(self.session_ttl) else {
            return Ok(0);
        };

        let purged = self.session_repository.purge_expired(cutoff).await?;
        if purged > 0 {
            info!(purged, "Purged expired sessions");
        }

        Ok(purged)
    }
}
