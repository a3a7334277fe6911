use std::sync::Arc;

use chrono::Duration;

use crate::domain::{
    analysis::{ports::AnswerGenerator, prompt::DEFAULT_NUTRITION_PROMPT},
    common::NutritionAdvisorConfig,
    image::policies::ImageUploadPolicy,
    session::ports::SessionRepository,
};

/// Application service shared by every handler.
///
/// Cloning is cheap: adapters are held behind `Arc` so a clone can be moved
/// into a background task that settles a pending analysis.
pub struct Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    pub(crate) answer_generator: Arc<AG>,
    pub(crate) session_repository: Arc<SR>,
    pub(crate) upload_policy: ImageUploadPolicy,
    pub(crate) session_ttl: Duration,
    pub(crate) prompt: Arc<str>,
}

impl<AG, SR> Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    pub fn new(answer_generator: AG, session_repository: SR, config: &NutritionAdvisorConfig) -> Self {
        let prompt = config
            .llm
            .prompt
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NUTRITION_PROMPT.to_string());

        Self {
            answer_generator: Arc::new(answer_generator),
            session_repository: Arc::new(session_repository),
            upload_policy: ImageUploadPolicy::new(config.upload.max_image_bytes),
            session_ttl: i64::try_from(config.session.ttl_secs)
                .ok()
                .and_then(Duration::try_seconds)
                .unwrap_or(Duration::MAX),
            prompt: Arc::from(prompt),
        }
    }

    pub fn upload_policy(&self) -> &ImageUploadPolicy {
        &self.upload_policy
    }
}

impl<AG, SR> Clone for Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    fn clone(&self) -> Self {
        Self {
            answer_generator: Arc::clone(&self.answer_generator),
            session_repository: Arc::clone(&self.session_repository),
            upload_policy: self.upload_policy.clone(),
            session_ttl: self.session_ttl,
            prompt: Arc::clone(&self.prompt),
        }
    }
}
