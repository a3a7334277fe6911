use crate::{
    domain::common::{NutritionAdvisorConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        llm::GeminiAnswerGenerator, session::repositories::InMemorySessionRepository,
    },
};

pub type NutritionAdvisorService = Service<GeminiAnswerGenerator, InMemorySessionRepository>;

pub fn create_service(config: NutritionAdvisorConfig) -> Result<NutritionAdvisorService, CoreError> {
    let answer_generator = GeminiAnswerGenerator::new(&config.llm)?;
    let session_repository = InMemorySessionRepository::new();

    tracing::info!(
        model = answer_generator.model_name(),
        max_image_bytes = config.upload.max_image_bytes,
        session_ttl_secs = config.session.ttl_secs,
        "Nutrition advisor service configured"
    );

    Ok(Service::new(answer_generator, session_repository, &config))
}
