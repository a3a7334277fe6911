use tracing::{error, info, instrument};

use crate::domain::{
    analysis::{
        entities::AnalysisReport,
        ports::{AnswerGenerator, NutritionAnalysisService},
        value_objects::GenerateAnswerInput,
    },
    common::{entities::app_errors::CoreError, services::Service},
    image::value_objects::EncodedImage,
    session::ports::SessionRepository,
};

impl<AG, SR> NutritionAnalysisService for Service<AG, SR>
where
    AG: AnswerGenerator,
    SR: SessionRepository,
{
    #[instrument(
        skip(self, image),
        fields(
            mime_type = %image.mime_type(),
            size_bytes = image.size_bytes(),
            checksum_sha256 = image.checksum_sha256()
        )
    )]
    async fn analyze_image(&self, image: EncodedImage) -> Result<AnalysisReport, CoreError> {
        let input = GenerateAnswerInput::from_image(&image, self.prompt.as_ref());

        let answer = self
            .answer_generator
            .generate_answer(input)
            .await
            .inspect_err(|e| error!("Nutrition analysis request failed: {}", e))?;

        if answer.trim().is_empty() {
            error!("Nutrition analysis returned an empty answer");
            return Err(CoreError::ExternalServiceError(
                "The model returned an empty analysis".to_string(),
            ));
        }

        let report = AnalysisReport::new(
            image.mime_type(),
            image.checksum_sha256().to_string(),
            answer,
        );

        info!(report_id = %report.id, "Nutrition analysis completed");

        Ok(report)
    }
}
