use std::future::Future;

use crate::domain::{
    analysis::{entities::AnalysisReport, value_objects::GenerateAnswerInput},
    common::entities::app_errors::CoreError,
    image::value_objects::EncodedImage,
};

/// Remote model that turns a food photo into analysis text.
///
/// Implementations own the credential; callers never see it.
#[cfg_attr(test, mockall::automock)]
pub trait AnswerGenerator: Send + Sync + 'static {
    fn generate_answer(
        &self,
        input: GenerateAnswerInput,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for nutrition analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait NutritionAnalysisService: Send + Sync {
    fn analyze_image(
        &self,
        image: EncodedImage,
    ) -> impl Future<Output = Result<AnalysisReport, CoreError>> + Send;
}
