use axum::extract::{Multipart, State};
use nutrition_advisor_core::domain::{
    analysis::{entities::AnalysisReport, ports::NutritionAnalysisService},
    image::services::encode_upload,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    multipart::read_image_upload,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeImageResponse {
    pub data: AnalysisReport,
}

#[utoipa::path(
    post,
    path = "/analysis",
    tag = "analysis",
    summary = "Analyze a food photo",
    description = "Sends a JPEG or PNG photo (multipart field `image`) to the vision model and waits for the nutritional analysis",
    responses(
        (status = 200, body = AnalyzeImageResponse),
        (status = 400, description = "Missing or empty image"),
        (status = 413, description = "Image too large"),
        (status = 415, description = "Image is not JPEG or PNG"),
        (status = 502, description = "Analysis model failed")
    ),
)]
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeImageResponse>, ApiError> {
    let upload = read_image_upload(&mut multipart).await?;
    let image = encode_upload(&upload, state.service.upload_policy())?;

    let report = state
        .service
        .analyze_image(image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeImageResponse { data: report }))
}
