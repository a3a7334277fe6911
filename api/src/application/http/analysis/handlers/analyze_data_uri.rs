use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use nutrition_advisor_core::domain::{
    analysis::ports::NutritionAnalysisService, image::services::decode_data_uri,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::analyze_image::AnalyzeImageResponse;
use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeDataUriRequest {
    /// `data:image/jpeg;base64,...` or `data:image/png;base64,...`
    pub image: String,
}

#[utoipa::path(
    post,
    path = "/analysis/data-uri",
    tag = "analysis",
    summary = "Analyze a food photo sent as a data URI",
    description = "Same analysis as the multipart endpoint for clients that already hold the photo as a base64 data URI",
    request_body = AnalyzeDataUriRequest,
    responses(
        (status = 200, body = AnalyzeImageResponse),
        (status = 400, description = "Malformed body, data URI or empty image"),
        (status = 413, description = "Image too large"),
        (status = 415, description = "Image is not JPEG or PNG"),
        (status = 502, description = "Analysis model failed")
    ),
)]
pub async fn analyze_data_uri(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeDataUriRequest>, JsonRejection>,
) -> Result<Response<AnalyzeImageResponse>, ApiError> {
    let Json(payload) = payload?;
    let image = decode_data_uri(&payload.image, state.service.upload_policy())?;

    let report = state
        .service
        .analyze_image(image)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeImageResponse { data: report }))
}
