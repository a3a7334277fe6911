use axum::extract::State;
use nutrition_advisor_core::domain::image::value_objects::ImageMimeType;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

/// Settings a client needs to build its own upload form. Never includes
/// the model credential.
#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicConfig {
    pub accepted_mime_types: Vec<ImageMimeType>,
    pub max_image_bytes: usize,
    pub model: String,
}

#[utoipa::path(
    get,
    path = "/config",
    tag = "config",
    summary = "Get public configuration",
    responses(
        (status = 200, body = PublicConfig)
    ),
)]
pub async fn get_config(State(state): State<AppState>) -> Response<PublicConfig> {
    Response::OK(PublicConfig {
        accepted_mime_types: ImageMimeType::ACCEPTED.to_vec(),
        max_image_bytes: state.service.upload_policy().max_bytes(),
        model: state.args.llm.gemini_model.clone(),
    })
}
