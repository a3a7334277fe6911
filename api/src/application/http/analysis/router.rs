use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_data_uri::{__path_analyze_data_uri, analyze_data_uri},
    analyze_image::{__path_analyze_image, analyze_image},
};
use crate::application::http::server::app_state::AppState;

/// Room for the JSON envelope around a data URI
const JSON_OVERHEAD_BYTES: usize = 4 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_image, analyze_data_uri))]
pub struct AnalysisApiDoc;

/// Largest JSON body carrying a base64 image of at most `max_image_bytes`
fn data_uri_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(JSON_OVERHEAD_BYTES)
}

pub fn analysis_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;
    let data_uri_limit = data_uri_body_limit(state.service.upload_policy().max_bytes());

    Router::new()
        .route(&format!("{root_path}/api/analysis"), post(analyze_image))
        .route(
            &format!("{root_path}/api/analysis/data-uri"),
            post(analyze_data_uri).layer(DefaultBodyLimit::max(data_uri_limit)),
        )
}
