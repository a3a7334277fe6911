pub mod index;
pub mod reset;
pub mod upload;

use axum::response::{Html, IntoResponse, Response};
use nutrition_advisor_core::domain::session::ports::SessionService;
use uuid::Uuid;

use crate::application::http::{
    page::views::{PageLayout, render_page},
    server::{api_entities::api_error::ApiError, app_state::AppState},
};

/// Root of the page, always ending with a slash
pub fn page_url(root_path: &str) -> String {
    format!("{}/", root_path)
}

/// Re-renders the page with a notice explaining why the action was refused
async fn render_rejection(state: &AppState, session_id: Uuid, rejection: ApiError) -> Response {
    let view = match state.service.get_session_view(session_id).await {
        Ok(view) => view,
        Err(e) => return ApiError::from(e).into_response(),
    };

    (
        rejection.status(),
        Html(render_page(
            &view,
            &PageLayout::from_args(&state.args),
            Some(&rejection.to_string()),
        )),
    )
        .into_response()
}
