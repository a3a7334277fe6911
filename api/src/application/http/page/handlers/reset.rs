use axum::{
    Extension,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use nutrition_advisor_core::domain::session::ports::SessionService;

use super::{page_url, render_rejection};
use crate::application::{
    http::server::{api_entities::api_error::ApiError, app_state::AppState},
    session_middleware::SessionContext,
};

pub async fn reset(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
) -> Response {
    match state.service.reset_session(context.session_id).await {
        Ok(_) => Redirect::to(&page_url(&state.args.server.root_path)).into_response(),
        Err(e) => render_rejection(&state, context.session_id, ApiError::from(e)).await,
    }
}
