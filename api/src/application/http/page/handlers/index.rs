use axum::{
    Extension,
    extract::State,
    response::Html,
};
use nutrition_advisor_core::domain::session::ports::SessionService;

use crate::application::{
    http::{
        page::views::{PageLayout, render_page},
        server::{api_entities::api_error::ApiError, app_state::AppState},
    },
    session_middleware::SessionContext,
};

pub async fn index(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
) -> Result<Html<String>, ApiError> {
    let view = state.service.get_session_view(context.session_id).await?;

    Ok(Html(render_page(
        &view,
        &PageLayout::from_args(&state.args),
        None,
    )))
}
