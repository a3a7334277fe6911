use axum::{
    Extension,
    extract::{Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use nutrition_advisor_core::domain::session::ports::SessionService;
use tracing::info;

use super::{page_url, render_rejection};
use crate::application::{
    http::{
        multipart::read_image_upload, server::api_entities::api_error::ApiError,
        server::app_state::AppState,
    },
    session_middleware::SessionContext,
};

/// Form target of the dropzone. Redirects back to the page, which shows
/// the preview and the spinner until the analysis settles.
pub async fn upload(
    State(state): State<AppState>,
    Extension(context): Extension<SessionContext>,
    mut multipart: Multipart,
) -> Response {
    let submitted = match read_image_upload(&mut multipart).await {
        Ok(upload) => state
            .service
            .submit_image(context.session_id, upload)
            .await
            .map_err(ApiError::from),
        Err(e) => Err(e),
    };

    match submitted {
        Ok(view) => {
            info!(session_id = %view.session_id, "Photo submitted from page");
            Redirect::to(&page_url(&state.args.server.root_path)).into_response()
        }
        Err(rejection) => render_rejection(&state, context.session_id, rejection).await,
    }
}
