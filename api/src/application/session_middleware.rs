use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_cookie::prelude::*;
use nutrition_advisor_core::domain::session::ports::SessionService;
use tracing::{debug, error};
use uuid::Uuid;

use crate::{
    application::http::server::{api_entities::api_error::ApiError, app_state::AppState},
    args::ServerArgs,
};

pub const SESSION_COOKIE: &str = "nutrition_session";

/// Session of the current page visitor, stored in request extensions
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub session_id: Uuid,
}

/// Resolves the visitor session from the session cookie, creating a new
/// session (and cookie) when the cookie is missing, malformed or expired.
pub async fn session_middleware(
    State(state): State<AppState>,
    cookie: CookieManager,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let existing = cookie
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok());

    let session = state
        .service
        .get_or_create_session(existing)
        .await
        .map_err(|e| {
            error!("Failed to resolve session: {}", e);
            ApiError::from(e)
        })?;

    if existing != Some(session.id) {
        debug!(session_id = %session.id, "Issuing session cookie");

        cookie.add(session_cookie(session.id, &state.args.server));
    }

    req.extensions_mut().insert(SessionContext {
        session_id: session.id,
    });

    Ok(next.run(req).await)
}

/// Session cookie scoped to the page. `SameSite=Lax` keeps cross-site form
/// posts from carrying it; `Secure` is set whenever the server speaks TLS.
pub fn session_cookie(session_id: Uuid, server: &ServerArgs) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, session_id.to_string());
    cookie.set_path(cookie_path(&server.root_path));
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(server.tls_cert_path.is_some());
    cookie
}

fn cookie_path(root_path: &str) -> String {
    if root_path.is_empty() {
        "/".to_string()
    } else {
        root_path.to_string()
    }
}
