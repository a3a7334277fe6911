use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{
        HeaderValue, Method,
        header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE},
    },
    routing::get,
};
use axum_cookie::prelude::*;
use axum_prometheus::PrometheusMetricLayer;
use nutrition_advisor_core::{
    application::create_service,
    domain::{common::NutritionAdvisorConfig, session::ports::SessionService},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use super::config::get_config;
use crate::application::http::{
    analysis::router::analysis_routes, health::health_routes, page::router::page_routes,
    server::app_state::AppState, server::openapi::ApiDoc, session::router::session_routes,
};
use crate::args::{Args, ServerArgs};

/// Room for multipart boundaries and headers on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Largest request body accepted for an image of at most `max_image_bytes`
fn request_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES)
}

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = NutritionAdvisorConfig::from(args.as_ref().clone());
    let service = create_service(config)?;

    Ok(AppState::new(args, service))
}

/// Periodically evicts idle sessions until the runtime shuts down
pub fn spawn_session_sweeper(state: AppState) -> tokio::task::JoinHandle<()> {
    let period = Duration::from_secs(state.args.session.sweep_interval_secs.max(1));

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = state.service.purge_expired_sessions().await {
                warn!("Failed to purge expired sessions: {}", e);
            }
        }
    })
}

fn cors_layer(server: &ServerArgs) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid allowed origin"))
                .ok()
        })
        .collect();

    debug!(?origins, "CORS origins");

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, CONTENT_LENGTH, ACCEPT])
        .allow_credentials(true)
}

/// OpenAPI document with every path mounted under `root_path`
fn openapi_document(root_path: &str) -> utoipa::openapi::OpenApi {
    let mut document = ApiDoc::openapi();
    let prefixed = std::mem::take(&mut document.paths.paths)
        .into_iter()
        .map(|(path, item)| (format!("{root_path}{path}"), item))
        .collect();
    document.paths.paths = prefixed;
    document
}

fn docs_routes(root_path: &str) -> Router<AppState> {
    let document = openapi_document(root_path);
    let spec_url = format!("{root_path}/api-docs/openapi.json");

    Router::new()
        .merge(SwaggerUi::new(format!("{root_path}/swagger-ui")).url(spec_url.clone(), document.clone()))
        .merge(Scalar::with_url(format!("{root_path}/scalar"), document.clone()))
        .merge(Redoc::with_url(format!("{root_path}/redoc"), document))
        .merge(RapiDoc::new(spec_url).path(format!("{root_path}/rapidoc")))
}

/// Builds the whole application: page, JSON API, docs, health and the
/// optional metrics endpoint.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let root_path = state.args.server.root_path.clone();
    let body_limit = request_body_limit(state.service.upload_policy().max_bytes());

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    let mut app = Router::new()
        .merge(docs_routes(&root_path))
        .merge(page_routes(state.clone()))
        .merge(analysis_routes(state.clone()))
        .merge(session_routes(state.clone()))
        .merge(health_routes(&root_path))
        .route(&format!("{root_path}/api/config"), get(get_config));

    if state.args.server.metrics_enabled {
        let (metrics_layer, metrics) = PrometheusMetricLayer::pair();
        app = app
            .route(
                &format!("{root_path}/metrics"),
                get(move || async move { metrics.render() }),
            )
            .layer(metrics_layer);
    }

    Ok(app
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(trace_layer)
        .layer(cors_layer(&state.args.server))
        .layer(CookieLayer::default())
        .with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_limit_adds_multipart_overhead() {
        assert_eq!(request_body_limit(1024), 1024 + 64 * 1024);
    }

    #[test]
    fn test_request_body_limit_saturates() {
        assert_eq!(request_body_limit(usize::MAX), usize::MAX);
        assert_eq!(request_body_limit(usize::MAX - 10), usize::MAX);
    }
}
