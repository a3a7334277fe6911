use std::{sync::Arc, time::Duration};

use axum::http::{
    HeaderValue, StatusCode,
    header::{COOKIE, LOCATION, SET_COOKIE},
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use nutrition_advisor_core::domain::session::value_objects::{SessionStatus, SessionView};
use serde_json::json;
use test_context::{AsyncTestContext, test_context};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::{
    application::{
        http::{
            analysis::handlers::{
                analyze_data_uri::AnalyzeDataUriRequest, analyze_image::AnalyzeImageResponse,
            },
            health::HealthResponse,
            server::{
                api_entities::api_error::ApiErrorResponse,
                config::PublicConfig,
                http_server::{router, state},
            },
        },
        session_middleware::SESSION_COOKIE,
    },
    args::Args,
};

const GEMINI_PATH: &str = "/v1beta/models/test-model:generateContent";
const API_KEY: &str = "test-gemini-key";
const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0\x00\x10JFIF\x00food";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfood";

struct AppContext {
    gemini: MockServer,
    server: TestServer,
}

impl AsyncTestContext for AppContext {
    async fn setup() -> AppContext {
        AppContext::start(&[]).await
    }
}

impl AppContext {
    /// Starts the app against a fresh model mock, with `extra` appended to
    /// the command line
    async fn start(extra: &[&str]) -> AppContext {
        let gemini = MockServer::start().await;
        let base_url = gemini.uri();

        let mut argv = vec![
            "nutrition-advisor",
            "--gemini-api-key",
            API_KEY,
            "--gemini-model",
            "test-model",
            "--gemini-base-url",
            base_url.as_str(),
            "--llm-timeout-secs",
            "5",
            "--metrics-enabled",
            "false",
        ];
        argv.extend_from_slice(extra);
        let args = Args::parse_from(argv);

        let app_state = state(Arc::new(args)).await.expect("state");
        let server = TestServer::new(router(app_state).expect("router")).expect("test server");

        AppContext { gemini, server }
    }

    async fn mock_gemini_answer(&self, text: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({
                        "candidates": [{
                            "content": { "parts": [{ "text": text }], "role": "model" },
                            "finishReason": "STOP"
                        }]
                    }))
                    .set_delay(delay),
            )
            .mount(&self.gemini)
            .await;
    }

    async fn mock_gemini_failure(&self) {
        Mock::given(method("POST"))
            .and(path(GEMINI_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend error"))
            .mount(&self.gemini)
            .await;
    }

    async fn create_session(&self) -> SessionView {
        let response = self.server.post("/api/sessions").await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        response.json::<SessionView>()
    }

    async fn wait_until_settled(&self, session_id: uuid::Uuid) -> SessionView {
        for _ in 0..300 {
            let view = self
                .server
                .get(&format!("/api/sessions/{}", session_id))
                .await
                .json::<SessionView>();
            if !view.is_pending {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session {session_id} never settled");
    }
}

fn image_form(file_name: &str, mime_type: &str, bytes: &[u8]) -> MultipartForm {
    MultipartForm::new().add_part(
        "image",
        Part::bytes(bytes.to_vec())
            .file_name(file_name)
            .mime_type(mime_type),
    )
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_health(ctx: &mut AppContext) {
    let response = ctx.server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<HealthResponse>().status, "ok");
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_public_config_hides_credential(ctx: &mut AppContext) {
    let response = ctx.server.get("/api/config").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(!response.text().contains(API_KEY));

    let config = response.json::<PublicConfig>();
    assert_eq!(config.model, "test-model");
    assert_eq!(config.accepted_mime_types.len(), 2);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_jpeg_analysis_reaches_done(ctx: &mut AppContext) {
    ctx.mock_gemini_answer("Calories: 250", Duration::from_millis(200))
        .await;
    let session = ctx.create_session().await;

    let response = ctx
        .server
        .post(&format!("/api/sessions/{}/image", session.session_id))
        .multipart(image_form("photo.jpg", "image/jpeg", JPEG_BYTES))
        .await;

    assert_eq!(response.status_code(), StatusCode::ACCEPTED);
    let pending = response.json::<SessionView>();
    assert_eq!(pending.status, SessionStatus::Awaiting);
    assert!(pending.is_pending);
    assert!(!pending.can_reset);
    assert!(pending.result_text.is_none());
    assert!(
        pending
            .preview
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,")
    );

    let done = ctx.wait_until_settled(session.session_id).await;

    assert_eq!(done.status, SessionStatus::Done);
    assert_eq!(done.result_text.as_deref(), Some("Calories: 250"));
    assert_eq!(done.result_html.as_deref(), Some("<p>Calories: 250</p>\n"));
    assert!(done.can_reset);
    assert_eq!(done.preview, pending.preview);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_png_failure_keeps_image_without_result(ctx: &mut AppContext) {
    ctx.mock_gemini_failure().await;
    let session = ctx.create_session().await;

    let response = ctx
        .server
        .post(&format!("/api/sessions/{}/image", session.session_id))
        .multipart(image_form("photo.png", "image/png", PNG_BYTES))
        .await;
    assert_eq!(response.status_code(), StatusCode::ACCEPTED);

    let failed = ctx.wait_until_settled(session.session_id).await;

    assert_eq!(failed.status, SessionStatus::Failed);
    assert!(!failed.is_pending);
    assert!(failed.result_text.is_none());
    assert!(failed.preview.is_some());
    assert!(failed.error.is_some());
    assert!(failed.can_reset);

    let reset = ctx
        .server
        .post(&format!("/api/sessions/{}/reset", session.session_id))
        .await
        .json::<SessionView>();
    assert_eq!(reset.status, SessionStatus::Idle);
    assert!(reset.preview.is_none());
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_disallowed_type_is_rejected_without_transition(ctx: &mut AppContext) {
    let session = ctx.create_session().await;

    let response = ctx
        .server
        .post(&format!("/api/sessions/{}/image", session.session_id))
        .multipart(image_form("animation.gif", "image/gif", b"GIF89a"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        response.json::<ApiErrorResponse>().code,
        "E_UNSUPPORTED_MEDIA_TYPE"
    );

    let view = ctx
        .server
        .get(&format!("/api/sessions/{}", session.session_id))
        .await
        .json::<SessionView>();
    assert_eq!(view.status, SessionStatus::Idle);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_pending_session_cannot_be_reset(ctx: &mut AppContext) {
    ctx.mock_gemini_answer("Calories: 250", Duration::from_millis(500))
        .await;
    let session = ctx.create_session().await;

    ctx.server
        .post(&format!("/api/sessions/{}/image", session.session_id))
        .multipart(image_form("photo.jpg", "image/jpeg", JPEG_BYTES))
        .await;
    let response = ctx
        .server
        .post(&format!("/api/sessions/{}/reset", session.session_id))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);

    ctx.wait_until_settled(session.session_id).await;
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_unknown_session_is_not_found(ctx: &mut AppContext) {
    let response = ctx
        .server
        .get(&format!("/api/sessions/{}", uuid::Uuid::new_v4()))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_synchronous_analysis(ctx: &mut AppContext) {
    ctx.mock_gemini_answer("## Meal\n\n**Calories:** 480", Duration::ZERO)
        .await;

    let response = ctx
        .server
        .post("/api/analysis")
        .multipart(image_form("plate.png", "image/png", PNG_BYTES))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let report = response.json::<AnalyzeImageResponse>().data;
    assert_eq!(report.text, "## Meal\n\n**Calories:** 480");
    assert!(report.html.contains("<h2>Meal</h2>"));
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_synchronous_analysis_failure_is_bad_gateway(ctx: &mut AppContext) {
    ctx.mock_gemini_failure().await;

    let response = ctx
        .server
        .post("/api/analysis")
        .multipart(image_form("plate.jpg", "image/jpeg", JPEG_BYTES))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_missing_image_field(ctx: &mut AppContext) {
    let response = ctx
        .server
        .post("/api/analysis")
        .multipart(MultipartForm::new().add_text("note", "no photo"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_page_flow(ctx: &mut AppContext) {
    ctx.mock_gemini_answer("Calories: 250", Duration::ZERO).await;

    let response = ctx.server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().contains("Nutrition Advisor"));
    assert!(response.text().contains("accept=\"image/jpeg,image/png\""));

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));
    let session_cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(session_cookie.starts_with(&format!("{}=", SESSION_COOKIE)));
    let session_id = session_cookie
        .split_once('=')
        .unwrap()
        .1
        .parse::<uuid::Uuid>()
        .unwrap();
    let cookie = HeaderValue::from_str(&session_cookie).unwrap();

    let response = ctx
        .server
        .post("/upload")
        .add_header(COOKIE, cookie.clone())
        .multipart(image_form("photo.jpg", "image/jpeg", JPEG_BYTES))
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(LOCATION).unwrap(), "/");

    ctx.wait_until_settled(session_id).await;

    let page = ctx.server.get("/").add_header(COOKIE, cookie.clone()).await;
    let html = page.text();
    assert!(html.contains("<img src=\"data:image/jpeg;base64,"));
    assert!(html.contains("<p>Calories: 250</p>"));
    assert!(html.contains("class=\"reset\""));

    let response = ctx
        .server
        .post("/reset")
        .add_header(COOKIE, cookie.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::SEE_OTHER);

    let html = ctx.server.get("/").add_header(COOKIE, cookie).await.text();
    assert!(html.contains("class=\"dropzone\""));
    assert!(!html.contains("<img"));
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_page_rejects_disallowed_type(ctx: &mut AppContext) {
    let response = ctx
        .server
        .post("/upload")
        .multipart(image_form("menu.pdf", "application/pdf", b"%PDF-1.7"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let html = response.text();
    assert!(html.contains("Unsupported media type: application/pdf"));
    assert!(html.contains("class=\"dropzone\""));
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_openapi_document(ctx: &mut AppContext) {
    let response = ctx.server.get("/api-docs/openapi.json").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let document = response.text();
    assert!(document.contains("/api/sessions/{session_id}/image"));
    assert!(document.contains("/api/analysis"));
    assert!(document.contains("/api/analysis/data-uri"));
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_data_uri_analysis(ctx: &mut AppContext) {
    ctx.mock_gemini_answer("Calories: 480", Duration::ZERO).await;

    let response = ctx
        .server
        .post("/api/analysis/data-uri")
        .json(&AnalyzeDataUriRequest {
            image: "data:image/png;base64,iVBORw0KGgoAAAANSUhEUmZvb2Q=".to_string(),
        })
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<AnalyzeImageResponse>().data.text,
        "Calories: 480"
    );
}

#[test_context(AppContext)]
#[tokio::test]
async fn test_malformed_data_uri_is_bad_request(ctx: &mut AppContext) {
    let response = ctx
        .server
        .post("/api/analysis/data-uri")
        .json(&json!({ "image": "photo.png" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ApiErrorResponse>().message, "Invalid data URI");

    let response = ctx
        .server
        .post("/api/analysis/data-uri")
        .json(&json!({ "picture": "data:image/png;base64,AA==" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ApiErrorResponse>().code, "E_BAD_REQUEST");
}

#[tokio::test]
async fn test_body_over_transport_limit_is_payload_too_large() {
    let ctx = AppContext::start(&["--max-image-bytes", "1024"]).await;
    let oversized = vec![0xff; 200 * 1024];

    let response = ctx
        .server
        .post("/api/analysis")
        .multipart(image_form("huge.jpg", "image/jpeg", &oversized))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.json::<ApiErrorResponse>().code,
        "E_PAYLOAD_TOO_LARGE"
    );

    let response = ctx
        .server
        .post("/upload")
        .multipart(image_form("huge.jpg", "image/jpeg", &oversized))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.text().contains("class=\"dropzone\""));

    let data_uri = format!("data:image/jpeg;base64,{}", "A".repeat(200 * 1024));
    let response = ctx
        .server
        .post("/api/analysis/data-uri")
        .json(&json!({ "image": data_uri }))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        response.json::<ApiErrorResponse>().code,
        "E_PAYLOAD_TOO_LARGE"
    );
}

#[tokio::test]
async fn test_image_over_policy_limit_is_payload_too_large() {
    let ctx = AppContext::start(&["--max-image-bytes", "1024"]).await;

    let response = ctx
        .server
        .post("/api/analysis")
        .multipart(image_form("big.jpg", "image/jpeg", &[0xff; 2000]))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    let error = response.json::<ApiErrorResponse>();
    assert_eq!(error.code, "E_PAYLOAD_TOO_LARGE");
    assert_eq!(
        error.message,
        "Image too large: 2000 bytes exceeds the 1024 byte limit"
    );

    let session = ctx.create_session().await;
    let response = ctx
        .server
        .post(&format!("/api/sessions/{}/image", session.session_id))
        .multipart(image_form("big.jpg", "image/jpeg", &[0xff; 2000]))
        .await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    let view = ctx
        .server
        .get(&format!("/api/sessions/{}", session.session_id))
        .await
        .json::<SessionView>();
    assert_eq!(view.status, SessionStatus::Idle);
}
