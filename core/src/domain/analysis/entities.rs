use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{
    analysis::renderer::render_markdown,
    common::generate_timestamp,
    image::value_objects::ImageMimeType,
};

/// Nutritional analysis returned by the model, with its rendered HTML form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub mime_type: ImageMimeType,
    pub checksum_sha256: String,
    /// Free-form text as returned by the model, usually Markdown
    pub text: String,
    pub html: String,
    pub created_at: DateTime<Utc>,
}

impl AnalysisReport {
    pub fn new(mime_type: ImageMimeType, checksum_sha256: String, text: String) -> Self {
        let (now, timestamp) = generate_timestamp();
        let html = render_markdown(&text);

        Self {
            id: Uuid::new_v7(timestamp),
            mime_type,
            checksum_sha256,
            text,
            html,
            created_at: now,
        }
    }
}
