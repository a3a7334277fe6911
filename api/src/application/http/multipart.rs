use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::StatusCode,
};
use nutrition_advisor_core::domain::image::value_objects::ImageUpload;
use tracing::error;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const IMAGE_FIELD: &str = "image";

/// Reads the single `image` field of a multipart form. Unknown fields are
/// ignored; a second image is rejected.
pub async fn read_image_upload(multipart: &mut Multipart) -> Result<ImageUpload, ApiError> {
    let mut upload: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Failed to read multipart field", e))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        if upload.is_some() {
            return Err(ApiError::BadRequest(
                "Only one image can be analyzed at a time".to_string(),
            ));
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error("Failed to read image", e))?;

        upload = Some(ImageUpload {
            file_name,
            content_type,
            data,
        });
    }

    upload.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))
}

fn multipart_error(context: &str, e: MultipartError) -> ApiError {
    error!("{}: {}", context, e);

    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(format!("{}: {}", context, e.body_text()))
    } else {
        ApiError::BadRequest(format!("{}: {}", context, e.body_text()))
    }
}
