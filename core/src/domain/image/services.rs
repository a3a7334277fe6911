use tracing::{debug, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    image::{
        policies::ImageUploadPolicy,
        value_objects::{EncodedImage, ImageUpload},
    },
};

/// Turns a selected file into its base64 encoding after applying the
/// upload policy. Rejected files never produce an encoding.
pub fn encode_upload(
    upload: &ImageUpload,
    policy: &ImageUploadPolicy,
) -> Result<EncodedImage, CoreError> {
    let mime_type = policy.check(upload).inspect_err(|e| {
        warn!(
            file_name = upload.file_name.as_deref().unwrap_or("unknown"),
            content_type = upload.content_type.as_deref().unwrap_or("unknown"),
            size_bytes = upload.data.len(),
            error = %e,
            "Rejected image upload"
        );
    })?;

    let image = EncodedImage::encode(mime_type, &upload.data);

    debug!(
        mime_type = %image.mime_type(),
        size_bytes = image.size_bytes(),
        checksum_sha256 = image.checksum_sha256(),
        "Encoded image upload"
    );

    Ok(image)
}

/// Accepts an image that was already encoded by the client as
/// `data:<mime>;base64,<payload>`, under the same policy as file uploads.
pub fn decode_data_uri(
    data_uri: &str,
    policy: &ImageUploadPolicy,
) -> Result<EncodedImage, CoreError> {
    let image = EncodedImage::from_data_uri(data_uri.trim())
        .and_then(|image| policy.check_size(image.size_bytes()).map(|_| image))
        .inspect_err(|e| warn!(error = %e, "Rejected data URI image"))?;

    debug!(
        mime_type = %image.mime_type(),
        size_bytes = image.size_bytes(),
        checksum_sha256 = image.checksum_sha256(),
        "Decoded data URI image"
    );

    Ok(image)
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::image::value_objects::ImageMimeType;

    fn upload(file_name: &str, content_type: Option<&str>, data: &'static [u8]) -> ImageUpload {
        ImageUpload {
            file_name: Some(file_name.to_string()),
            content_type: content_type.map(str::to_string),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_encode_jpeg_upload() {
        let image = encode_upload(
            &upload("photo.jpg", Some("image/jpeg"), b"\xff\xd8\xff"),
            &ImageUploadPolicy::default(),
        )
        .unwrap();

        assert_eq!(image.mime_type(), ImageMimeType::Jpeg);
        assert_eq!(image.decode().unwrap(), b"\xff\xd8\xff");
    }

    #[test]
    fn test_content_type_wins_over_extension() {
        let image = encode_upload(
            &upload("photo.jpg", Some("image/png"), b"png-bytes"),
            &ImageUploadPolicy::default(),
        )
        .unwrap();

        assert_eq!(image.mime_type(), ImageMimeType::Png);
    }

    #[test]
    fn test_octet_stream_falls_back_to_extension() {
        let image = encode_upload(
            &upload("photo.PNG", Some("application/octet-stream"), b"png-bytes"),
            &ImageUploadPolicy::default(),
        )
        .unwrap();

        assert_eq!(image.mime_type(), ImageMimeType::Png);
    }

    #[test]
    fn test_rejects_disallowed_type() {
        let result = encode_upload(
            &upload("animation.gif", Some("image/gif"), b"GIF89a"),
            &ImageUploadPolicy::default(),
        );

        assert_eq!(
            result,
            Err(CoreError::UnsupportedMediaType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_rejects_unknown_type_without_extension() {
        let result = encode_upload(
            &upload("blob", None, b"bytes"),
            &ImageUploadPolicy::default(),
        );

        assert!(matches!(result, Err(CoreError::UnsupportedMediaType(_))));
    }

    #[test]
    fn test_rejects_empty_file() {
        let result = encode_upload(
            &upload("photo.png", Some("image/png"), b""),
            &ImageUploadPolicy::default(),
        );

        assert_eq!(result, Err(CoreError::EmptyImage));
    }

    #[test]
    fn test_rejects_oversize_file() {
        let result = encode_upload(
            &upload("photo.png", Some("image/png"), b"12345"),
            &ImageUploadPolicy::new(4),
        );

        assert_eq!(result, Err(CoreError::ImageTooLarge { size: 5, max: 4 }));
    }

    #[test]
    fn test_decode_data_uri_applies_policy() {
        let image = decode_data_uri(
            " data:image/png;base64,MTIzNDU= ",
            &ImageUploadPolicy::new(5),
        )
        .unwrap();

        assert_eq!(image.mime_type(), ImageMimeType::Png);
        assert_eq!(image.decode().unwrap(), b"12345");

        assert_eq!(
            decode_data_uri("data:image/png;base64,MTIzNDU=", &ImageUploadPolicy::new(4)),
            Err(CoreError::ImageTooLarge { size: 5, max: 4 })
        );
        assert_eq!(
            decode_data_uri("data:image/png;base64,", &ImageUploadPolicy::default()),
            Err(CoreError::EmptyImage)
        );
        assert!(matches!(
            decode_data_uri("data:image/gif;base64,R0lG", &ImageUploadPolicy::default()),
            Err(CoreError::UnsupportedMediaType(_))
        ));
        assert_eq!(
            decode_data_uri("photo.png", &ImageUploadPolicy::default()),
            Err(CoreError::InvalidDataUri)
        );
    }
}
