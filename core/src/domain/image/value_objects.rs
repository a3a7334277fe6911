use std::{fmt, str::FromStr};

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::domain::common::entities::app_errors::CoreError;

/// Image formats accepted by the dropzone and the upload endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ImageMimeType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl ImageMimeType {
    pub const ACCEPTED: [ImageMimeType; 2] = [ImageMimeType::Jpeg, ImageMimeType::Png];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
        }
    }

    /// Comma separated list suitable for an `<input accept="...">` attribute
    pub fn accept_attribute() -> String {
        Self::ACCEPTED
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Infers the type from a file extension (`.jpg`, `.jpeg`, `.png`)
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, extension) = file_name.rsplit_once('.')?;

        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMimeType::Jpeg),
            "png" => Some(ImageMimeType::Png),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMimeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();

        if essence.eq_ignore_ascii_case("image/jpeg") {
            Ok(ImageMimeType::Jpeg)
        } else if essence.eq_ignore_ascii_case("image/png") {
            Ok(ImageMimeType::Png)
        } else {
            Err(CoreError::UnsupportedMediaType(essence.to_string()))
        }
    }
}

/// A file exactly as the user selected it
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Base64 form of an uploaded image, used both for the preview and as the
/// payload sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    mime_type: ImageMimeType,
    payload: String,
    size_bytes: usize,
    checksum_sha256: String,
}

impl EncodedImage {
    pub fn encode(mime_type: ImageMimeType, data: &[u8]) -> Self {
        Self {
            mime_type,
            payload: general_purpose::STANDARD.encode(data),
            size_bytes: data.len(),
            checksum_sha256: hex::encode(Sha256::digest(data)),
        }
    }

    /// Parses `data:<mime>;base64,<payload>`
    pub fn from_data_uri(data_uri: &str) -> Result<Self, CoreError> {
        let rest = data_uri
            .strip_prefix("data:")
            .ok_or(CoreError::InvalidDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(CoreError::InvalidDataUri)?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or(CoreError::InvalidDataUri)?;

        let mime_type = mime.parse::<ImageMimeType>()?;
        let data = general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| CoreError::InvalidDataUri)?;

        Ok(Self::encode(mime_type, &data))
    }

    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }

    /// Base64 content without the `data:` prefix
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    pub fn checksum_sha256(&self) -> &str {
        &self.checksum_sha256
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }

    pub fn decode(&self) -> Result<Vec<u8>, CoreError> {
        general_purpose::STANDARD.decode(&self.payload).map_err(|e| {
            tracing::error!("Failed to decode stored image payload: {}", e);
            CoreError::InternalServerError
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff];

    #[test]
    fn test_mime_type_parse_is_case_insensitive_and_ignores_params() {
        assert_eq!("IMAGE/JPEG".parse::<ImageMimeType>(), Ok(ImageMimeType::Jpeg));
        assert_eq!(
            "image/png; charset=binary".parse::<ImageMimeType>(),
            Ok(ImageMimeType::Png)
        );
    }

    #[test]
    fn test_mime_type_rejects_other_images() {
        assert_eq!(
            "image/gif".parse::<ImageMimeType>(),
            Err(CoreError::UnsupportedMediaType("image/gif".to_string()))
        );
        assert!("image/webp".parse::<ImageMimeType>().is_err());
    }

    #[test]
    fn test_mime_type_from_file_name() {
        assert_eq!(
            ImageMimeType::from_file_name("lunch.JPG"),
            Some(ImageMimeType::Jpeg)
        );
        assert_eq!(
            ImageMimeType::from_file_name("plate.jpeg"),
            Some(ImageMimeType::Jpeg)
        );
        assert_eq!(
            ImageMimeType::from_file_name("salad.png"),
            Some(ImageMimeType::Png)
        );
        assert_eq!(ImageMimeType::from_file_name("menu.pdf"), None);
        assert_eq!(ImageMimeType::from_file_name("noextension"), None);
    }

    #[test]
    fn test_accept_attribute() {
        assert_eq!(ImageMimeType::accept_attribute(), "image/jpeg,image/png");
    }

    #[test]
    fn test_encode_is_lossless() {
        let image = EncodedImage::encode(ImageMimeType::Png, PNG_HEADER);

        assert_eq!(image.size_bytes(), PNG_HEADER.len());
        assert_eq!(image.decode().unwrap(), PNG_HEADER);
        assert!(!image.payload().starts_with("data:"));
    }

    #[test]
    fn test_data_uri_preview_embeds_selected_bytes() {
        let image = EncodedImage::encode(ImageMimeType::Jpeg, b"\xff\xd8\xff\xe0jfif");
        let data_uri = image.data_uri();

        assert!(data_uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(data_uri.split(',').nth(1), Some(image.payload()));

        let parsed = EncodedImage::from_data_uri(&data_uri).unwrap();
        assert_eq!(parsed, image);
        assert_eq!(parsed.decode().unwrap(), b"\xff\xd8\xff\xe0jfif");
    }

    #[test]
    fn test_checksum_is_sha256_hex() {
        let image = EncodedImage::encode(ImageMimeType::Png, b"");
        assert_eq!(
            image.checksum_sha256(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_from_data_uri_rejects_malformed_input() {
        assert_eq!(
            EncodedImage::from_data_uri("image/png;base64,AAAA"),
            Err(CoreError::InvalidDataUri)
        );
        assert_eq!(
            EncodedImage::from_data_uri("data:image/png;base64"),
            Err(CoreError::InvalidDataUri)
        );
        assert_eq!(
            EncodedImage::from_data_uri("data:image/png,AAAA"),
            Err(CoreError::InvalidDataUri)
        );
        assert_eq!(
            EncodedImage::from_data_uri("data:image/png;base64,***"),
            Err(CoreError::InvalidDataUri)
        );
        assert!(matches!(
            EncodedImage::from_data_uri("data:image/gif;base64,AAAA"),
            Err(CoreError::UnsupportedMediaType(_))
        ));
    }
}
