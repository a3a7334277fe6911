use crate::domain::{
    common::{DEFAULT_MAX_IMAGE_BYTES, entities::app_errors::CoreError},
    image::value_objects::{ImageMimeType, ImageUpload},
};

/// Limits applied to a selected file before it is encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadPolicy {
    max_bytes: usize,
}

impl Default for ImageUploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl ImageUploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Resolves the MIME type of an upload, falling back to the file
    /// extension when the client sent no usable content type.
    pub fn resolve_mime_type(&self, upload: &ImageUpload) -> Result<ImageMimeType, CoreError> {
        match upload.content_type.as_deref().map(str::trim) {
            Some(content_type)
                if !content_type.is_empty()
                    && !content_type.eq_ignore_ascii_case("application/octet-stream") =>
            {
                content_type.parse()
            }
            _ => upload
                .file_name
                .as_deref()
                .and_then(ImageMimeType::from_file_name)
                .ok_or_else(|| {
                    CoreError::UnsupportedMediaType(
                        upload
                            .content_type
                            .clone()
                            .unwrap_or_else(|| "unknown".to_string()),
                    )
                }),
        }
    }

    pub fn check(&self, upload: &ImageUpload) -> Result<ImageMimeType, CoreError> {
        let mime_type = self.resolve_mime_type(upload)?;
        self.check_size(upload.data.len())?;

        Ok(mime_type)
    }

    pub fn check_size(&self, size_bytes: usize) -> Result<(), CoreError> {
        if size_bytes == 0 {
            return Err(CoreError::EmptyImage);
        }

        if size_bytes > self.max_bytes {
            return Err(CoreError::ImageTooLarge {
                size: size_bytes,
                max: self.max_bytes,
            });
        }

        Ok(())
    }
}
