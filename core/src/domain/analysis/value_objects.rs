use crate::domain::image::value_objects::{EncodedImage, ImageMimeType};

/// Parameters of a single call to the analysis model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateAnswerInput {
    /// Base64 image content without its data URI prefix
    pub file_base64: String,
    pub file_mime_type: ImageMimeType,
    pub prompt: String,
}

impl GenerateAnswerInput {
    pub fn from_image(image: &EncodedImage, prompt: impl Into<String>) -> Self {
        Self {
            file_base64: image.payload().to_string(),
            file_mime_type: image.mime_type(),
            prompt: prompt.into(),
        }
    }
}
