use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{ports::AnswerGenerator, value_objects::GenerateAnswerInput},
    common::{LLMConfig, entities::app_errors::CoreError},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Calls the Gemini `generateContent` endpoint with the photo inlined as
/// base64. The API key stays on the server.
#[derive(Clone)]
pub struct GeminiAnswerGenerator {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

impl std::fmt::Debug for GeminiAnswerGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAnswerGenerator")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

impl GeminiAnswerGenerator {
    /// A `request_timeout_secs` of 0 leaves requests without a deadline
    pub fn new(config: &LLMConfig) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }

        let client = builder
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build Gemini HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model_name: config.gemini_model.clone(),
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model_name
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {}",
                status
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })?;

        if let Some(reason) = gemini_response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
            return Err(CoreError::ExternalServiceError(format!(
                "LLM blocked the request: {}",
                reason
            )));
        }

        let candidate = gemini_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(CoreError::ExternalServiceError(format!(
                "No text in LLM response (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

impl AnswerGenerator for GeminiAnswerGenerator {
    async fn generate_answer(&self, input: GenerateAnswerInput) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: input.prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: input.file_mime_type.to_string(),
                            data: input.file_base64,
                        },
                    },
                ],
            }],
        };

        self.call_gemini_api(request).await
    }
}
