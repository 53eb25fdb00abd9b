use super::types::*;
use crate::{Error, Result, config::LlmConfig};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResult>;
}

/// Gemini `generateContent` over REST.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, self.model, method)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, request: GenerationRequest) -> Result<GenerationResult> {
        debug!(
            model = %self.model,
            prompt_len = request.prompt.len(),
            attachment_mime = request.attachment.as_ref().map(|a| a.mime_type.as_str()),
            attachment_bytes = request.attachment.as_ref().map(|a| a.data.len()),
            "Sending generateContent request"
        );

        let body = GenerateContentRequest::from(&request);

        let response = self
            .client
            .post(self.api_url("generateContent"))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response.json().await?;

        debug!(
            "Received generateContent response with {} candidates",
            api_response.candidates.len()
        );

        let output_text = api_response.output_text().ok_or_else(|| {
            Error::llm(match api_response.finish_reason() {
                Some(reason) => format!("Response contained no text (finish reason: {})", reason),
                None => "Response contained no text".to_string(),
            })
        })?;

        Ok(GenerationResult { output_text })
    }
}

// Gemini wire format

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    // Function calls, thoughts and the like are skipped.
    Other(serde_json::Value),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let parts = request
            .parts()
            .into_iter()
            .map(|part| match part {
                ContentPart::Text(text) => Part::Text { text },
                ContentPart::InlineData { mime_type, data } => Part::InlineData {
                    inline_data: InlineData { mime_type, data },
                },
            })
            .collect();

        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            generation_config: request
                .max_output_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn output_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;

        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }
}
