use super::types::{ApiError, GenerateTextRequest, Modality};
use crate::llm::Attachment;
use async_trait::async_trait;
use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, multipart::MultipartError},
    http::{StatusCode, header::CONTENT_TYPE},
};
use tracing::debug;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Prompt read from a JSON or urlencoded form body.
#[derive(Debug)]
pub struct TextPrompt(pub String);

#[async_trait]
impl<S> FromRequest<S> for TextPrompt
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let body = if is_json(&content_type) {
            let Json(body) = Json::<GenerateTextRequest>::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            body
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(body) = Form::<GenerateTextRequest>::from_request(req, state)
                .await
                .map_err(|e| rejection_error(e.status(), e.body_text()))?;
            body
        } else {
            return Err(ApiError::invalid_input("Expected a JSON or form-encoded body"));
        };

        body.prompt
            .map(TextPrompt)
            .ok_or_else(|| ApiError::invalid_input("Missing field: prompt"))
    }
}

/// Prompt plus the single file a route expects.
#[derive(Debug)]
pub struct Upload {
    pub prompt: String,
    pub attachment: Attachment,
}

impl Upload {
    /// Buffers the `prompt` field and the route's file field. Other fields
    /// are skipped; order does not matter.
    pub async fn read(mut multipart: Multipart, modality: Modality) -> Result<Self, ApiError> {
        let file_field = modality
            .file_field()
            .ok_or_else(|| ApiError::invalid_input("Route does not accept uploads"))?;

        let mut prompt = None;
        let mut attachment = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "prompt" {
                prompt = Some(field.text().await.map_err(multipart_error)?);
            } else if name == file_field {
                if attachment.is_some() {
                    return Err(ApiError::invalid_input(format!(
                        "Duplicate file field: {}",
                        file_field
                    )));
                }
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                debug!(
                    field = %name,
                    mime_type = %mime_type,
                    bytes = data.len(),
                    "Read uploaded file"
                );
                attachment = Some(Attachment::new(mime_type, data));
            } else {
                debug!(field = %name, "Ignoring unexpected multipart field");
            }
        }

        let prompt = prompt.ok_or_else(|| ApiError::invalid_input("Missing field: prompt"))?;
        let attachment = attachment.ok_or_else(|| {
            ApiError::invalid_input(format!("Missing file field: {}", file_field))
        })?;

        Ok(Self { prompt, attachment })
    }
}

/// `application/json` or any `application/*+json` type, as axum's `Json` accepts.
fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.split_once('/') {
        Some(("application", subtype)) => subtype == "json" || subtype.ends_with("+json"),
        _ => false,
    }
}

fn rejection_error(status: StatusCode, body_text: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::invalid_input(body_text)
    }
}

fn multipart_error(e: MultipartError) -> ApiError {
    rejection_error(e.status(), e.body_text())
}
