use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub output: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// What a route sends to the provider besides the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    Text,
    Image,
    Audio,
    Document,
}

impl Modality {
    pub fn path(self) -> &'static str {
        match self {
            Modality::Text => "/generate-text",
            Modality::Image => "/generate-from-image",
            Modality::Audio => "/generate-from-audio",
            Modality::Document => "/generate-from-document",
        }
    }

    /// Multipart field carrying the file, if the route takes one.
    pub fn file_field(self) -> Option<&'static str> {
        match self {
            Modality::Text => None,
            Modality::Image => Some("image"),
            Modality::Audio => Some("audio"),
            Modality::Document => Some("document"),
        }
    }

    /// Message returned to callers when generation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Modality::Text => "Error to generate text",
            Modality::Image => "Failed to generate image",
            Modality::Audio => "Failed to generate audio",
            Modality::Document => "Failed to generate document",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Text => "text",
            Modality::Image => "image",
            Modality::Audio => "audio",
            Modality::Document => "document",
        }
    }
}

/// `InvalidInput` is 400, `PayloadTooLarge` is 413, `GenerationFailed` is 500.
#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    PayloadTooLarge,
    GenerationFailed(Modality),
}

impl ApiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::GenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::InvalidInput(msg) => msg,
            ApiError::PayloadTooLarge => "Request body too large".to_string(),
            ApiError::GenerationFailed(modality) => modality.failure_message().to_string(),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
