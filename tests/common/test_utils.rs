use super::MockLlmClient;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode},
};
use gemini_relay::{
    config::LlmConfig,
    server::{AppState, router},
};
use serde_json::Value;
use std::sync::Arc;

pub const BOUNDARY: &str = "relay-test-boundary";
pub const TEXT_MAX_OUTPUT_TOKENS: u32 = 8192;
pub const MAX_UPLOAD_BYTES: usize = 1024 * 1024;

/// Build the relay router around a mock provider
pub fn create_test_app(mock: MockLlmClient) -> Router {
    let state = AppState {
        llm: Arc::new(mock),
        text_max_output_tokens: TEXT_MAX_OUTPUT_TOKENS,
    };
    router(state, MAX_UPLOAD_BYTES)
}

/// LLM config pointed at a mock server
pub fn create_test_llm_config(base_url: &str) -> LlmConfig {
    LlmConfig {
        base_url: base_url.to_string(),
        api_key: "test-api-key".to_string(),
        model: "gemini-2.5-flash".to_string(),
        text_max_output_tokens: TEXT_MAX_OUTPUT_TOKENS,
    }
}

/// A part of a multipart/form-data body
pub enum FormPart<'a> {
    Text {
        name: &'a str,
        value: &'a str,
    },
    File {
        name: &'a str,
        filename: &'a str,
        content_type: Option<&'a str>,
        data: &'a [u8],
    },
}

/// Encode parts as a multipart/form-data body using [`BOUNDARY`]
pub fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                filename,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                if let Some(content_type) = content_type {
                    body.extend_from_slice(
                        format!("Content-Type: {}\r\n", content_type).as_bytes(),
                    );
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(uri: &str, parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

/// Split a response into its status and JSON body
pub async fn read_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "response body was not JSON ({}): {}",
            e,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, json)
}
