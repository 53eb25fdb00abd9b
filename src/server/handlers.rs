use super::{
    extract::{TextPrompt, Upload},
    types::{ApiError, GenerateResponse, Modality},
};
use crate::llm::{GenerationRequest, LlmClient};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LlmClient>,
    pub text_max_output_tokens: u32,
}

pub async fn generate_text(
    State(state): State<AppState>,
    prompt: Result<TextPrompt, ApiError>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let TextPrompt(prompt) = prompt.inspect_err(|e| reject(Modality::Text, e))?;

    let request =
        GenerationRequest::text(prompt).with_max_output_tokens(state.text_max_output_tokens);
    generate(&state, Modality::Text, request).await
}

pub async fn generate_from_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    generate_from_upload(&state, Modality::Image, multipart).await
}

pub async fn generate_from_audio(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    generate_from_upload(&state, Modality::Audio, multipart).await
}

pub async fn generate_from_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    generate_from_upload(&state, Modality::Document, multipart).await
}

async fn generate_from_upload(
    state: &AppState,
    modality: Modality,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let multipart = multipart
        .map_err(|e| ApiError::invalid_input(e.body_text()))
        .inspect_err(|e| reject(modality, e))?;

    let upload = Upload::read(multipart, modality)
        .await
        .inspect_err(|e| reject(modality, e))?;

    let request = GenerationRequest::text(upload.prompt).with_attachment(upload.attachment);
    generate(state, modality, request).await
}

async fn generate(
    state: &AppState,
    modality: Modality,
    request: GenerationRequest,
) -> Result<Json<GenerateResponse>, ApiError> {
    info!(
        modality = modality.as_str(),
        prompt_len = request.prompt.len(),
        "Received generation request"
    );

    match state.llm.generate_content(request).await {
        Ok(result) => {
            info!(modality = modality.as_str(), "Generation succeeded");
            Ok(Json(GenerateResponse {
                output: result.output_text,
            }))
        }
        Err(e) => {
            error!("Error generating {}: {}", modality.as_str(), e);
            Err(ApiError::GenerationFailed(modality))
        }
    }
}

fn reject(modality: Modality, e: &ApiError) {
    warn!("Rejected {} request: {:?}", modality.as_str(), e);
}
