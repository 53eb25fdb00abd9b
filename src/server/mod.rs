mod extract;
pub mod handlers;
mod types;

pub use extract::{TextPrompt, Upload};
pub use handlers::AppState;
pub use types::{ApiError, ErrorResponse, GenerateResponse, GenerateTextRequest, Modality};

use crate::{
    Result,
    config::{API_KEY_ENV, Config},
    llm::GeminiClient,
};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Builds the relay routes around an already constructed provider handle.
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(Modality::Text.path(), post(handlers::generate_text))
        .route(Modality::Image.path(), post(handlers::generate_from_image))
        .route(Modality::Audio.path(), post(handlers::generate_from_audio))
        .route(
            Modality::Document.path(),
            post(handlers::generate_from_document),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    if config.llm.api_key.is_empty() {
        warn!("{} is not set; provider calls will fail", API_KEY_ENV);
    }

    let client = GeminiClient::new(config.llm.clone());
    info!("Using model {}", client.model());

    let app_state = AppState {
        llm: Arc::new(client),
        text_max_output_tokens: config.llm.text_max_output_tokens,
    };

    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server ready on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
