use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::{InterviewError, Result};
use crate::interfaces::providers::CompletionProvider;
use crate::prompts::UNAVAILABLE_MESSAGE;
use crate::providers::openai::OpenAiProvider;
use crate::services::conversation::ConversationService;

#[derive(Clone)]
pub struct AppState {
    pub conversation: Arc<ConversationService>,
}

impl AppState {
    pub fn new(provider: Arc<dyn CompletionProvider>, system_prompt: &str) -> Self {
        Self {
            conversation: Arc::new(ConversationService::new(provider, system_prompt)),
        }
    }
}

/// Bodies that are not a JSON object with a string `message` count as an
/// empty message.
#[derive(Deserialize, Default)]
struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct ChatResponse {
    reply: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("MOCK_INTERVIEW_VERSION").to_string(),
    })
}

async fn chat(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let payload = serde_json::from_slice::<ChatRequest>(&body).unwrap_or_default();
    match state.conversation.exchange(&payload.message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(err) => {
            tracing::error!("AI snag: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: UNAVAILABLE_MESSAGE.to_string(),
                }),
            )
                .into_response()
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    run_with_shutdown(config, futures::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.api_key().is_none() {
        tracing::warn!(
            "No API key configured; every /chat exchange will fail until {} is set",
            crate::config::API_KEY_ENV
        );
    }

    let provider = OpenAiProvider::from_config(&config.provider);
    tracing::info!(model = %provider.model(), "Using completion provider");
    let state = AppState::new(Arc::new(provider), config.system_prompt());
    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| InterviewError::Runtime(e.to_string()))?;
    tracing::info!("Interview proxy listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| InterviewError::Runtime(e.to_string()))?;

    Ok(())
}
