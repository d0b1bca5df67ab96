//! HTTP surface of the translation service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::error::{ErrorBody, TranslateError};
use crate::languages::LanguageTable;
use crate::translator::{TranslationRequest, TranslationResponse, Translator};

pub const SERVICE_NAME: &str = "AI Translator API";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(translator: Translator) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/translate", post(translate))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "AI Translator API is running!",
        "status": "healthy"
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME
    }))
}

#[derive(Serialize)]
struct LanguagesBody<'a> {
    languages: &'a LanguageTable,
}

// Serialized straight from the table so the listing keeps declaration order.
async fn languages(State(state): State<AppState>) -> Response {
    Json(LanguagesBody {
        languages: state.translator.languages(),
    })
    .into_response()
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslationRequest>, JsonRejection>,
) -> Result<Json<TranslationResponse>, Response> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Malformed translate body: {}", rejection.body_text());
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody::new(rejection.body_text())),
        )
            .into_response()
    })?;

    state
        .translator
        .translate(&request)
        .await
        .map(Json)
        .map_err(TranslateError::into_response)
}
