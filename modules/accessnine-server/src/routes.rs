use std::sync::Arc;

use accessnine_core::{DefaultContext, Query, SalesAgent};
use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    agent: Arc<SalesAgent>,
    default_context: Arc<DefaultContext>,
}

impl AppState {
    pub fn new(agent: SalesAgent, default_context: DefaultContext) -> Self {
        Self {
            agent: Arc::new(agent),
            default_context: Arc::new(default_context),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    message: String,
    context: Option<String>,
}

/// Routes plus CORS and request tracing. An empty `allowed_origins` accepts
/// any origin, with credentials.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .layer(cors_layer(allowed_origins))
        // method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    // Credentials rule out wildcards; mirror the request instead.
    let cors = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    if allowed_origins.is_empty() {
        cors.allow_origin(AllowOrigin::mirror_request())
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

async fn chat(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Response {
    let context = state.default_context.resolve(body.context);
    let query = Query::new(body.message, context);

    match state.agent.invoke(&query).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!(error = %e, "Chat request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "detail": e.to_string() })),
            )
                .into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
