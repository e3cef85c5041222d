//! HTTP endpoint
//!
//! # Endpoints
//!
//! - GET /?q=<text> - Ask Sara; the reply is the plain-text body
//! - GET /health - Liveness probe
//!
//! A missing `q` is treated as "Ask Sara anything!". The exact word "quit"
//! (any case) gets a farewell without touching the pipeline or its memory.
//! Generation failures become a 500 carrying the error's user hint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use sdk::{EngineError, SaraErrorExt};
use serde::Deserialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::pipeline::ResponsePipeline;

/// Query used when the request carries none
pub const DEFAULT_QUERY: &str = "Ask Sara anything!";

/// Reply to "quit"
pub const FAREWELL: &str = "Sara says: Catch you later—stay curious!";

#[derive(Debug, Deserialize)]
struct AskQuery {
    q: Option<String>,
}

/// Build the router around a shared pipeline
pub fn router(pipeline: Arc<ResponsePipeline>) -> Router {
    Router::new()
        .route("/", get(ask_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// Answer one query the way the HTTP endpoint does
pub async fn answer(pipeline: &ResponsePipeline, query: &str) -> Result<String, EngineError> {
    if query.eq_ignore_ascii_case("quit") {
        return Ok(FAREWELL.to_string());
    }
    pipeline.respond(query).await
}

async fn ask_handler(
    State(pipeline): State<Arc<ResponsePipeline>>,
    Query(params): Query<AskQuery>,
) -> Response {
    let query = params.q.unwrap_or_else(|| DEFAULT_QUERY.to_string());

    match answer(&pipeline, &query).await {
        Ok(reply) => (StatusCode::OK, reply).into_response(),
        Err(e) => {
            tracing::error!("Failed to answer {:?}: {}", query, e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.user_hint().to_string()).into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(
    pipeline: Arc<ResponsePipeline>,
    addr: SocketAddr,
    shutdown: F,
) -> Result<(), EngineError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| EngineError::Network(format!("Failed to bind to {}: {}", addr, e)))?;

    let local = listener
        .local_addr()
        .map_err(|e| EngineError::Network(format!("Failed to get local address: {}", e)))?;

    tracing::info!("Sara's online! Visit http://{}/?q=your-question", local);

    axum::serve(listener, router(pipeline))
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Server shutting down gracefully");
        })
        .await
        .map_err(|e| EngineError::Network(format!("Server error: {}", e)))
}
