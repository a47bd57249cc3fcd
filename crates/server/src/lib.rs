//! HTTP façade over the Page Zen extraction pipeline.

pub mod config;
pub mod handlers;
pub mod logging;

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use page_zen_core::Extractor;
use tower::ServiceBuilder;
use tower_http::LatencyUnit;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
}

impl AppState {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor: Arc::new(extractor) }
    }
}

/// Builds the application router with CORS, tracing, panic recovery and the
/// inbound request timeout.
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
            Method::PATCH,
        ])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE]);

    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let user_agent = request
                .headers()
                .get(header::USER_AGENT)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("");
            tracing::info_span!(
                "request",
                id = %Uuid::new_v4(),
                method = %request.method(),
                path = %request.uri().path(),
                user_agent = %user_agent,
            )
        })
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO).latency_unit(LatencyUnit::Millis))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR).latency_unit(LatencyUnit::Millis));

    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/extract",
            get(handlers::extract_article_simple).post(handlers::extract_article),
        )
        .route(
            "/opengraph",
            get(handlers::extract_opengraph_simple).post(handlers::extract_opengraph),
        )
        .layer(
            ServiceBuilder::new()
                .layer(trace)
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(cors)
                .layer(map_response(timeout_envelope))
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

/// The timeout layer answers with an empty 408; give it the JSON envelope.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request exceeded the inbound timeout");
    let body = serde_json::json!({ "success": false, "message": "Request timed out" });
    (StatusCode::REQUEST_TIMEOUT, Json(body)).into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    let body = serde_json::json!({ "success": false, "message": "Internal server error" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
