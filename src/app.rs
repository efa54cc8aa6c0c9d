use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, Method, Request, Response, StatusCode, Uri, header},
    routing::get,
};
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::{
    config::AppConfig,
    response::ErrorResponse,
    routes::{create_api_router, doc::scalar_docs, health},
    state::AppState,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Full application: API routes, docs, fallback and the middleware stack.
pub fn build_app(state: AppState) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|request: &Request<_>, _span: &tracing::Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "request started"
            );
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    let cors_layer = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .merge(scalar_docs())
        .fallback(not_found)
        .layer(trace_layer)
        .layer(cors_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(1024 * 1024))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ErrorResponse>) {
    let body = ErrorResponse {
        success: false,
        message: format!("No route for {}", uri.path()),
        error: None,
    };
    (StatusCode::NOT_FOUND, Json(body))
}
