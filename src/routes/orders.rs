use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::{
    dto::orders::{CreateOrderRequest, OrderReceipt},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    response::{ApiResponse, ErrorResponse},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/order", post(create_order))
}

#[utoipa::path(
    post,
    path = "/api/v1/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order and purchase recorded", body = ApiResponse<OrderReceipt>),
        (status = 400, description = "Missing required order fields", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Order belongs to another user", body = ErrorResponse),
        (status = 500, description = "Error saving order", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderReceipt>>)> {
    let resp = order_service::create_order(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
