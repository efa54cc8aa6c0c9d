use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::payments::{CreatePaymentIntentRequest, PaymentIntentCreated},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    response::{ApiResponse, ErrorResponse},
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/create-payment-intent", post(create_payment_intent))
}

#[utoipa::path(
    post,
    path = "/api/v1/payment/create-payment-intent",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = ApiResponse<PaymentIntentCreated>),
        (status = 400, description = "Course details missing or invalid", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 500, description = "Payment processor failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreatePaymentIntentRequest>,
) -> AppResult<Json<ApiResponse<PaymentIntentCreated>>> {
    let resp = payment_service::create_payment_intent(&state, &user, payload).await?;
    Ok(Json(resp))
}
