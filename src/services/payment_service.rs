use crate::{
    dto::payments::{CreatePaymentIntentRequest, PaymentIntentCreated, PriceInput},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    payments::{MIN_CHARGE, PaymentIntentRequest, apply_price_floor, to_minor_units},
    response::ApiResponse,
    state::AppState,
};

const INVALID_COURSE: &str = "Course details missing or invalid";

pub async fn create_payment_intent(
    state: &AppState,
    user: &AuthUser,
    payload: CreatePaymentIntentRequest,
) -> AppResult<ApiResponse<PaymentIntentCreated>> {
    let course = payload
        .course
        .ok_or_else(|| AppError::BadRequest(INVALID_COURSE.into()))?;
    let price = course
        .price
        .as_ref()
        .filter(|p| p.is_present())
        .and_then(PriceInput::as_f64)
        .ok_or_else(|| AppError::BadRequest(INVALID_COURSE.into()))?;

    let fixed_price = apply_price_floor(price);
    if fixed_price != price {
        tracing::warn!(
            price,
            minimum = MIN_CHARGE,
            "course price below processor minimum, charging the minimum"
        );
    }
    let amount = to_minor_units(fixed_price);

    let title = course
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or("Untitled Course");

    tracing::info!(
        user_id = %user.user_id,
        fixed_price,
        amount,
        currency = %state.config.currency,
        "creating payment intent"
    );

    let intent = state
        .payments
        .create_payment_intent(PaymentIntentRequest {
            amount,
            currency: state.config.currency.clone(),
            description: format!("Purchase of course: {title}"),
        })
        .await?;

    tracing::info!(
        intent_id = %intent.id,
        user_id = %user.user_id,
        amount = intent.amount,
        status = %intent.status,
        "payment intent ready"
    );

    Ok(ApiResponse::success(
        "Payment intent created",
        PaymentIntentCreated {
            client_secret: intent.client_secret,
            fixed_price,
        },
    ))
}
