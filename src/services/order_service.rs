use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DbErr, Set, TransactionTrait};
use uuid::Uuid;

use crate::{
    dto::{
        orders::{CreateOrderRequest, OrderReceipt},
        payments::PriceInput,
    },
    entity::{
        orders::{ActiveModel as OrderActive, Model as OrderModel},
        purchases::{ActiveModel as PurchaseActive, Model as PurchaseModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::ApiResponse,
    state::AppState,
};

const MISSING_FIELDS: &str = "Missing required order fields";

/// A fully populated order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub email: String,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub payment_id: String,
    pub amount: f64,
    pub status: String,
}

/// Records a payment the client already confirmed with the processor: one
/// order row and one purchase row pointing at it, written in one transaction.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderReceipt>> {
    let new_order = validate_order(payload)?;

    if new_order.user_id != user.user_id {
        tracing::warn!(
            caller = %user.user_id,
            claimed = %new_order.user_id,
            "order submitted for another user"
        );
        return Err(AppError::Forbidden);
    }

    tracing::info!(
        user_id = %new_order.user_id,
        course_id = %new_order.course_id,
        payment_id = %new_order.payment_id,
        amount = new_order.amount,
        status = %new_order.status,
        "creating order"
    );

    let (order, purchase) = save_order(state, new_order)
        .await
        .map_err(AppError::OrderNotSaved)?;

    tracing::info!(order_id = %order.id, purchase_id = %purchase.id, "order saved");

    Ok(ApiResponse::success(
        "Order saved successfully",
        OrderReceipt {
            order: order.into(),
            purchase: purchase.into(),
        },
    ))
}

async fn save_order(
    state: &AppState,
    new_order: NewOrder,
) -> Result<(OrderModel, PurchaseModel), DbErr> {
    let txn = state.orm.begin().await?;

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(new_order.user_id),
        course_id: Set(new_order.course_id),
        payment_id: Set(new_order.payment_id.clone()),
        amount: Set(new_order.amount),
        status: Set(new_order.status.clone()),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let purchase = PurchaseActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(new_order.user_id),
        course_id: Set(new_order.course_id),
        order_id: Set(order.id),
        payment_id: Set(new_order.payment_id),
        amount: Set(new_order.amount),
        status: Set(new_order.status),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok((order, purchase))
}

/// Every field must be present and non-empty; an amount of zero counts as
/// missing.
pub fn validate_order(payload: CreateOrderRequest) -> AppResult<NewOrder> {
    fn present(value: Option<String>) -> Option<String> {
        value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    let missing = || AppError::BadRequest(MISSING_FIELDS.into());

    let email = present(payload.email).ok_or_else(missing)?;
    let user_id = present(payload.user_id).ok_or_else(missing)?;
    let course_id = present(payload.course_id).ok_or_else(missing)?;
    let payment_id = present(payload.payment_id).ok_or_else(missing)?;
    let status = present(payload.status).ok_or_else(missing)?;
    let amount = payload
        .amount
        .filter(PriceInput::is_present)
        .ok_or_else(missing)?
        .as_f64()
        .ok_or_else(|| AppError::BadRequest("Invalid amount".into()))?;

    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| AppError::BadRequest("Invalid userId".into()))?;
    let course_id = Uuid::parse_str(&course_id)
        .map_err(|_| AppError::BadRequest("Invalid courseId".into()))?;

    Ok(NewOrder {
        email,
        user_id,
        course_id,
        payment_id,
        amount,
        status,
    })
}
