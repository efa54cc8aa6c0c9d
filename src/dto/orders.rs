use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::payments::PriceInput,
    models::{Order, Purchase},
};

/// Body posted by the client after the processor confirmed a payment.
/// Every field is optional here so that a missing one is reported as a
/// validation failure rather than a deserialization rejection.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub email: Option<String>,
    pub user_id: Option<String>,
    pub course_id: Option<String>,
    pub payment_id: Option<String>,
    pub amount: Option<PriceInput>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderReceipt {
    pub order: Order,
    pub purchase: Purchase,
}
