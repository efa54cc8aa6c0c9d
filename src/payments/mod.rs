//! Payment processor boundary.
//!
//! The server only creates payment intents; card collection and confirmation
//! happen in the browser against the processor's hosted widgets.

use async_trait::async_trait;
use thiserror::Error;

pub mod stripe;

pub use stripe::StripeGateway;

/// Lowest charge the processor accepts, in major currency units.
pub const MIN_CHARGE: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntentRequest {
    /// Minor currency units.
    pub amount: i64,
    pub currency: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount: i64,
    pub status: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment processor unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("payment processor returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("payment processor response missing {0}")]
    MalformedResponse(&'static str),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError>;
}

/// Raise `price` to the processor minimum.
pub fn apply_price_floor(price: f64) -> f64 {
    if price < MIN_CHARGE { MIN_CHARGE } else { price }
}

/// Convert a major-unit amount to minor units, rounding to the nearest unit.
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}
