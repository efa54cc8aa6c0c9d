use async_trait::async_trait;
use serde::Deserialize;

use super::{PaymentError, PaymentGateway, PaymentIntent, PaymentIntentRequest};
use crate::config::AppConfig;

/// Stripe REST client for payment intents.
pub struct StripeGateway {
    client: reqwest::Client,
    api_base: String,
    secret_key: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
    amount: i64,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.stripe_api_base.trim_end_matches('/').to_string(),
            secret_key: config.stripe_secret_key.clone(),
        }
    }
}

fn intent_form(request: &PaymentIntentRequest) -> Vec<(&'static str, String)> {
    vec![
        ("amount", request.amount.to_string()),
        ("currency", request.currency.clone()),
        ("description", request.description.clone()),
        ("automatic_payment_methods[enabled]", "true".to_string()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let endpoint = format!("{}/v1/payment_intents", self.api_base);
        let response = self
            .client
            .post(endpoint)
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&intent_form(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let intent: IntentResponse = response.json().await?;
        let client_secret = intent
            .client_secret
            .ok_or(PaymentError::MalformedResponse("client_secret"))?;

        tracing::debug!(intent_id = %intent.id, status = %intent.status, "payment intent created");

        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
            amount: intent.amount,
            status: intent.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_enables_automatic_payment_methods() {
        let form = intent_form(&PaymentIntentRequest {
            amount: 4999,
            currency: "inr".into(),
            description: "Purchase of course: Rust 101".into(),
        });
        assert!(form.contains(&("amount", "4999".to_string())));
        assert!(form.contains(&("currency", "inr".to_string())));
        assert!(form.contains(&("automatic_payment_methods[enabled]", "true".to_string())));
    }

    #[test]
    fn error_envelope_message_is_extracted() {
        let body = r#"{"error":{"message":"Amount must be at least ₹0.50 inr","type":"invalid_request_error"}}"#;
        let parsed: ErrorEnvelope = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.error.message.as_deref(),
            Some("Amount must be at least ₹0.50 inr")
        );
    }
}
