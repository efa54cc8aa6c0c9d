#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Transaction, entity::prelude::DateTimeWithTimeZone};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use course_store_api::{
    app::build_app,
    config::AppConfig,
    entity::{courses, orders, purchases},
    payments::{PaymentError, PaymentGateway, PaymentIntent, PaymentIntentRequest},
    services::auth_service::issue_token,
    state::AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory stand-in for the payment processor.
#[derive(Default)]
pub struct RecordingGateway {
    pub requests: Mutex<Vec<PaymentIntentRequest>>,
    pub fail: bool,
}

impl RecordingGateway {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> Vec<PaymentIntentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingGateway {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        if self.fail {
            return Err(PaymentError::Rejected {
                status: 402,
                message: "Your card was declined.".into(),
            });
        }
        let amount = request.amount;
        self.requests.lock().unwrap().push(request);
        Ok(PaymentIntent {
            id: "pi_test_123".into(),
            client_secret: "pi_test_123_secret_abc".into(),
            amount,
            status: "requires_payment_method".into(),
        })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://unused".into(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: TEST_SECRET.into(),
        jwt_ttl_hours: 1,
        stripe_secret_key: "sk_test_unused".into(),
        stripe_api_base: "http://127.0.0.1:9".into(),
        currency: "inr".into(),
        cors_origins: vec!["http://localhost:5173".into()],
        cookie_secure: false,
    }
}

pub fn test_state(
    orm: impl Into<Arc<DatabaseConnection>>,
    gateway: Arc<RecordingGateway>,
) -> AppState {
    AppState::new(orm, test_config(), gateway)
}

pub fn test_app(orm: impl Into<Arc<DatabaseConnection>>, gateway: Arc<RecordingGateway>) -> Router {
    build_app(test_state(orm, gateway))
}

/// Statements a mock connection saw. The app holding the other handle must
/// already be dropped.
pub fn transaction_log(orm: Arc<DatabaseConnection>) -> Vec<Transaction> {
    let Ok(orm) = Arc::try_unwrap(orm) else {
        panic!("mock connection still shared");
    };
    orm.into_transaction_log()
}

pub fn token_for(user_id: Uuid, role: &str) -> String {
    issue_token(&test_config(), user_id, role).expect("token")
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

pub fn course_model(title: &str, price: f64, creator_id: Uuid) -> courses::Model {
    courses::Model {
        id: Uuid::new_v4(),
        title: title.into(),
        description: format!("{title} description"),
        price,
        image_url: None,
        creator_id,
        created_at: now(),
    }
}

pub fn order_model(user_id: Uuid, course_id: Uuid, payment_id: &str, amount: f64) -> orders::Model {
    orders::Model {
        id: Uuid::new_v4(),
        user_id,
        course_id,
        payment_id: payment_id.into(),
        amount,
        status: "succeeded".into(),
        created_at: now(),
    }
}

pub fn purchase_model(order: &orders::Model) -> purchases::Model {
    purchases::Model {
        id: Uuid::new_v4(),
        user_id: order.user_id,
        course_id: order.course_id,
        order_id: order.id,
        payment_id: order.payment_id.clone(),
        amount: order.amount,
        status: order.status.clone(),
        created_at: now(),
    }
}
