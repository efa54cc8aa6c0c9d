use std::sync::Arc;

use crate::{config::AppConfig, db::OrmConn, payments::PaymentGateway};

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<OrmConn>,
    pub config: Arc<AppConfig>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(
        orm: impl Into<Arc<OrmConn>>,
        config: AppConfig,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            orm: orm.into(),
            config: Arc::new(config),
            payments,
        }
    }
}
