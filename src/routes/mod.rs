use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod courses;
pub mod doc;
pub mod health;
pub mod orders;
pub mod payments;
pub mod users;

// Versioned API tree; mounted under `/api` by the application builder.
pub fn create_api_router() -> Router<AppState> {
    let v1 = Router::new()
        .nest("/course", courses::router())
        .nest("/user", users::router())
        .nest("/admin", admin::router())
        .nest("/payment", payments::router())
        .merge(orders::router());

    Router::new().nest("/v1", v1)
}
