pub mod auth_service;
pub mod course_service;
pub mod order_service;
pub mod payment_service;
pub mod user_service;
