use serde::Serialize;
use utoipa::ToSchema;

/// Success envelope. The payload's fields sit next to `success` and
/// `message` rather than under a nested key, which is what the web client reads.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Payload for responses that only carry a message.
#[derive(Debug, Serialize, ToSchema)]
pub struct Empty {}

impl ApiResponse<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, Empty {})
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
