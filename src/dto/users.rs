use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Course, Purchase, User};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserData {
    pub user: User,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default)]
    pub newsletter: bool,
    #[serde(default)]
    pub dark_mode: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    /// First name shown on the account page.
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferences: Option<Preferences>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseHistory {
    pub purchased: Vec<Purchase>,
    pub courses: Vec<Course>,
}
