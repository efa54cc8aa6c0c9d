use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::{courses, orders, purchases, users};

/// Account as exposed to clients; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub newsletter: bool,
    pub dark_mode: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub payment_id: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub order_id: Uuid,
    pub payment_id: String,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            role: model.role,
            newsletter: model.newsletter,
            dark_mode: model.dark_mode,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<courses::Model> for Course {
    fn from(model: courses::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            price: model.price,
            image_url: model.image_url,
            creator_id: model.creator_id,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            payment_id: model.payment_id,
            amount: model.amount,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<purchases::Model> for Purchase {
    fn from(model: purchases::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            order_id: model.order_id,
            payment_id: model.payment_id,
            amount: model.amount,
            status: model.status,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
