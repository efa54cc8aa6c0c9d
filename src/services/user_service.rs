use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::BTreeSet;

use crate::{
    dto::users::{PurchaseHistory, UpdateProfileRequest, UserData},
    entity::{
        courses::{Column as CourseCol, Entity as Courses},
        purchases::{Column as PurchaseCol, Entity as Purchases},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Course, Purchase},
    response::ApiResponse,
    services::auth_service::{is_plausible_email, normalize_email},
    state::AppState,
};

pub async fn profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UserData>> {
    let account = Users::find_by_id(user.user_id).one(state.orm.as_ref()).await?;
    let account = match account {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };
    Ok(ApiResponse::success(
        "Profile",
        UserData {
            user: account.into(),
        },
    ))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<UserData>> {
    let existing = Users::find_by_id(user.user_id).one(state.orm.as_ref()).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::NotFound("User")),
    };

    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());
    let email = payload
        .email
        .map(|e| normalize_email(&e))
        .filter(|e| !e.is_empty() && *e != existing.email);

    if let Some(email) = email.as_ref() {
        if !is_plausible_email(email) {
            return Err(AppError::BadRequest("Invalid email address".into()));
        }
        let taken = Users::find()
            .filter(UserCol::Email.eq(email.as_str()))
            .one(state.orm.as_ref())
            .await?;
        if taken.is_some() {
            return Err(AppError::BadRequest("Email is already taken".into()));
        }
    }

    let mut active: UserActive = existing.into();
    if let Some(name) = name {
        active.first_name = Set(name);
    }
    if let Some(email) = email {
        active.email = Set(email);
    }
    if let Some(preferences) = payload.preferences {
        active.newsletter = Set(preferences.newsletter);
        active.dark_mode = Set(preferences.dark_mode);
    }
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(state.orm.as_ref()).await?;

    tracing::info!(user_id = %updated.id, "profile updated");

    Ok(ApiResponse::success(
        "Profile updated",
        UserData {
            user: updated.into(),
        },
    ))
}

/// The caller's purchase records plus the catalog entries they point at.
pub async fn purchases(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<PurchaseHistory>> {
    let purchased: Vec<Purchase> = Purchases::find()
        .filter(PurchaseCol::UserId.eq(user.user_id))
        .order_by_desc(PurchaseCol::CreatedAt)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Purchase::from)
        .collect();

    let course_ids: BTreeSet<_> = purchased.iter().map(|p| p.course_id).collect();
    let courses: Vec<Course> = if course_ids.is_empty() {
        Vec::new()
    } else {
        Courses::find()
            .filter(CourseCol::Id.is_in(course_ids))
            .all(state.orm.as_ref())
            .await?
            .into_iter()
            .map(Course::from)
            .collect()
    };

    Ok(ApiResponse::success(
        "Purchases",
        PurchaseHistory { purchased, courses },
    ))
}
