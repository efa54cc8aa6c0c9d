use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::courses::{CourseData, CourseList, CreateCourseRequest, UpdateCourseRequest},
    entity::courses::{ActiveModel, Column, Entity as Courses, Model as CourseModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Course,
    response::{ApiResponse, Empty},
    state::AppState,
};

pub async fn list_courses(state: &AppState) -> AppResult<ApiResponse<CourseList>> {
    let courses = Courses::find()
        .order_by_desc(Column::CreatedAt)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Course::from)
        .collect();
    Ok(ApiResponse::success("Courses", CourseList { courses }))
}

pub async fn list_courses_by_creator(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CourseList>> {
    ensure_admin(user)?;
    let courses = Courses::find()
        .filter(Column::CreatorId.eq(user.user_id))
        .order_by_desc(Column::CreatedAt)
        .all(state.orm.as_ref())
        .await?
        .into_iter()
        .map(Course::from)
        .collect();
    Ok(ApiResponse::success("Courses", CourseList { courses }))
}

pub async fn get_course(state: &AppState, id: Uuid) -> AppResult<ApiResponse<CourseData>> {
    let course = Courses::find_by_id(id)
        .one(state.orm.as_ref())
        .await?
        .map(Course::from);
    let course = match course {
        Some(c) => c,
        None => return Err(AppError::NotFound("Course")),
    };
    Ok(ApiResponse::success("Course", CourseData { course }))
}

pub async fn create_course(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCourseRequest,
) -> AppResult<ApiResponse<CourseData>> {
    ensure_admin(user)?;

    let title = required_text(&payload.title, "title")?;
    let description = required_text(&payload.description, "description")?;
    validate_price(payload.price)?;

    let course = ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(title),
        description: Set(description),
        price: Set(payload.price),
        image_url: Set(payload.image_url.filter(|u| !u.trim().is_empty())),
        creator_id: Set(user.user_id),
        created_at: NotSet,
    }
    .insert(state.orm.as_ref())
    .await?;

    tracing::info!(course_id = %course.id, admin_id = %user.user_id, "course created");

    Ok(ApiResponse::success(
        "Course created successfully",
        CourseData {
            course: course.into(),
        },
    ))
}

pub async fn update_course(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateCourseRequest,
) -> AppResult<ApiResponse<CourseData>> {
    ensure_admin(user)?;
    let existing = owned_course(state, user, id).await?;

    let mut active: ActiveModel = existing.into();
    if let Some(title) = payload.title {
        active.title = Set(required_text(&title, "title")?);
    }
    if let Some(description) = payload.description {
        active.description = Set(required_text(&description, "description")?);
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
        active.price = Set(price);
    }
    if let Some(image_url) = payload.image_url {
        let image_url = image_url.trim().to_string();
        active.image_url = Set((!image_url.is_empty()).then_some(image_url));
    }

    let course = active.update(state.orm.as_ref()).await?;

    tracing::info!(course_id = %course.id, admin_id = %user.user_id, "course updated");

    Ok(ApiResponse::success(
        "Course updated successfully",
        CourseData {
            course: course.into(),
        },
    ))
}

pub async fn delete_course(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Empty>> {
    ensure_admin(user)?;
    owned_course(state, user, id).await?;

    let result = Courses::delete_by_id(id).exec(state.orm.as_ref()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Course"));
    }

    tracing::info!(course_id = %id, admin_id = %user.user_id, "course deleted");

    Ok(ApiResponse::message("Course deleted successfully"))
}

/// Loads a course the calling admin created.
async fn owned_course(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<CourseModel> {
    let course = Courses::find_by_id(id).one(state.orm.as_ref()).await?;
    let course = match course {
        Some(c) => c,
        None => return Err(AppError::NotFound("Course")),
    };
    if course.creator_id != user.user_id {
        return Err(AppError::Forbidden);
    }
    Ok(course)
}

fn required_text(value: &str, field: &str) -> AppResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(value.to_string())
}

fn validate_price(price: f64) -> AppResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::BadRequest("price must be greater than 0".into()));
    }
    Ok(())
}
