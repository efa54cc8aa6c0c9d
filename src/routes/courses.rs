use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::courses::{CourseData, CourseList, CreateCourseRequest, UpdateCourseRequest},
    error::AppResult,
    extract::AppJson,
    middleware::auth::AuthUser,
    response::{ApiResponse, Empty, ErrorResponse},
    services::course_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/create", post(create_course))
        .route("/update/{id}", put(update_course))
        .route("/delete/{id}", delete(delete_course))
        .route("/{id}", get(get_course))
}

#[utoipa::path(
    get,
    path = "/api/v1/course/courses",
    responses(
        (status = 200, description = "Course catalog, newest first", body = ApiResponse<CourseList>)
    ),
    tag = "Courses"
)]
pub async fn list_courses(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CourseList>>> {
    let resp = course_service::list_courses(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/course/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course details", body = ApiResponse<CourseData>),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CourseData>>> {
    let resp = course_service::get_course(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/course/create",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = ApiResponse<CourseData>),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CourseData>>)> {
    let resp = course_service::create_course(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/course/update/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = ApiResponse<CourseData>),
        (status = 403, description = "Not the course creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCourseRequest>,
) -> AppResult<Json<ApiResponse<CourseData>>> {
    let resp = course_service::update_course(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/course/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = ApiResponse<Empty>),
        (status = 403, description = "Not the course creator", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let resp = course_service::delete_course(&state, &user, id).await?;
    Ok(Json(resp))
}
