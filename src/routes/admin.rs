use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignupRequest},
        courses::CourseList,
        users::UserData,
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::{AuthUser, ROLE_ADMIN, session_cookie, expired_session_cookie},
    response::{ApiResponse, Empty, ErrorResponse},
    services::{auth_service, course_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/courses", get(my_courses))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Admin account created", body = ApiResponse<UserData>),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserData>>)> {
    let resp = auth_service::signup(&state, payload, ROLE_ADMIN).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Admin logged in", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials or not an admin", body = ErrorResponse)
    ),
    tag = "Admin"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let resp = auth_service::login(&state, payload, Some(ROLE_ADMIN)).await?;
    let cookie = session_cookie(
        &resp.data.token,
        state.config.jwt_ttl_hours * 3600,
        state.config.cookie_secure,
    );
    Ok((jar.add(cookie), Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = ApiResponse<Empty>)
    ),
    tag = "Admin"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<Empty>>) {
    (
        jar.add(expired_session_cookie()),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/courses",
    responses(
        (status = 200, description = "Courses created by the calling admin", body = ApiResponse<CourseList>),
        (status = 401, description = "Not logged in", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn my_courses(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CourseList>>> {
    let resp = course_service::list_courses_by_creator(&state, &user).await?;
    Ok(Json(resp))
}
