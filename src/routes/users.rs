use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignupRequest},
        users::{PurchaseHistory, UpdateProfileRequest, UserData},
    },
    error::AppResult,
    extract::AppJson,
    middleware::auth::{AuthUser, ROLE_USER, session_cookie, expired_session_cookie},
    response::{ApiResponse, Empty, ErrorResponse},
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", get(logout))
        .route("/profile", get(profile))
        .route("/update", put(update_profile))
        .route("/purchases", get(purchases))
}

#[utoipa::path(
    post,
    path = "/api/v1/user/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<UserData>),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<UserData>>)> {
    let resp = auth_service::signup(&state, payload, ROLE_USER).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/v1/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; also sets the session cookie", body = ApiResponse<LoginResponse>),
        (status = 400, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<ApiResponse<LoginResponse>>)> {
    let resp = auth_service::login(&state, payload, None).await?;
    let cookie = session_cookie(
        &resp.data.token,
        state.config.jwt_ttl_hours * 3600,
        state.config.cookie_secure,
    );
    Ok((jar.add(cookie), Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/logout",
    responses(
        (status = 200, description = "Session cookie cleared", body = ApiResponse<Empty>)
    ),
    tag = "Users"
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<Empty>>) {
    (
        jar.add(expired_session_cookie()),
        Json(ApiResponse::message("Logged out successfully")),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/user/profile",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<UserData>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserData>>> {
    let resp = user_service::profile(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/v1/user/update",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Account updated", body = ApiResponse<UserData>),
        (status = 400, description = "Invalid or taken email", body = ErrorResponse),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserData>>> {
    let resp = user_service::update_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/user/purchases",
    responses(
        (status = 200, description = "Purchased courses", body = ApiResponse<PurchaseHistory>),
        (status = 401, description = "Not logged in", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn purchases(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PurchaseHistory>>> {
    let resp = user_service::purchases(&state, &user).await?;
    Ok(Json(resp))
}
