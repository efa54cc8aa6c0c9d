use axum::{extract::FromRequestParts, http::HeaderMap, http::header, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use crate::{error::AppError, services::auth_service::decode_token, state::AppState};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Session cookie set on login.
pub const SESSION_COOKIE: &str = "jwt";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: String,
}

pub fn ensure_role(user: &AuthUser, role: &str) -> Result<(), AppError> {
    if user.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, ROLE_ADMIN)
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers)?
            .ok_or_else(|| AppError::Unauthorized("No token provided".into()))?;

        let claims = decode_token(&state.config, &token)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Ok(AuthUser {
            user_id,
            role: claims.role,
        })
    }
}

/// Bearer header first, then the session cookie.
fn token_from_headers(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;
        let Some(token) = auth_str.strip_prefix("Bearer ") else {
            return Err(AppError::Unauthorized("Invalid Authorization scheme".into()));
        };
        let token = token.trim();
        if !token.is_empty() {
            return Ok(Some(token.to_string()));
        }
    }

    Ok(CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty()))
}

/// Session cookie carrying a fresh token.
pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_secs))
        .secure(secure)
        .build()
}

/// Empty session cookie that the browser drops immediately.
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::ZERO)
        .build()
}
