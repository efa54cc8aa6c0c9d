use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, SignupRequest},
        users::UserData,
    },
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::ROLE_ADMIN,
    models::User,
    response::ApiResponse,
    state::AppState,
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn signup(
    state: &AppState,
    payload: SignupRequest,
    role: &str,
) -> AppResult<ApiResponse<UserData>> {
    let payload = validate_signup(payload)?;

    let exist = Users::find()
        .filter(UserCol::Email.eq(payload.email.as_str()))
        .one(state.orm.as_ref())
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        email: Set(payload.email),
        password_hash: Set(password_hash),
        role: Set(role.to_string()),
        newsletter: Set(false),
        dark_mode: Set(false),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(state.orm.as_ref())
    .await?;

    tracing::info!(user_id = %user.id, role = %user.role, "account created");

    let message = if role == ROLE_ADMIN {
        "Admin signup succeeded"
    } else {
        "Signup succeeded"
    };
    Ok(ApiResponse::success(
        message,
        UserData { user: user.into() },
    ))
}

/// Checks credentials and issues a session token. With `required_role` set,
/// accounts holding another role are rejected exactly like a bad password.
pub async fn login(
    state: &AppState,
    payload: LoginRequest,
    required_role: Option<&str>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let email = normalize_email(&email);

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(state.orm.as_ref())
        .await?;
    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest(INVALID_CREDENTIALS.into())),
    };

    if !verify_password(&password, &user.password_hash)? {
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    if required_role.is_some_and(|role| role != user.role) {
        tracing::warn!(user_id = %user.id, "login with wrong role");
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = issue_token(&state.config, user.id, &user.role)?;

    tracing::info!(user_id = %user.id, "logged in");

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            user: User::from(user),
            token,
        },
    ))
}

pub fn issue_token(config: &AppConfig, user_id: Uuid, role: &str) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(config: &AppConfig, token: &str) -> jsonwebtoken::errors::Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

fn validate_signup(payload: SignupRequest) -> AppResult<SignupRequest> {
    let first_name = payload.first_name.trim().to_string();
    let last_name = payload.last_name.trim().to_string();
    let email = normalize_email(&payload.email);

    if first_name.chars().count() < 3 {
        return Err(AppError::BadRequest(
            "firstName must be at least 3 characters long".into(),
        ));
    }
    if last_name.chars().count() < 3 {
        return Err(AppError::BadRequest(
            "lastName must be at least 3 characters long".into(),
        ));
    }
    if !is_plausible_email(&email) {
        return Err(AppError::BadRequest("Invalid email address".into()));
    }
    if payload.password.chars().count() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters long".into(),
        ));
    }

    Ok(SignupRequest {
        first_name,
        last_name,
        email,
        password: payload.password,
    })
}
