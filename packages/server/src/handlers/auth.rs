use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use sea_orm::*;
use tracing::instrument;

use crate::config::AuthConfig;
use crate::entity::admin_user;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AdminUser, SESSION_COOKIE};
use crate::extractors::json::AppJson;
use crate::models::auth::{LoginRequest, LoginResponse, MeResponse, validate_login_request};
use crate::models::event::MessageResponse;
use crate::state::AppState;
use crate::utils::{hash, jwt};

fn session_cookie(token: String, auth: &AuthConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(auth.secure_cookie)
        .path("/")
        .max_age(time::Duration::days(auth.session_days))
        .build()
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as an admin",
    description = "Verifies the credentials, sets the `club_session` cookie and returns the same token for bearer use.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let admin = admin_user::Entity::find()
        .filter(admin_user::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &admin.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let auth = &state.config.auth;
    let token = jwt::sign(admin.id, &admin.email, auth.session_days, &auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok((
        jar.add(session_cookie(token.clone(), auth)),
        Json(LoginResponse {
            token,
            email: admin.email,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    operation_id = "logout",
    summary = "Log out",
    description = "Clears the session cookie. Bearer tokens stay valid until they expire.",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
    ),
)]
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (
        jar.remove(removal),
        Json(MessageResponse {
            message: "Logged out".into(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "getCurrentAdmin",
    summary = "Get the current admin",
    responses(
        (status = 200, description = "Current admin", body = MeResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(admin), fields(admin_id = admin.admin_id))]
pub async fn me(admin: AdminUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: admin.admin_id,
        email: admin.email,
    })
}
