use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{self, Claims};

/// Name of the cookie carrying the admin session token.
pub const SESSION_COOKIE: &str = "club_session";

/// Authenticated admin, taken from `Authorization: Bearer <token>` or the
/// session cookie.
///
/// Add this as a handler parameter to require an admin session.
#[derive(Debug)]
pub struct AdminUser {
    pub admin_id: i32,
    pub email: String,
}

/// The raw session token of a request, header first.
///
/// `Err(TokenInvalid)` when an `Authorization` header is present but is not a
/// bearer token; `Ok(None)` when neither header nor cookie is present.
pub fn session_token(headers: &HeaderMap) -> Result<Option<String>, AppError> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AppError::TokenInvalid)?;
        return Ok(Some(token.to_string()));
    }
    let jar = CookieJar::from_headers(headers);
    Ok(jar
        .get(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty()))
}

/// Claims of a valid session, if any. Used where a missing session is not an error.
pub fn session_claims(headers: &HeaderMap, secret: &str) -> Option<Claims> {
    let token = session_token(headers).ok().flatten()?;
    jwt::verify(&token, secret).ok()
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers)?.ok_or(AppError::TokenMissing)?;

        let claims = jwt::verify(&token, &state.config.auth.jwt_secret)
            .map_err(|_| AppError::TokenInvalid)?;

        Ok(AdminUser {
            admin_id: claims.uid,
            email: claims.sub,
        })
    }
}
