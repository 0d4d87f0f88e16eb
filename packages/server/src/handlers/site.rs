use axum::Json;
use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::auth::session_claims;
use crate::models::site::SiteContent;
use crate::state::AppState;
use crate::utils::assets::{AssetError, resolve_asset};

const LOGIN_PAGE: &str = "/admin/login";
const DASHBOARD_PAGE: &str = "/admin/dashboard";

#[utoipa::path(
    get,
    path = "/content",
    tag = "Site",
    operation_id = "getSiteContent",
    summary = "Public site content",
    description = "Timeline, faculty and core team entries shown on the public pages.",
    responses(
        (status = 200, description = "Site content", body = SiteContent),
    ),
)]
pub async fn get_content(State(state): State<AppState>) -> Json<SiteContent> {
    Json(state.site.as_ref().clone())
}

pub async fn serve_index(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_file(&state, "").await
}

#[instrument(skip(state))]
pub async fn serve_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, AppError> {
    serve_file(&state, &path).await
}

async fn serve_file(state: &AppState, path: &str) -> Result<Response, AppError> {
    let safe_path = resolve_asset(&state.config.site.static_dir, path).map_err(|e| match e {
        AssetError::PathTraversal => AppError::Forbidden,
        AssetError::NotFound => AppError::NotFound("Not found".into()),
        AssetError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AppError::NotFound("Not found".into())
        }
        AssetError::Io(io) => AppError::Internal(format!("IO error: {}", io)),
    })?;

    let content = tokio::fs::read(&safe_path)
        .await
        .map_err(|e| AppError::Internal(format!("IO error: {}", e)))?;

    let mime = mime_guess::from_path(&safe_path).first_or_octet_stream();
    let cache = if mime.essence_str() == "text/html" {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CACHE_CONTROL, cache)
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// Where an admin page request should be sent instead, if anywhere.
pub fn admin_redirect(path: &str, has_session: bool) -> Option<&'static str> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    if path != "/admin" && !path.starts_with("/admin/") {
        return None;
    }
    match (has_session, path) {
        (true, "/admin") | (true, LOGIN_PAGE) => Some(DASHBOARD_PAGE),
        (false, LOGIN_PAGE) => None,
        (false, _) => Some(LOGIN_PAGE),
        (true, _) => None,
    }
}

/// Keeps the admin pages of the frontend behind a session.
pub async fn admin_page_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let has_session = session_claims(req.headers(), &state.config.auth.jwt_secret).is_some();
    match admin_redirect(req.uri().path(), has_session) {
        Some(target) => Redirect::to(target).into_response(),
        None => next.run(req).await,
    }
}
