use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Everything under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/events", public_event_routes())
        .nest("/register", registration_submit_routes())
        .nest("/site", site_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::logout))
        .routes(routes!(handlers::auth::me))
}

fn public_event_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::event::list_open_events))
}

/// Short alias of `POST /api/admin/registrations`, left out of the API docs.
fn registration_submit_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().route("/", post(handlers::registration::submit_registration))
}

fn site_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::site::get_content))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/events", admin_event_routes())
        .nest("/registrations", admin_registration_routes())
        .nest("/export", OpenApiRouter::new().routes(routes!(handlers::export::export_registrations)))
        .nest("/stats", OpenApiRouter::new().routes(routes!(handlers::stats::get_stats)))
}

fn admin_event_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::event::list_events,
            handlers::event::create_event,
            handlers::event::update_event,
            handlers::event::delete_event
        ))
        .routes(routes!(handlers::event::get_event))
        .routes(routes!(handlers::event::toggle_event))
}

fn admin_registration_routes() -> OpenApiRouter<AppState> {
    // Submission stays public here too; the form has always posted to this path.
    OpenApiRouter::new().routes(routes!(
        handlers::registration::list_registrations,
        handlers::registration::submit_registration
    ))
}

/// The built frontend, with admin pages behind the session guard.
pub fn frontend_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::site::serve_index))
        .route("/{*path}", get(handlers::site::serve_asset))
        .layer(middleware::from_fn_with_state(
            state,
            handlers::site::admin_page_guard,
        ))
}
