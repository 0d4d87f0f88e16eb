use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::EventForm;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration, registration_member};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::{AppJson, OptionalJson};
use crate::models::event::*;
use crate::state::AppState;
use crate::utils::event::{
    event_form, event_responses, find_event, find_event_for_update, to_json,
};

#[utoipa::path(
    get,
    path = "/",
    tag = "Events",
    operation_id = "listOpenEvents",
    summary = "List events open for registration",
    description = "Public listing used by the registration form. Only events with `isOpen = true` are returned, sorted by date ascending.",
    responses(
        (status = 200, description = "Open events", body = EventListResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn list_open_events(
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, AppError> {
    let models = event::Entity::find()
        .filter(event::Column::IsOpen.eq(true))
        .order_by_asc(event::Column::Date)
        .order_by_asc(event::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(EventListResponse {
        events: event_responses(models)?,
    }))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Admin Events",
    operation_id = "listEvents",
    summary = "List all events",
    description = "Returns every event, open or closed, sorted by date ascending.",
    responses(
        (status = 200, description = "All events", body = EventListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn list_events(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<EventListResponse>, AppError> {
    let models = event::Entity::find()
        .order_by_asc(event::Column::Date)
        .order_by_asc(event::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(EventListResponse {
        events: event_responses(models)?,
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Admin Events",
    operation_id = "getEvent",
    summary = "Get an event by ID",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn get_event(
    _admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EventResponse>, AppError> {
    let model = find_event(&state.db, id).await?;
    Ok(Json(model.try_into()?))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Admin Events",
    operation_id = "createEvent",
    summary = "Create a new event",
    description = "Creates an event. `name` and `date` are required; new events are open for registration. Recruitment events need at least one team.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.admin_id, name = ?payload.name))]
pub async fn create_event(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_event(&payload)?;

    let form = EventForm {
        event_type: payload.event_type.unwrap_or_default(),
        team_size: payload.team_size.unwrap_or(common::event::MIN_TEAM_SIZE),
        teams: payload.teams.unwrap_or_default(),
        common_questions: payload.common_questions.unwrap_or_default(),
        allow_multiple_team_selection: payload.allow_multiple_team_selection.unwrap_or(false),
    };
    form.validate()?;

    let (Some(name), Some(date)) = (payload.name, payload.date) else {
        return Err(AppError::Validation("Name and date are required".into()));
    };

    let now = chrono::Utc::now();
    let new_event = event::ActiveModel {
        name: Set(name.trim().to_string()),
        date: Set(date),
        is_open: Set(true),
        event_type: Set(form.event_type),
        team_size: Set(form.team_size),
        teams: Set(to_json(&form.teams)?),
        common_questions: Set(to_json(&form.common_questions)?),
        allow_multiple_team_selection: Set(form.allow_multiple_team_selection),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_event.insert(&state.db).await?;
    tracing::info!(event_id = model.id, "Event created");

    Ok((StatusCode::CREATED, Json(EventResponse::try_from(model)?)))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Admin Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Partially updates the event named by `id` in the body. Absent fields are left unchanged; the merged configuration is validated as a whole. A body carrying only `id` returns the event unchanged.",
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.admin_id, id = ?payload.id))]
pub async fn update_event(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let (id, has_changes) = validate_update_event(&payload)?;

    if !has_changes {
        let existing = find_event(&state.db, id).await?;
        return Ok(Json(existing.try_into()?));
    }

    let txn = state.db.begin().await?;
    let existing = find_event_for_update(&txn, id).await?;

    let mut form = event_form(&existing)?;
    if let Some(event_type) = payload.event_type {
        form.event_type = event_type;
    }
    if let Some(team_size) = payload.team_size {
        form.team_size = team_size;
    }
    if let Some(teams) = payload.teams {
        form.teams = teams;
    }
    if let Some(common_questions) = payload.common_questions {
        form.common_questions = common_questions;
    }
    if let Some(allow) = payload.allow_multiple_team_selection {
        form.allow_multiple_team_selection = allow;
    }
    form.validate()?;

    let mut active: event::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(date) = payload.date {
        active.date = Set(date);
    }
    if let Some(is_open) = payload.is_open {
        active.is_open = Set(is_open);
    }
    active.event_type = Set(form.event_type);
    active.team_size = Set(form.team_size);
    active.teams = Set(to_json(&form.teams)?);
    active.common_questions = Set(to_json(&form.common_questions)?);
    active.allow_multiple_team_selection = Set(form.allow_multiple_team_selection);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.try_into()?))
}

#[utoipa::path(
    delete,
    path = "/",
    tag = "Admin Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Permanently deletes the event named by `id` in the body, together with all of its registrations.",
    request_body = DeleteEventRequest,
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.admin_id, id = ?payload.id))]
pub async fn delete_event(
    admin: AdminUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<DeleteEventRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = payload
        .id
        .ok_or_else(|| AppError::Validation("Event ID is required".into()))?;

    let txn = state.db.begin().await?;
    let _event = find_event_for_update(&txn, id).await?;

    registration_member::Entity::delete_many()
        .filter(registration_member::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    let removed = registration::Entity::delete_many()
        .filter(registration::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    tracing::info!(
        event_id = id,
        registrations = removed.rows_affected,
        "Event deleted"
    );

    Ok(Json(MessageResponse {
        message: "Event deleted successfully".into(),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/toggle",
    tag = "Admin Events",
    operation_id = "toggleEvent",
    summary = "Open or close registration for an event",
    description = "Sets `isOpen` to the value given in the body, or flips it when the body is empty or omits `isOpen`.",
    params(("id" = i32, Path, description = "Event ID")),
    request_body(content = ToggleEventRequest, description = "Optional target state"),
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.admin_id, id))]
pub async fn toggle_event(
    admin: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    OptionalJson(payload): OptionalJson<ToggleEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_event_for_update(&txn, id).await?;

    let is_open = payload.is_open.unwrap_or(!existing.is_open);
    let mut active: event::ActiveModel = existing.into();
    active.is_open = Set(is_open);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;
    tracing::info!(event_id = id, is_open, "Event registration toggled");

    Ok(Json(model.try_into()?))
}
