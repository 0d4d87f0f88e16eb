use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{EventType, RegistrationSubmission, validate_submission};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration, registration_member};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::AppJson;
use crate::models::registration::*;
use crate::models::shared::Pagination;
use crate::state::AppState;
use crate::utils::event::{event_form, find_event_for_update, from_json, to_json};
use crate::utils::registration::{DUPLICATE_MESSAGE, check_team_capacity, registration_response};

#[utoipa::path(
    post,
    path = "/",
    tag = "Registrations",
    operation_id = "submitRegistration",
    summary = "Submit a registration",
    description = "Public endpoint used by the registration form. The payload is checked against the event's configuration: team events need exactly `teamSize` valid members, recruitment events one participant with a valid team choice and answers. A person (registration number or email) can register only once per event.",
    request_body = RegistrationSubmission,
    responses(
        (status = 201, description = "Registration stored", body = CreateRegistrationResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 403, description = "Event closed (REGISTRATION_CLOSED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Duplicate registration or team full (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(event_id = payload.event_id, event_type = %payload.event_type))]
pub async fn submit_registration(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegistrationSubmission>,
) -> Result<impl IntoResponse, AppError> {
    // The event row lock serializes submissions per event, so the capacity
    // and duplicate checks below see every committed registration.
    let txn = state.db.begin().await?;
    let event = find_event_for_update(&txn, payload.event_id).await?;

    if !event.is_open {
        return Err(AppError::RegistrationClosed);
    }

    let form = event_form(&event)?;
    let application = validate_submission(&form, &payload)?;

    if application.event_type == EventType::Recruitment {
        let existing: Vec<serde_json::Value> = registration::Entity::find()
            .select_only()
            .column(registration::Column::SelectedTeams)
            .filter(registration::Column::EventId.eq(event.id))
            .into_tuple()
            .all(&txn)
            .await?;
        let existing = existing
            .iter()
            .map(|v| from_json::<Vec<String>>(v, "selected_teams"))
            .collect::<Result<Vec<_>, _>>()?;
        check_team_capacity(&form, &application.selected_teams, &existing)?;
    }

    let reg_numbers: Vec<&str> = application
        .members
        .iter()
        .map(|m| m.registration_number.as_str())
        .collect();
    let emails: Vec<&str> = application
        .members
        .iter()
        .map(|m| m.official_email.as_str())
        .collect();

    let already_registered = registration_member::Entity::find()
        .filter(registration_member::Column::EventId.eq(event.id))
        .filter(
            Condition::any()
                .add(registration_member::Column::RegistrationNumber.is_in(reg_numbers))
                .add(registration_member::Column::OfficialEmail.is_in(emails)),
        )
        .count(&txn)
        .await?;
    if already_registered > 0 {
        return Err(AppError::Conflict(DUPLICATE_MESSAGE.into()));
    }

    let new_registration = registration::ActiveModel {
        event_id: Set(event.id),
        event_type: Set(application.event_type),
        members: Set(to_json(&application.members)?),
        selected_teams: Set(to_json(&application.selected_teams)?),
        common_answers: Set(to_json(&application.common_answers)?),
        team_answers: Set(to_json(&application.team_answers)?),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_registration.insert(&txn).await?;

    let member_rows = application
        .members
        .iter()
        .map(|m| registration_member::ActiveModel {
            registration_id: Set(model.id),
            event_id: Set(event.id),
            registration_number: Set(m.registration_number.clone()),
            official_email: Set(m.official_email.clone()),
            ..Default::default()
        });
    registration_member::Entity::insert_many(member_rows)
        .exec_without_returning(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Duplicate registration caught by unique index");
                AppError::Conflict(DUPLICATE_MESSAGE.into())
            }
            _ => AppError::from(e),
        })?;

    txn.commit().await?;
    tracing::info!(registration_id = model.id, "Registration stored");

    let registration = registration_response(
        model,
        EventRef {
            id: event.id,
            name: event.name,
        },
    )?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRegistrationResponse {
            message: "Registration successful".into(),
            registration,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List registrations",
    description = "Returns registrations newest first, each with its event's id and name. Supports filtering by event and by a creation-time window.",
    params(RegistrationListQuery),
    responses(
        (status = 200, description = "Registrations", body = RegistrationListResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_registrations(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<RegistrationListQuery>,
) -> Result<Json<RegistrationListResponse>, AppError> {
    validate_list_query(&query)?;

    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let mut select = registration::Entity::find();
    if let Some(event_id) = query.event_id {
        select = select.filter(registration::Column::EventId.eq(event_id));
    }
    if let Some(from) = query.from {
        select = select.filter(registration::Column::CreatedAt.gte(from));
    }
    if let Some(to) = query.to {
        select = select.filter(registration::Column::CreatedAt.lte(to));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    // Pages past the end are empty without asking the database.
    let registrations = if page > total_pages {
        Vec::new()
    } else {
        let models = select
            .order_by_desc(registration::Column::CreatedAt)
            .order_by_desc(registration::Column::Id)
            .offset(Some((page - 1).saturating_mul(per_page)))
            .limit(Some(per_page))
            .all(&state.db)
            .await?;
        with_event_refs(&state.db, models).await?
    };

    Ok(Json(RegistrationListResponse {
        registrations,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

/// Attach `{id, name}` of each registration's event.
pub async fn with_event_refs<C: ConnectionTrait>(
    db: &C,
    models: Vec<registration::Model>,
) -> Result<Vec<RegistrationResponse>, AppError> {
    let mut event_ids: Vec<i32> = models.iter().map(|m| m.event_id).collect();
    event_ids.sort_unstable();
    event_ids.dedup();

    let names: HashMap<i32, String> = event::Entity::find()
        .select_only()
        .column(event::Column::Id)
        .column(event::Column::Name)
        .filter(event::Column::Id.is_in(event_ids))
        .into_tuple::<(i32, String)>()
        .all(db)
        .await?
        .into_iter()
        .collect();

    models
        .into_iter()
        .map(|m| {
            let name = names.get(&m.event_id).cloned().unwrap_or_default();
            let event_ref = EventRef {
                id: m.event_id,
                name,
            };
            registration_response(m, event_ref)
        })
        .collect()
}
