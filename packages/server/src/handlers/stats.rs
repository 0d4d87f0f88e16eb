use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::models::shared::validate_window;
use crate::models::stats::{StatsQuery, StatsResponse};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Stats",
    operation_id = "getStats",
    summary = "Dashboard statistics",
    description = "Registration totals, per-event counts (largest first) and a per-day trend (UTC days, oldest first), optionally limited to a creation window.",
    params(StatsQuery),
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn get_stats(
    _admin: AdminUser,
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    validate_window(query.from, query.to)?;

    let mut select = registration::Entity::find()
        .select_only()
        .column(registration::Column::EventId)
        .column(registration::Column::CreatedAt);
    if let Some(from) = query.from {
        select = select.filter(registration::Column::CreatedAt.gte(from));
    }
    if let Some(to) = query.to {
        select = select.filter(registration::Column::CreatedAt.lte(to));
    }
    let rows: Vec<(i32, DateTime<Utc>)> = select.into_tuple().all(&state.db).await?;

    let names: HashMap<i32, String> = event::Entity::find()
        .select_only()
        .column(event::Column::Id)
        .column(event::Column::Name)
        .into_tuple::<(i32, String)>()
        .all(&state.db)
        .await?
        .into_iter()
        .collect();

    let named: Vec<(String, DateTime<Utc>)> = rows
        .into_iter()
        .map(|(event_id, created_at)| {
            let name = names.get(&event_id).cloned().unwrap_or_default();
            (name, created_at)
        })
        .collect();

    Ok(Json(StatsResponse::from_rows(&named)))
}
