use std::collections::HashMap;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use common::EventForm;
use sea_orm::*;
use tracing::instrument;

use super::registration::with_event_refs;
use crate::entity::{event, registration};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminUser;
use crate::extractors::json::OptionalJson;
use crate::models::export::{ExportRequest, validate_export_request};
use crate::state::AppState;
use crate::utils::event::event_form;
use crate::utils::export::{FILE_NAME, SHEET_NAME, registrations_sheet};
use crate::utils::xlsx;

#[utoipa::path(
    post,
    path = "/",
    tag = "Export",
    operation_id = "exportRegistrations",
    summary = "Export registrations as an Excel workbook",
    description = "Builds a single-sheet `.xlsx` file with one row per registration and one column group per member. The body narrows the selection by event, creation window or explicit ids; an empty body exports everything.",
    request_body(content = ExportRequest, description = "Optional selection"),
    responses(
        (status = 200, description = "Spreadsheet", content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 500, description = "Spreadsheet generation failed (EXPORT_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = []), ("session" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.admin_id, event_id = ?payload.event_id))]
pub async fn export_registrations(
    admin: AdminUser,
    State(state): State<AppState>,
    OptionalJson(payload): OptionalJson<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_export_request(&payload)?;

    let mut select = registration::Entity::find();
    if let Some(event_id) = payload.event_id {
        select = select.filter(registration::Column::EventId.eq(event_id));
    }
    if let Some(from) = payload.from {
        select = select.filter(registration::Column::CreatedAt.gte(from));
    }
    if let Some(to) = payload.to {
        select = select.filter(registration::Column::CreatedAt.lte(to));
    }
    if let Some(ids) = payload.ids {
        select = select.filter(registration::Column::Id.is_in(ids));
    }

    let models = select
        .order_by_desc(registration::Column::CreatedAt)
        .order_by_desc(registration::Column::Id)
        .all(&state.db)
        .await?;
    let registrations = with_event_refs(&state.db, models).await?;

    let mut event_ids: Vec<i32> = registrations.iter().map(|r| r.event.id).collect();
    event_ids.sort_unstable();
    event_ids.dedup();
    let forms: HashMap<i32, EventForm> = event::Entity::find()
        .filter(event::Column::Id.is_in(event_ids))
        .all(&state.db)
        .await?
        .iter()
        .map(|e| event_form(e).map(|form| (e.id, form)))
        .collect::<Result<_, _>>()?;

    let sheet = registrations_sheet(&registrations, |id| forms.get(&id));
    let bytes = sheet
        .to_xlsx(SHEET_NAME)
        .map_err(|e| AppError::Export(e.to_string()))?;

    tracing::info!(rows = sheet.len(), "Registrations exported");

    Ok((
        [
            (header::CONTENT_TYPE, xlsx::CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={FILE_NAME}"),
            ),
        ],
        bytes,
    ))
}
