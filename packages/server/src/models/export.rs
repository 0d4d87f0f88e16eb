use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::shared::validate_window;
use crate::error::AppError;

/// Selects the registrations to export. An empty body exports everything.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub event_id: Option<i32>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Explicit registration ids, e.g. the rows currently shown on the dashboard.
    pub ids: Option<Vec<i32>>,
}

/// Upper bound on explicitly listed ids.
pub const MAX_EXPORT_IDS: usize = 10_000;

pub fn validate_export_request(req: &ExportRequest) -> Result<(), AppError> {
    validate_window(req.from, req.to)?;
    if let Some(ref ids) = req.ids
        && ids.len() > MAX_EXPORT_IDS
    {
        return Err(AppError::Validation(format!(
            "Too many ids: max {MAX_EXPORT_IDS}"
        )));
    }
    Ok(())
}
