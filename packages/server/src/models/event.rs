use chrono::{DateTime, Utc};
use common::{EventType, Question, Team, event::validate_team_size};
use serde::{Deserialize, Serialize};

use super::shared::validate_name;
use crate::error::AppError;

/// Request body for creating an event.
///
/// Fields are optional at the wire level so that a missing name or date is
/// reported with a readable message instead of a deserialization error.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[schema(example = "Code Clash 5.0")]
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub event_type: Option<EventType>,
    /// Members per team, 1-10. Defaults to 1 (individual registration).
    #[schema(example = 2)]
    pub team_size: Option<i32>,
    pub teams: Option<Vec<Team>>,
    pub common_questions: Option<Vec<Question>>,
    pub allow_multiple_team_selection: Option<bool>,
}

pub fn validate_create_event(req: &CreateEventRequest) -> Result<(), AppError> {
    let name = req.name.as_deref().unwrap_or_default();
    if name.trim().is_empty() || req.date.is_none() {
        return Err(AppError::Validation("Name and date are required".into()));
    }
    validate_name(name)?;
    if let Some(size) = req.team_size {
        validate_team_size(size)?;
    }
    Ok(())
}

/// Request body for updating an event. Absent fields are left unchanged.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[schema(example = 1)]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub is_open: Option<bool>,
    pub event_type: Option<EventType>,
    pub team_size: Option<i32>,
    pub teams: Option<Vec<Team>>,
    pub common_questions: Option<Vec<Question>>,
    pub allow_multiple_team_selection: Option<bool>,
}

impl UpdateEventRequest {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.date.is_some()
            || self.is_open.is_some()
            || self.event_type.is_some()
            || self.team_size.is_some()
            || self.teams.is_some()
            || self.common_questions.is_some()
            || self.allow_multiple_team_selection.is_some()
    }
}

/// Returns the target id and whether anything is to be changed.
pub fn validate_update_event(req: &UpdateEventRequest) -> Result<(i32, bool), AppError> {
    let id = req
        .id
        .ok_or_else(|| AppError::Validation("Event ID is required".into()))?;
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    if let Some(size) = req.team_size {
        validate_team_size(size)?;
    }
    Ok((id, req.has_changes()))
}

/// Request body for deleting an event.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct DeleteEventRequest {
    #[schema(example = 1)]
    pub id: Option<i32>,
}

/// Optional body of the toggle endpoint. Without `isOpen` the flag is flipped.
#[derive(Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleEventRequest {
    pub is_open: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Code Clash 5.0")]
    pub name: String,
    pub date: DateTime<Utc>,
    pub is_open: bool,
    pub event_type: EventType,
    #[schema(example = 1)]
    pub team_size: i32,
    pub teams: Vec<Team>,
    pub common_questions: Vec<Question>,
    pub allow_multiple_team_selection: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Event deleted successfully")]
    pub message: String,
}
