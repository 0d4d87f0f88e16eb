use common::{EventForm, Question, Team};
use sea_orm::{ConnectionTrait, EntityTrait, QuerySelect};
use serde::de::DeserializeOwned;

use crate::entity::event;
use crate::error::AppError;
use crate::models::event::EventResponse;

/// Look up an event by ID, returning 404 if not found.
pub async fn find_event<C: ConnectionTrait>(db: &C, id: i32) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}

/// Decode a JSON column. Stored data that no longer parses is a server fault.
pub fn from_json<T: DeserializeOwned>(
    value: &serde_json::Value,
    column: &str,
) -> Result<T, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| AppError::Internal(format!("Corrupt {column} column: {e}")))
}

pub fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// The registration form configuration of a stored event.
pub fn event_form(model: &event::Model) -> Result<EventForm, AppError> {
    Ok(EventForm {
        event_type: model.event_type,
        team_size: model.team_size,
        teams: from_json::<Vec<Team>>(&model.teams, "teams")?,
        common_questions: from_json::<Vec<Question>>(&model.common_questions, "common_questions")?,
        allow_multiple_team_selection: model.allow_multiple_team_selection,
    })
}

impl TryFrom<event::Model> for EventResponse {
    type Error = AppError;

    fn try_from(model: event::Model) -> Result<Self, Self::Error> {
        let form = event_form(&model)?;
        Ok(EventResponse {
            id: model.id,
            name: model.name,
            date: model.date,
            is_open: model.is_open,
            event_type: form.event_type,
            team_size: form.team_size,
            teams: form.teams,
            common_questions: form.common_questions,
            allow_multiple_team_selection: form.allow_multiple_team_selection,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert a batch of stored events, failing on the first corrupt one.
pub fn event_responses(models: Vec<event::Model>) -> Result<Vec<EventResponse>, AppError> {
    models.into_iter().map(EventResponse::try_from).collect()
}

/// Look up an event by ID with a row lock, returning 404 if not found.
pub async fn find_event_for_update<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}
