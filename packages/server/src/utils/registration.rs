use std::collections::HashMap;

use common::{Answer, EventForm, MemberData, TeamAnswers};

use super::event::from_json;
use crate::entity::registration;
use crate::error::AppError;
use crate::models::registration::{EventRef, RegistrationResponse};

pub const DUPLICATE_MESSAGE: &str = "One or more members have already registered for this event";

/// Build the API view of a stored registration and the event it belongs to.
pub fn registration_response(
    model: registration::Model,
    event: EventRef,
) -> Result<RegistrationResponse, AppError> {
    Ok(RegistrationResponse {
        id: model.id,
        event,
        event_type: model.event_type,
        members: from_json::<Vec<MemberData>>(&model.members, "members")?,
        selected_teams: from_json::<Vec<String>>(&model.selected_teams, "selected_teams")?,
        common_answers: from_json::<Vec<Answer>>(&model.common_answers, "common_answers")?,
        team_answers: from_json::<Vec<TeamAnswers>>(&model.team_answers, "team_answers")?,
        created_at: model.created_at,
    })
}

/// Reject a team pick when a selected team already holds `max_members`
/// applicants. `existing` holds the team selections of earlier registrations.
pub fn check_team_capacity(
    form: &EventForm,
    selected: &[String],
    existing: &[Vec<String>],
) -> Result<(), AppError> {
    let mut taken: HashMap<&str, u32> = HashMap::new();
    for team_id in existing.iter().flatten() {
        *taken.entry(team_id.as_str()).or_default() += 1;
    }
    for team_id in selected {
        let Some(team) = form.team(team_id) else {
            continue;
        };
        if let Some(max) = team.max_members
            && taken.get(team_id.as_str()).copied().unwrap_or(0) >= max
        {
            return Err(AppError::Conflict(format!("Team '{}' is full", team.name)));
        }
    }
    Ok(())
}
