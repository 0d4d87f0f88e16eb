use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::answer::{Answer, validate_answers};
use crate::error::ValidationError;
use crate::event::{EventForm, EventType};
use crate::member::{MemberData, validate_members};

/// Answers to the questions of one selected team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamAnswers {
    pub team_id: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A recruitment applicant: personal details plus team choices and answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantData {
    #[serde(flatten)]
    pub member: MemberData,
    #[serde(default)]
    pub selected_teams: Vec<String>,
    #[serde(default)]
    pub common_answers: Vec<Answer>,
    #[serde(default)]
    pub team_answers: Vec<TeamAnswers>,
}

/// Payload posted by the registration form.
///
/// Team registrations fill `members`; recruitment registrations fill `participant`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSubmission {
    #[serde(alias = "event")]
    #[schema(example = 1)]
    pub event_id: i32,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberData>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant: Option<ParticipantData>,
    /// Answers to the event's common questions for team registrations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_answers: Vec<Answer>,
}

/// A submission that passed validation, normalized for storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Application {
    pub event_type: EventType,
    pub members: Vec<MemberData>,
    pub selected_teams: Vec<String>,
    pub common_answers: Vec<Answer>,
    pub team_answers: Vec<TeamAnswers>,
}

/// Check a team choice against the event's teams and selection policy.
pub fn validate_team_selection(
    form: &EventForm,
    selected: &[String],
) -> Result<(), ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoTeamSelected);
    }
    if selected.len() > 1 && !form.allow_multiple_team_selection {
        return Err(ValidationError::MultipleTeamsNotAllowed);
    }
    let mut seen = HashSet::new();
    for id in selected {
        if form.team(id).is_none() {
            return Err(ValidationError::UnknownTeam(id.clone()));
        }
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::DuplicateTeamSelection(id.clone()));
        }
    }
    Ok(())
}

/// Answers given for `team_id`, or an empty slice when the team got none.
pub fn answers_for_team<'a>(team_answers: &'a [TeamAnswers], team_id: &str) -> &'a [Answer] {
    team_answers
        .iter()
        .find(|ta| ta.team_id == team_id)
        .map(|ta| ta.answers.as_slice())
        .unwrap_or(&[])
}

/// Validate the per-team answers of a recruitment application.
pub fn validate_team_answers(
    form: &EventForm,
    selected: &[String],
    team_answers: &[TeamAnswers],
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for entry in team_answers {
        if !selected.contains(&entry.team_id) {
            return Err(ValidationError::AnswersForUnselectedTeam(
                entry.team_id.clone(),
            ));
        }
        if !seen.insert(entry.team_id.as_str()) {
            return Err(ValidationError::DuplicateAnswer(entry.team_id.clone()));
        }
    }
    for id in selected {
        let team = form
            .team(id)
            .ok_or_else(|| ValidationError::UnknownTeam(id.clone()))?;
        validate_answers(&team.questions, answers_for_team(team_answers, id))?;
    }
    Ok(())
}

/// Validate a whole submission against the event it targets.
pub fn validate_submission(
    form: &EventForm,
    submission: &RegistrationSubmission,
) -> Result<Application, ValidationError> {
    if submission.event_type != form.event_type {
        return Err(ValidationError::EventTypeMismatch {
            expected: form.event_type.as_str(),
        });
    }

    match form.event_type {
        EventType::TeamRegistration => {
            let members = submission.members.as_deref().unwrap_or(&[]);
            let expected = form.member_count();
            if members.len() != expected {
                return Err(ValidationError::TeamSizeMismatch {
                    expected,
                    actual: members.len(),
                });
            }
            validate_members(members)?;
            validate_answers(&form.common_questions, &submission.common_answers)?;

            Ok(Application {
                event_type: EventType::TeamRegistration,
                members: members.iter().map(MemberData::normalized).collect(),
                selected_teams: Vec::new(),
                common_answers: submission.common_answers.clone(),
                team_answers: Vec::new(),
            })
        }
        EventType::Recruitment => {
            let participant = submission
                .participant
                .as_ref()
                .ok_or(ValidationError::MissingParticipant)?;
            participant.member.validate()?;
            validate_answers(&form.common_questions, &participant.common_answers)?;
            validate_team_selection(form, &participant.selected_teams)?;
            validate_team_answers(form, &participant.selected_teams, &participant.team_answers)?;

            Ok(Application {
                event_type: EventType::Recruitment,
                members: vec![participant.member.normalized()],
                selected_teams: participant.selected_teams.clone(),
                common_answers: participant.common_answers.clone(),
                team_answers: participant.team_answers.clone(),
            })
        }
    }
}
