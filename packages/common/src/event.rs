#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Smallest allowed team size (individual registration).
pub const MIN_TEAM_SIZE: i32 = 1;
/// Largest allowed team size.
pub const MAX_TEAM_SIZE: i32 = 10;

/// How an event collects registrations.
///
/// When the `sea-orm` feature is enabled, this enum can be stored directly in SeaORM entities.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A fixed-size team (or a single person when the size is 1) registers together.
    #[default]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "team_registration"))]
    TeamRegistration,
    /// One participant applies to one or more club teams and answers questions.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "recruitment"))]
    Recruitment,
}

impl EventType {
    pub const ALL: &'static [EventType] = &[Self::TeamRegistration, Self::Recruitment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TeamRegistration => "team_registration",
            Self::Recruitment => "recruitment",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = EventConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "team_registration" => Ok(Self::TeamRegistration),
            "recruitment" => Ok(Self::Recruitment),
            other => Err(EventConfigError::UnknownEventType(other.to_string())),
        }
    }
}

/// Input widget / value kind of a question.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
    #[default]
    Text,
    Textarea,
    Number,
}

/// A question asked during registration, either to every participant or per team.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[schema(example = "why-join")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    #[schema(example = "Why do you want to join the club?")]
    pub question: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// A club team participants can apply to in a recruitment event.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[schema(example = "web")]
    pub id: String,
    #[schema(example = "Web Development")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_members: Option<u32>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// The part of an event that decides what the registration form looks like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default = "default_team_size")]
    pub team_size: i32,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub common_questions: Vec<Question>,
    #[serde(default)]
    pub allow_multiple_team_selection: bool,
}

fn default_team_size() -> i32 {
    MIN_TEAM_SIZE
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            event_type: EventType::default(),
            team_size: default_team_size(),
            teams: Vec::new(),
            common_questions: Vec::new(),
            allow_multiple_team_selection: false,
        }
    }
}

impl EventForm {
    /// Number of member pages a team registration needs.
    pub fn member_count(&self) -> usize {
        self.team_size.clamp(MIN_TEAM_SIZE, MAX_TEAM_SIZE) as usize
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }
}

/// Problems with an event's stored configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventConfigError {
    #[error("Team size must be a number between {MIN_TEAM_SIZE} and {MAX_TEAM_SIZE}")]
    TeamSizeOutOfRange,
    #[error("Unknown event type '{0}'")]
    UnknownEventType(String),
    #[error("Recruitment events need at least one team")]
    NoTeams,
    #[error("Team ids and names must not be empty")]
    EmptyTeam,
    #[error("Duplicate team id '{0}'")]
    DuplicateTeam(String),
    #[error("Team '{0}' must allow at least one member")]
    ZeroCapacity(String),
    #[error("Question ids and text must not be empty")]
    EmptyQuestion,
    #[error("Duplicate question id '{0}'")]
    DuplicateQuestion(String),
    #[error("Multiple choice question '{0}' needs at least one option")]
    MissingOptions(String),
    #[error("Question '{0}' has min_length greater than max_length")]
    InvalidLengthBounds(String),
}

/// Validate a team size against the allowed range.
pub fn validate_team_size(size: i32) -> Result<(), EventConfigError> {
    if !(MIN_TEAM_SIZE..=MAX_TEAM_SIZE).contains(&size) {
        return Err(EventConfigError::TeamSizeOutOfRange);
    }
    Ok(())
}

impl EventForm {
    /// Check that the configuration can drive a registration form.
    ///
    /// Question ids must be unique across common questions and all team questions,
    /// since answers only carry the question id.
    pub fn validate(&self) -> Result<(), EventConfigError> {
        validate_team_size(self.team_size)?;

        if self.event_type == EventType::Recruitment && self.teams.is_empty() {
            return Err(EventConfigError::NoTeams);
        }

        let mut team_ids = HashSet::new();
        for team in &self.teams {
            if team.id.trim().is_empty() || team.name.trim().is_empty() {
                return Err(EventConfigError::EmptyTeam);
            }
            if !team_ids.insert(team.id.as_str()) {
                return Err(EventConfigError::DuplicateTeam(team.id.clone()));
            }
            if team.max_members == Some(0) {
                return Err(EventConfigError::ZeroCapacity(team.id.clone()));
            }
        }

        let mut question_ids = HashSet::new();
        let all_questions = self
            .common_questions
            .iter()
            .chain(self.teams.iter().flat_map(|t| t.questions.iter()));
        for question in all_questions {
            validate_question(question)?;
            if !question_ids.insert(question.id.as_str()) {
                return Err(EventConfigError::DuplicateQuestion(question.id.clone()));
            }
        }

        Ok(())
    }
}

fn validate_question(question: &Question) -> Result<(), EventConfigError> {
    if question.id.trim().is_empty() || question.question.trim().is_empty() {
        return Err(EventConfigError::EmptyQuestion);
    }
    if question.kind == QuestionType::Mcq && question.options.is_empty() {
        return Err(EventConfigError::MissingOptions(question.id.clone()));
    }
    if let (Some(min), Some(max)) = (question.min_length, question.max_length)
        && min > max
    {
        return Err(EventConfigError::InvalidLengthBounds(question.id.clone()));
    }
    Ok(())
}
