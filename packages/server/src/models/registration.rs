use chrono::{DateTime, Utc};
use common::{Answer, EventType, MemberData, TeamAnswers};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use super::shared::{Pagination, validate_window};
use crate::error::AppError;

/// Default page size; matches the dashboard's historical 100-row limit.
pub const DEFAULT_PER_PAGE: u64 = 100;
pub const MAX_PER_PAGE: u64 = 500;

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegistrationListQuery {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page (1-500, default 100).
    pub per_page: Option<u64>,
    /// Only registrations created at or after this instant.
    pub from: Option<DateTime<Utc>>,
    /// Only registrations created at or before this instant.
    pub to: Option<DateTime<Utc>>,
    /// Only registrations for this event.
    pub event_id: Option<i32>,
}

pub fn validate_list_query(query: &RegistrationListQuery) -> Result<(), AppError> {
    validate_window(query.from, query.to)
}

/// The event a registration belongs to, as embedded in listings.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EventRef {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Code Clash 5.0")]
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    #[schema(example = 12)]
    pub id: i32,
    pub event: EventRef,
    pub event_type: EventType,
    pub members: Vec<MemberData>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub selected_teams: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub common_answers: Vec<Answer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub team_answers: Vec<TeamAnswers>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreateRegistrationResponse {
    #[schema(example = "Registration successful")]
    pub message: String,
    pub registration: RegistrationResponse,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationListResponse {
    pub registrations: Vec<RegistrationResponse>,
    pub pagination: Pagination,
}
