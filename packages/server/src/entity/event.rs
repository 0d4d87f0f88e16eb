use common::EventType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub date: DateTimeUtc,
    pub is_open: bool,
    pub event_type: EventType,
    /// Members per registration for team events; 1 means individual.
    pub team_size: i32,
    /// `Team[]` stored as a JSON array.
    #[sea_orm(column_type = "JsonBinary")]
    pub teams: serde_json::Value,
    /// `Question[]` stored as a JSON array.
    #[sea_orm(column_type = "JsonBinary")]
    pub common_questions: serde_json::Value,
    pub allow_multiple_team_selection: bool,

    #[sea_orm(has_many)]
    pub registrations: HasMany<super::registration::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
