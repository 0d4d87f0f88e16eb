use common::EventType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub event_id: i32,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: HasOne<super::event::Entity>,

    /// Copied from the event at submission time.
    pub event_type: EventType,
    /// `MemberData[]`; a recruitment registration holds exactly the applicant.
    #[sea_orm(column_type = "JsonBinary")]
    pub members: serde_json::Value,
    /// Team ids picked by a recruitment applicant.
    #[sea_orm(column_type = "JsonBinary")]
    pub selected_teams: serde_json::Value,
    #[sea_orm(column_type = "JsonBinary")]
    pub common_answers: serde_json::Value,
    /// `TeamAnswers[]`.
    #[sea_orm(column_type = "JsonBinary")]
    pub team_answers: serde_json::Value,

    #[sea_orm(has_many)]
    pub member_rows: HasMany<super::registration_member::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
