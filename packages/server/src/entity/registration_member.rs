use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One person of a registration, kept in its own table so that the same
/// person cannot be registered twice for an event (see `seed::ensure_indexes`).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration_member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub registration_id: i32,
    #[sea_orm(belongs_to, from = "registration_id", to = "id")]
    pub registration: HasOne<super::registration::Entity>,

    pub event_id: i32,
    pub registration_number: String,
    /// Lowercased.
    pub official_email: String,
}

impl ActiveModelBehavior for ActiveModel {}
