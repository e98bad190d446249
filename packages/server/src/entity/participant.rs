use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event participant, including the demographic fields collected at
/// registration time.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participant")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,

    pub gender: String,
    pub birthday: Option<String>,
    /// Channel through which the participant heard about the event.
    pub awareness: String,
    pub living_state: String,
    pub profession: String,
    pub workplace: String,

    #[sea_orm(has_many, via = "event_participant")]
    pub events: HasMany<super::event::Entity>,

    #[sea_orm(has_many, via = "workshop_participant")]
    pub workshops: HasMany<super::workshop::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
