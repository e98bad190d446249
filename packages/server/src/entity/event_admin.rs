use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event administrator: creates and manages events, workshops and the
/// supervisors that scan attendance for them.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_admin")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub phone: String,
    pub company: String,
    pub active: bool,

    #[sea_orm(has_many, via = "event_administrator")]
    pub events: HasMany<super::event::Entity>,

    #[sea_orm(has_many, via = "workshop_administrator")]
    pub workshops: HasMany<super::workshop::Entity>,

    #[sea_orm(has_many)]
    pub supervisors: HasMany<super::supervisor::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
