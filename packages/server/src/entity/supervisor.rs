use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supervisor ("checker"): scans folios and marks attendance. Owned by
/// exactly one event admin.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "supervisor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub phone: String,
    pub active: bool,

    pub administrator_id: Uuid,
    #[sea_orm(belongs_to, from = "administrator_id", to = "id")]
    pub administrator: Option<super::event_admin::Entity>,

    #[sea_orm(has_many, via = "event_supervisor")]
    pub events: HasMany<super::event::Entity>,

    #[sea_orm(has_many, via = "workshop_supervisor")]
    pub workshops: HasMany<super::workshop::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
