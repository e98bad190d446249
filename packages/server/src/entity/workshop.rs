use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Recreational workshop. `event_id` is an optional one-time binding to the
/// owning event; it is a plain column on purpose — referential integrity for
/// it is enforced at the write boundary, not by the schema.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub description: String,
    pub instructor: String,
    pub image: String,
    /// Maximum roster size.
    pub limit_quota: i32,

    pub start_at: DateTimeUtc,
    pub end_at: DateTimeUtc,

    pub event_id: Option<Uuid>,

    #[sea_orm(has_many, via = "workshop_administrator")]
    pub administrators: HasMany<super::event_admin::Entity>,

    #[sea_orm(has_many, via = "workshop_supervisor")]
    pub supervisors: HasMany<super::supervisor::Entity>,

    #[sea_orm(has_many, via = "workshop_participant")]
    pub participants: HasMany<super::participant::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
