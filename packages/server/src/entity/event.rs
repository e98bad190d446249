use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Banner image filenames stored as a JSON array. Events must carry at
/// least three; the handlers enforce this on every write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct BannerImages(pub Vec<String>);

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    /// Filename handed over by the upload layer; raw bytes never touch this table.
    pub main_image: String,
    #[sea_orm(column_type = "Json")]
    pub banner_images: BannerImages,
    pub location: String,

    pub start_at: DateTimeUtc,
    pub end_at: DateTimeUtc,

    #[sea_orm(has_many, via = "event_administrator")]
    pub administrators: HasMany<super::event_admin::Entity>,

    #[sea_orm(has_many, via = "event_supervisor")]
    pub supervisors: HasMany<super::supervisor::Entity>,

    #[sea_orm(has_many, via = "event_participant")]
    pub participants: HasMany<super::participant::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
