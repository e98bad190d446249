use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Workshop roster entry. The roster may never grow past the workshop's
/// `limit_quota`; enrollment serializes on the workshop row to guarantee it.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub workshop_id: Uuid,
    #[sea_orm(primary_key)]
    pub participant_id: Uuid,
    #[sea_orm(belongs_to, from = "workshop_id", to = "id")]
    pub workshop: Option<super::workshop::Entity>,
    #[sea_orm(belongs_to, from = "participant_id", to = "id")]
    pub participant: Option<super::participant::Entity>,

    pub attended: bool,
    pub registered_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
