use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Event roster entry. One row per enrolled participant; a matching
/// `qr_code` ledger row must exist whenever this row does.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "event_participant")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub event_id: Uuid,
    #[sea_orm(primary_key)]
    pub participant_id: Uuid,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: Option<super::event::Entity>,
    #[sea_orm(belongs_to, from = "participant_id", to = "id")]
    pub participant: Option<super::participant::Entity>,

    pub attended: bool,
    pub registered_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
