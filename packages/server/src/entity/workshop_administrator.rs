use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workshop_administrator")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub workshop_id: Uuid,
    #[sea_orm(primary_key)]
    pub admin_id: Uuid,
    #[sea_orm(belongs_to, from = "workshop_id", to = "id")]
    pub workshop: Option<super::workshop::Entity>,
    #[sea_orm(belongs_to, from = "admin_id", to = "id")]
    pub admin: Option<super::event_admin::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
