use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Nested ledger entry: a workshop folio hanging off a participant's
/// event-level `qr_code` row. Exists iff the participant sits on that
/// workshop's roster and the workshop belongs to the ledger entry's event.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "qr_workshop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub qr_code_id: Uuid,
    pub workshop_id: Uuid,
    pub folio: String,
}

impl ActiveModelBehavior for ActiveModel {}
