use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// QR ledger entry: proof of a participant's enrollment in an event,
/// keyed by the short folio embedded in the QR image.
///
/// Deliberately carries no foreign keys: deleting an event leaves its ledger
/// rows behind (a documented gap inherited from the original system), so the
/// columns must stay plain.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "qr_code")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub participant_id: Uuid,
    pub event_id: Uuid,
    /// last5(participant id) + last5(event id). Not unique by construction;
    /// lookups take the first match.
    pub folio: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
