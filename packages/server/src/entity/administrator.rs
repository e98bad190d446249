use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform-level administrator (the `SuperAdmin` role).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "administrator")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 password hash, never plaintext.
    pub password: String,
    pub phone: String,
    pub company: String,
    pub active: bool,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
