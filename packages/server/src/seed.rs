use chrono::Utc;
use sea_orm::*;
use sea_query::{Index, PostgresQueryBuilder};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::entity::{administrator, qr_code, qr_workshop};
use crate::utils::{hash, identity};

/// Create the bootstrap super admin if one is configured and the email is
/// not already taken by any account.
pub async fn seed_super_admin(
    db: &DatabaseConnection,
    config: &AppConfig,
) -> Result<(), DbErr> {
    let (Some(email), Some(password)) = (
        config.auth.admin_email.as_deref(),
        config.auth.admin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let taken = identity::find_by_email(db, email)
        .await
        .map_err(|e| DbErr::Custom(e.to_string()))?
        .is_some();
    if taken {
        return Ok(());
    }

    let hashed = hash::hash_password(password).map_err(|e| DbErr::Custom(e.to_string()))?;
    let model = administrator::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set("Super".into()),
        last_name: Set("Admin".into()),
        email: Set(email.to_owned()),
        password: Set(hashed),
        phone: Set(String::new()),
        company: Set(String::new()),
        active: Set(true),
        created_at: Set(Utc::now()),
    };
    administrator::Entity::insert(model)
        .exec_without_returning(db)
        .await?;
    info!(email, "Seeded bootstrap super admin");
    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite or non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // One ledger row per participant per event.
    let unique_ledger = Index::create()
        .if_not_exists()
        .name("idx_qr_code_participant_event")
        .table(qr_code::Entity)
        .col(qr_code::Column::ParticipantId)
        .col(qr_code::Column::EventId)
        .unique()
        .to_string(PostgresQueryBuilder);

    // Folio scans at the door: SELECT ... WHERE folio = ?
    let qr_folio = Index::create()
        .if_not_exists()
        .name("idx_qr_code_folio")
        .table(qr_code::Entity)
        .col(qr_code::Column::Folio)
        .to_string(PostgresQueryBuilder);

    let qr_workshop_folio = Index::create()
        .if_not_exists()
        .name("idx_qr_workshop_folio")
        .table(qr_workshop::Entity)
        .col(qr_workshop::Column::Folio)
        .to_string(PostgresQueryBuilder);

    // Ledger cascade: SELECT ... WHERE qr_code_id = ?
    let qr_workshop_parent = Index::create()
        .if_not_exists()
        .name("idx_qr_workshop_qr_code")
        .table(qr_workshop::Entity)
        .col(qr_workshop::Column::QrCodeId)
        .to_string(PostgresQueryBuilder);

    for stmt in [unique_ledger, qr_folio, qr_workshop_folio, qr_workshop_parent] {
        if let Err(e) = db.execute_unprepared(&stmt).await {
            warn!(error = %e, "Failed to ensure index");
            return Err(e);
        }
    }
    info!("Ensured QR ledger indexes exist");
    Ok(())
}
