use sea_orm::sea_query::LockType;
use sea_orm::{ConnectionTrait, DatabaseTransaction, EntityTrait, QuerySelect};
use uuid::Uuid;

use crate::entity::{workshop, workshop_administrator, workshop_participant, workshop_supervisor};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::utils::identity::Role;

/// Look up a workshop by ID, returning 404 if not found.
pub async fn find_workshop<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<workshop::Model, AppError> {
    workshop::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}

/// Same lookup but with a row lock. Capacity checks count the roster while
/// holding this lock so two concurrent enrollments cannot both pass.
pub async fn find_workshop_for_update(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<workshop::Model, AppError> {
    workshop::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Workshop not found".into()))
}

/// Whether a participant sits on the workshop roster.
pub async fn is_enrolled<C: ConnectionTrait>(
    db: &C,
    workshop_id: Uuid,
    participant_id: Uuid,
) -> Result<bool, AppError> {
    Ok(
        workshop_participant::Entity::find_by_id((workshop_id, participant_id))
            .one(db)
            .await?
            .is_some(),
    )
}

/// Verify the caller may manage the given workshop.
pub async fn check_workshop_manage<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    workshop_id: Uuid,
) -> Result<(), AppError> {
    match auth_user.role {
        Role::SuperAdmin => Ok(()),
        Role::EventAdmin => {
            let linked =
                workshop_administrator::Entity::find_by_id((workshop_id, auth_user.user_id))
                    .one(db)
                    .await?
                    .is_some();
            if linked {
                Ok(())
            } else {
                Err(AppError::PermissionDenied)
            }
        }
        _ => Err(AppError::PermissionDenied),
    }
}

/// Verify the caller may run check-in for the given workshop: managers plus
/// supervisors assigned to it.
pub async fn check_workshop_checkin<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    workshop_id: Uuid,
) -> Result<(), AppError> {
    if auth_user.role == Role::Supervisor {
        let assigned = workshop_supervisor::Entity::find_by_id((workshop_id, auth_user.user_id))
            .one(db)
            .await?
            .is_some();
        return if assigned {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        };
    }
    check_workshop_manage(db, auth_user, workshop_id).await
}
