use sea_orm::sea_query::LockType;
use sea_orm::{ConnectionTrait, DatabaseTransaction, EntityTrait, QuerySelect};
use uuid::Uuid;

use crate::entity::{event, event_administrator, event_participant, event_supervisor};
use crate::error::AppError;
use crate::extractors::auth::AuthUser;
use crate::utils::identity::Role;

/// Look up an event by ID, returning 404 if not found.
pub async fn find_event<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}

/// Same lookup but with a row lock, for writes that must serialize on the
/// event (roster changes, ledger writes, cascading deletes).
pub async fn find_event_for_update(
    txn: &DatabaseTransaction,
    id: Uuid,
) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}

/// Whether a participant sits on the event roster.
pub async fn is_enrolled<C: ConnectionTrait>(
    db: &C,
    event_id: Uuid,
    participant_id: Uuid,
) -> Result<bool, AppError> {
    Ok(event_participant::Entity::find_by_id((event_id, participant_id))
        .one(db)
        .await?
        .is_some())
}

/// Verify the caller may manage the given event. Super admins manage
/// everything; event admins only the events they are linked to.
pub async fn check_event_manage<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    event_id: Uuid,
) -> Result<(), AppError> {
    match auth_user.role {
        Role::SuperAdmin => Ok(()),
        Role::EventAdmin => {
            let linked = event_administrator::Entity::find_by_id((event_id, auth_user.user_id))
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

/// Verify the caller may run check-in for the given event: managers plus
/// supervisors assigned to it.
pub async fn check_event_checkin<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    event_id: Uuid,
) -> Result<(), AppError> {
    if auth_user.role == Role::Supervisor {
        let assigned = event_supervisor::Entity::find_by_id((event_id, auth_user.user_id))
            .one(db)
            .await?
            .is_some();
        return if assigned {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        };
    }
    check_event_manage(db, auth_user, event_id).await
}
