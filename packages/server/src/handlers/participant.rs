use axum::Json;
use axum::extract::{Query, State};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{event, participant, qr_code, qr_workshop, workshop};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::models::enrollment::{
    FolioSearchQuery, FolioSearchResponse, QrLedgerEntry, QrLedgerResponse, QrWorkshopEntry,
};
use crate::models::user::{ParticipantLookupQuery, UserResponse};
use crate::state::AppState;
use crate::utils::identity::{Role, UserRecord};
use crate::utils::qr;

#[utoipa::path(
    get,
    path = "/me/qrs",
    tag = "Enrollment",
    operation_id = "getMyQrLedger",
    summary = "Get the caller's QR ledger",
    description = "Returns every event registration the participant holds, with the QR image re-rendered from the stored ids and the nested workshop folios attached. Entries whose event has since been deleted are omitted.",
    responses(
        (status = 200, description = "QR ledger", body = QrLedgerResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn get_my_qr_ledger(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<QrLedgerResponse>, AppError> {
    auth_user.require_role(Role::Participant)?;

    let ledger_rows = qr_code::Entity::find()
        .filter(qr_code::Column::ParticipantId.eq(auth_user.user_id))
        .order_by_asc(qr_code::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let mut data = Vec::with_capacity(ledger_rows.len());
    for row in ledger_rows {
        // The ledger has no foreign keys; the event may be gone.
        let Some(event) = event::Entity::find_by_id(row.event_id).one(&state.db).await? else {
            continue;
        };

        let nested = qr_workshop::Entity::find()
            .filter(qr_workshop::Column::QrCodeId.eq(row.id))
            .all(&state.db)
            .await?;
        let mut workshops = Vec::with_capacity(nested.len());
        for entry in nested {
            let name = workshop::Entity::find_by_id(entry.workshop_id)
                .one(&state.db)
                .await?
                .map(|w| w.name)
                .unwrap_or_default();
            workshops.push(QrWorkshopEntry {
                workshop_id: entry.workshop_id,
                workshop_name: name,
                folio: entry.folio,
            });
        }

        data.push(QrLedgerEntry {
            event_id: event.id,
            event_name: event.name,
            event_image: event.main_image,
            folio: row.folio,
            qr: qr::render_registration(row.participant_id, row.event_id)?,
            workshops,
        });
    }

    Ok(Json(QrLedgerResponse { data }))
}

#[utoipa::path(
    get,
    path = "/me/qrs/search",
    tag = "Enrollment",
    operation_id = "searchMyFolio",
    summary = "Find one of the caller's ledger entries by folio",
    description = "Searches the caller's event folios first, then the nested workshop folios.",
    params(FolioSearchQuery),
    responses(
        (status = 200, description = "Ledger entry found", body = FolioSearchResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Folio not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn search_my_folio(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<FolioSearchQuery>,
) -> Result<Json<FolioSearchResponse>, AppError> {
    auth_user.require_role(Role::Participant)?;
    let folio = query.folio.trim();

    if let Some(entry) = qr_code::Entity::find()
        .filter(qr_code::Column::ParticipantId.eq(auth_user.user_id))
        .filter(qr_code::Column::Folio.eq(folio))
        .one(&state.db)
        .await?
    {
        return Ok(Json(FolioSearchResponse {
            folio: entry.folio,
            event_id: entry.event_id,
            workshop_id: None,
            qr: Some(qr::render_registration(entry.participant_id, entry.event_id)?),
        }));
    }

    // Workshop folios hang off the event-level ledger row.
    let ledger_ids: Vec<Uuid> = qr_code::Entity::find()
        .filter(qr_code::Column::ParticipantId.eq(auth_user.user_id))
        .select_only()
        .column(qr_code::Column::Id)
        .into_tuple()
        .all(&state.db)
        .await?;
    if !ledger_ids.is_empty()
        && let Some(entry) = qr_workshop::Entity::find()
            .filter(qr_workshop::Column::QrCodeId.is_in(ledger_ids))
            .filter(qr_workshop::Column::Folio.eq(folio))
            .one(&state.db)
            .await?
    {
        let parent = qr_code::Entity::find_by_id(entry.qr_code_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Ledger entry not found".into()))?;
        return Ok(Json(FolioSearchResponse {
            folio: entry.folio,
            event_id: parent.event_id,
            workshop_id: Some(entry.workshop_id),
            qr: None,
        }));
    }

    Err(AppError::NotFound("Folio not found".into()))
}

#[utoipa::path(
    get,
    path = "/by-email",
    tag = "Users",
    operation_id = "findParticipantByEmail",
    summary = "Look a participant up by email",
    params(ParticipantLookupQuery),
    responses(
        (status = 200, description = "Participant profile", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Participant not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, query))]
pub async fn find_participant_by_email(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ParticipantLookupQuery>,
) -> Result<Json<UserResponse>, AppError> {
    auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin, Role::Supervisor])?;

    let email = query.email.trim().to_lowercase();
    let model = participant::Entity::find()
        .filter(participant::Column::Email.eq(&email))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;

    Ok(Json(UserResponse::from(UserRecord::Participant(model))))
}
