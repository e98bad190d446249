use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr, Query as SeaQuery};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{
    participant, qr_code, qr_workshop, supervisor, workshop, workshop_administrator,
    workshop_participant, workshop_supervisor,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::enrollment::{
    AttendanceRequest, WorkshopAttendanceResponse, WorkshopEnrollmentResponse,
    validate_attendance_request,
};
use crate::models::shared::escape_like;
use crate::models::workshop::*;
use crate::state::AppState;
use crate::utils::event::find_event_for_update;
use crate::utils::identity::Role;
use crate::utils::workshop::{
    check_workshop_checkin, check_workshop_manage, find_workshop, find_workshop_for_update,
};
use crate::utils::{folio, schedule};

use super::event::enroll_participant;

#[utoipa::path(
    post,
    path = "/",
    tag = "Workshops",
    operation_id = "createWorkshop",
    summary = "Create a new workshop",
    description = "Creates a workshop, initially unbound to any event. Event admins are linked as managers of the workshops they create.",
    request_body = CreateWorkshopRequest,
    responses(
        (status = 201, description = "Workshop created", body = WorkshopResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkshopRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin])?;
    validate_create_workshop(&payload)?;

    let start_at = schedule::parse_date(&payload.start_at)?;
    let end_at = schedule::parse_date(&payload.end_at)?;
    schedule::check_range(start_at, end_at)?;

    let now = chrono::Utc::now();
    let new_workshop = workshop::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        instructor: Set(payload.instructor),
        image: Set(payload.image),
        limit_quota: Set(payload.limit_quota),
        start_at: Set(start_at),
        end_at: Set(end_at),
        event_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let txn = state.db.begin().await?;
    let model = new_workshop.insert(&txn).await?;

    if auth_user.role == Role::EventAdmin {
        workshop_administrator::ActiveModel {
            workshop_id: Set(model.id),
            admin_id: Set(auth_user.user_id),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(WorkshopResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Workshops",
    operation_id = "listWorkshops",
    summary = "List workshops",
    params(WorkshopListQuery),
    responses(
        (status = 200, description = "List of workshops", body = WorkshopListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_workshops(
    State(state): State<AppState>,
    Query(query): Query<WorkshopListQuery>,
) -> Result<Json<WorkshopListResponse>, AppError> {
    let mut select = workshop::Entity::find();

    if let Some(ref name) = query.name {
        let term = escape_like(name.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(workshop::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(event_id) = query.event_id {
        select = select.filter(workshop::Column::EventId.eq(event_id));
    }

    if let Some(admin_id) = query.admin_id {
        select = select.filter(
            workshop::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(workshop_administrator::Column::WorkshopId)
                    .from(workshop_administrator::Entity)
                    .and_where(workshop_administrator::Column::AdminId.eq(admin_id))
                    .to_owned(),
            ),
        );
    }

    if let Some(supervisor_id) = query.supervisor_id {
        select = select.filter(
            workshop::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(workshop_supervisor::Column::WorkshopId)
                    .from(workshop_supervisor::Entity)
                    .and_where(workshop_supervisor::Column::SupervisorId.eq(supervisor_id))
                    .to_owned(),
            ),
        );
    }

    if let Some(participant_id) = query.participant_id {
        select = select.filter(
            workshop::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(workshop_participant::Column::WorkshopId)
                    .from(workshop_participant::Entity)
                    .and_where(workshop_participant::Column::ParticipantId.eq(participant_id))
                    .to_owned(),
            ),
        );
    }

    let data = select
        .order_by_asc(workshop::Column::StartAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(WorkshopResponse::from)
        .collect();

    Ok(Json(WorkshopListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "getWorkshop",
    summary = "Get a workshop by ID",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    responses(
        (status = 200, description = "Workshop detail", body = WorkshopResponse),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_workshop(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkshopResponse>, AppError> {
    let model = find_workshop(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "updateWorkshop",
    summary = "Update a workshop",
    description = "Partially updates a workshop using PATCH semantics. If the workshop is bound to an event, the effective dates must stay within the event's dates.",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    request_body = UpdateWorkshopRequest,
    responses(
        (status = 200, description = "Workshop updated", body = WorkshopResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateWorkshopRequest>,
) -> Result<Json<WorkshopResponse>, AppError> {
    validate_update_workshop(&payload)?;

    let txn = state.db.begin().await?;
    check_workshop_manage(&txn, &auth_user, id).await?;
    let existing = find_workshop_for_update(&txn, id).await?;

    let effective_start = match payload.start_at {
        Some(ref s) => schedule::parse_date(s)?,
        None => existing.start_at,
    };
    let effective_end = match payload.end_at {
        Some(ref s) => schedule::parse_date(s)?,
        None => existing.end_at,
    };
    schedule::check_range(effective_start, effective_end)?;

    if let Some(event_id) = existing.event_id
        && let Some(event) = crate::entity::event::Entity::find_by_id(event_id)
            .one(&txn)
            .await?
        && (effective_start < event.start_at || effective_end > event.end_at)
    {
        return Err(AppError::Validation(
            "Workshop dates must fall within the event dates".into(),
        ));
    }

    let mut active: workshop::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(instructor) = payload.instructor {
        active.instructor = Set(instructor);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(limit_quota) = payload.limit_quota {
        active.limit_quota = Set(limit_quota);
    }
    active.start_at = Set(effective_start);
    active.end_at = Set(effective_end);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Workshops",
    operation_id = "deleteWorkshop",
    summary = "Delete a workshop",
    description = "Deletes a workshop together with its manager links, supervisor assignments, roster and nested ledger folios.",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    responses(
        (status = 204, description = "Workshop deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_workshop_manage(&txn, &auth_user, id).await?;
    let _workshop = find_workshop_for_update(&txn, id).await?;

    workshop_administrator::Entity::delete_many()
        .filter(workshop_administrator::Column::WorkshopId.eq(id))
        .exec(&txn)
        .await?;
    workshop_supervisor::Entity::delete_many()
        .filter(workshop_supervisor::Column::WorkshopId.eq(id))
        .exec(&txn)
        .await?;
    workshop_participant::Entity::delete_many()
        .filter(workshop_participant::Column::WorkshopId.eq(id))
        .exec(&txn)
        .await?;
    qr_workshop::Entity::delete_many()
        .filter(qr_workshop::Column::WorkshopId.eq(id))
        .exec(&txn)
        .await?;
    workshop::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/supervisors",
    tag = "Workshops",
    operation_id = "addWorkshopSupervisor",
    summary = "Assign a supervisor to a workshop",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    request_body = AddWorkshopSupervisorRequest,
    responses(
        (status = 204, description = "Supervisor assigned"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop or supervisor not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Supervisor already assigned (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(workshop_id))]
pub async fn add_workshop_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    AppJson(payload): AppJson<AddWorkshopSupervisorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_workshop_manage(&txn, &auth_user, workshop_id).await?;
    find_workshop_for_update(&txn, workshop_id).await?;

    supervisor::Entity::find_by_id(payload.supervisor_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Supervisor not found".into()))?;

    if workshop_supervisor::Entity::find_by_id((workshop_id, payload.supervisor_id))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Supervisor is already assigned to this workshop".into(),
        ));
    }

    workshop_supervisor::ActiveModel {
        workshop_id: Set(workshop_id),
        supervisor_id: Set(payload.supervisor_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/{id}/supervisors/{supervisor_id}",
    tag = "Workshops",
    operation_id = "removeWorkshopSupervisor",
    summary = "Unassign a supervisor from a workshop",
    params(
        ("id" = Uuid, Path, description = "Workshop ID"),
        ("supervisor_id" = Uuid, Path, description = "Supervisor ID"),
    ),
    responses(
        (status = 204, description = "Supervisor unassigned"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop or assignment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(workshop_id, supervisor_id))]
pub async fn remove_workshop_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((workshop_id, supervisor_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_workshop_manage(&txn, &auth_user, workshop_id).await?;
    find_workshop_for_update(&txn, workshop_id).await?;

    let link = workshop_supervisor::Entity::find_by_id((workshop_id, supervisor_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment not found".into()))?;
    let active: workshop_supervisor::ActiveModel = link.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/enrollments",
    tag = "Enrollment",
    operation_id = "enrollInWorkshop",
    summary = "Enroll the authenticated participant in a workshop",
    description = "Adds the caller to the workshop roster, enforcing the quota and rejecting schedule overlaps with any other workshop the caller holds, across all events. If the caller is not yet enrolled in the owning event, that enrollment happens implicitly and is returned alongside.",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    responses(
        (status = 201, description = "Enrolled", body = WorkshopEnrollmentResponse),
        (status = 400, description = "Workshop full, unbound, or schedule overlap (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already enrolled (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(workshop_id))]
pub async fn enroll_in_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(Role::Participant)?;
    let participant_id = auth_user.user_id;

    // Resolve the owning event before taking any locks; locks are always
    // taken event first, then workshop.
    let event_id = find_workshop(&state.db, workshop_id)
        .await?
        .event_id
        .ok_or_else(|| AppError::Validation("Workshop is not bound to an event".into()))?;

    let txn = state.db.begin().await?;
    let event = find_event_for_update(&txn, event_id).await?;
    let workshop = find_workshop_for_update(&txn, workshop_id).await?;

    // Binding may have changed between the unlocked read and the lock.
    if workshop.event_id != Some(event_id) {
        return Err(AppError::Conflict("Workshop binding changed, retry".into()));
    }

    if workshop_participant::Entity::find_by_id((workshop_id, participant_id))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Participant is already enrolled in this workshop".into(),
        ));
    }

    // Quota check while holding the workshop row lock.
    let enrolled = workshop_participant::Entity::find()
        .filter(workshop_participant::Column::WorkshopId.eq(workshop_id))
        .count(&txn)
        .await?;
    if enrolled >= workshop.limit_quota as u64 {
        return Err(AppError::Validation("Workshop is full".into()));
    }

    // Overlap check against every workshop the participant already holds,
    // whichever event each belongs to.
    let siblings = workshop::Entity::find()
        .filter(workshop::Column::Id.ne(workshop_id))
        .filter(
            workshop::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(workshop_participant::Column::WorkshopId)
                    .from(workshop_participant::Entity)
                    .and_where(workshop_participant::Column::ParticipantId.eq(participant_id))
                    .to_owned(),
            ),
        )
        .all(&txn)
        .await?;
    for sibling in &siblings {
        if schedule::overlaps(
            workshop.start_at,
            workshop.end_at,
            sibling.start_at,
            sibling.end_at,
        ) {
            return Err(AppError::Validation(format!(
                "Schedule overlaps with workshop '{}'",
                sibling.name
            )));
        }
    }

    // Enroll in the event implicitly if needed, creating the ledger entry.
    let event_enrollment = if crate::utils::event::is_enrolled(&txn, event_id, participant_id)
        .await?
    {
        None
    } else {
        Some(enroll_participant(&txn, &event, participant_id).await?)
    };

    workshop_participant::ActiveModel {
        workshop_id: Set(workshop_id),
        participant_id: Set(participant_id),
        attended: Set(false),
        registered_at: Set(chrono::Utc::now()),
    }
    .insert(&txn)
    .await?;

    let ledger = qr_code::Entity::find()
        .filter(qr_code::Column::ParticipantId.eq(participant_id))
        .filter(qr_code::Column::EventId.eq(event_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Internal("Missing event ledger entry".into()))?;

    let workshop_folio = folio::derive(participant_id, workshop_id);
    qr_workshop::ActiveModel {
        id: Set(Uuid::new_v4()),
        qr_code_id: Set(ledger.id),
        workshop_id: Set(workshop_id),
        folio: Set(workshop_folio.clone()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(WorkshopEnrollmentResponse {
            workshop_id,
            folio: workshop_folio,
            event_enrollment,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/{id}/enrollments/{participant_id}",
    tag = "Enrollment",
    operation_id = "cancelWorkshopEnrollment",
    summary = "Cancel a workshop enrollment",
    description = "Removes the participant from the workshop roster and drops the nested workshop folio. The event enrollment and its QR are left untouched.",
    params(
        ("id" = Uuid, Path, description = "Workshop ID"),
        ("participant_id" = Uuid, Path, description = "Participant ID"),
    ),
    responses(
        (status = 204, description = "Enrollment cancelled"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop or enrollment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(workshop_id, participant_id))]
pub async fn cancel_workshop_enrollment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((workshop_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    if auth_user.role == Role::Participant {
        if auth_user.user_id != participant_id {
            return Err(AppError::PermissionDenied);
        }
    } else {
        check_workshop_manage(&txn, &auth_user, workshop_id).await?;
    }

    find_workshop_for_update(&txn, workshop_id).await?;

    let roster_row = workshop_participant::Entity::find_by_id((workshop_id, participant_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    qr_workshop::Entity::delete_many()
        .filter(qr_workshop::Column::WorkshopId.eq(workshop_id))
        .filter(
            qr_workshop::Column::QrCodeId.in_subquery(
                SeaQuery::select()
                    .column(qr_code::Column::Id)
                    .from(qr_code::Entity)
                    .and_where(qr_code::Column::ParticipantId.eq(participant_id))
                    .to_owned(),
            ),
        )
        .exec(&txn)
        .await?;

    let active: workshop_participant::ActiveModel = roster_row.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/attendance",
    tag = "Attendance",
    operation_id = "markWorkshopAttendance",
    summary = "Mark workshop attendance by scanned folio",
    description = "Resolves a scanned workshop folio and flips the roster row's attendance flag. Unlike event check-in, scanning the same folio twice is rejected with 409.",
    params(("id" = Uuid, Path, description = "Workshop ID")),
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Attendance marked", body = WorkshopAttendanceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Workshop, folio or enrollment not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Folio already scanned (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(workshop_id))]
pub async fn mark_workshop_attendance(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(workshop_id): Path<Uuid>,
    AppJson(payload): AppJson<AttendanceRequest>,
) -> Result<Json<WorkshopAttendanceResponse>, AppError> {
    validate_attendance_request(&payload)?;

    let txn = state.db.begin().await?;
    let workshop = find_workshop_for_update(&txn, workshop_id).await?;
    check_workshop_checkin(&txn, &auth_user, workshop_id).await?;

    let ledger = qr_workshop::Entity::find()
        .filter(qr_workshop::Column::WorkshopId.eq(workshop_id))
        .filter(qr_workshop::Column::Folio.eq(payload.folio.trim()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Folio not found for this workshop".into()))?;

    let parent = qr_code::Entity::find_by_id(ledger.qr_code_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Ledger entry not found".into()))?;

    let roster_row = workshop_participant::Entity::find_by_id((workshop_id, parent.participant_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    if roster_row.attended {
        return Err(AppError::Conflict("Folio already scanned".into()));
    }

    let participant_id = roster_row.participant_id;
    let mut active: workshop_participant::ActiveModel = roster_row.into();
    active.attended = Set(true);
    active.update(&txn).await?;

    let p = participant::Entity::find_by_id(participant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;
    txn.commit().await?;

    Ok(Json(WorkshopAttendanceResponse {
        participant_id,
        name: p.name,
        last_name: p.last_name,
        workshop_name: workshop.name,
        attended: true,
        marked_at: chrono::Utc::now(),
    }))
}
