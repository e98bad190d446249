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
    event, event_administrator, event_participant, event_supervisor, participant, qr_code,
    qr_workshop, supervisor, workshop, workshop_participant,
};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::enrollment::{
    AttendanceRequest, AttendanceResponse, EnrollEventRequest, EventEnrollmentResponse,
    FolioLookupResponse, validate_attendance_request, validate_enroll_event,
};
use crate::models::event::*;
use crate::models::shared::escape_like;
use crate::state::AppState;
use crate::utils::event::{
    check_event_checkin, check_event_manage, find_event, find_event_for_update,
};
use crate::utils::identity::{self, Role, UserRecord};
use crate::utils::{folio, hash, password, qr, schedule};

#[utoipa::path(
    post,
    path = "/",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create a new event",
    description = "Creates an event. Event admins are linked as managers of the events they create. At least three banner images are required.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Event name already in use (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin])?;
    validate_create_event(&payload)?;

    let start_at = schedule::parse_date(&payload.start_at)?;
    let end_at = schedule::parse_date(&payload.end_at)?;
    schedule::check_range(start_at, end_at)?;

    let now = chrono::Utc::now();
    let new_event = event::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        main_image: Set(payload.main_image),
        banner_images: Set(event::BannerImages(payload.banner_images)),
        location: Set(payload.location),
        start_at: Set(start_at),
        end_at: Set(end_at),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let txn = state.db.begin().await?;
    let model = new_event.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("An event with this name already exists".into())
        }
        _ => AppError::from(e),
    })?;

    if auth_user.role == Role::EventAdmin {
        event_administrator::ActiveModel {
            event_id: Set(model.id),
            admin_id: Set(auth_user.user_id),
        }
        .insert(&txn)
        .await?;
    }
    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List events",
    description = "Returns events, optionally filtered by a name substring, by managing event admin, or by assigned supervisor. Public: participants browse events before signing up.",
    params(EventListQuery),
    responses(
        (status = 200, description = "List of events", body = EventListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let mut select = event::Entity::find();

    if let Some(ref name) = query.name {
        let term = escape_like(name.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(event::Column::Name)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(admin_id) = query.admin_id {
        select = select.filter(
            event::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(event_administrator::Column::EventId)
                    .from(event_administrator::Entity)
                    .and_where(event_administrator::Column::AdminId.eq(admin_id))
                    .to_owned(),
            ),
        );
    }

    if let Some(supervisor_id) = query.supervisor_id {
        select = select.filter(
            event::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(event_supervisor::Column::EventId)
                    .from(event_supervisor::Entity)
                    .and_where(event_supervisor::Column::SupervisorId.eq(supervisor_id))
                    .to_owned(),
            ),
        );
    }

    let data = select
        .order_by_asc(event::Column::StartAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(EventResponse::from)
        .collect();

    Ok(Json(EventListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    operation_id = "getEvent",
    summary = "Get an event by ID",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event detail", body = EventResponse),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, AppError> {
    let model = find_event(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Partially updates an event using PATCH semantics. Cross-field validation keeps end_at at or after start_at even when only one of the two is updated, and the banner set can never drop below three images.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    validate_update_event(&payload)?;

    let txn = state.db.begin().await?;
    check_event_manage(&txn, &auth_user, id).await?;
    let existing = find_event_for_update(&txn, id).await?;

    // Cross-field date validation against existing values
    let effective_start = match payload.start_at {
        Some(ref s) => schedule::parse_date(s)?,
        None => existing.start_at,
    };
    let effective_end = match payload.end_at {
        Some(ref s) => schedule::parse_date(s)?,
        None => existing.end_at,
    };
    schedule::check_range(effective_start, effective_end)?;

    let mut active: event::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(main_image) = payload.main_image {
        active.main_image = Set(main_image);
    }
    if let Some(banner_images) = payload.banner_images {
        active.banner_images = Set(event::BannerImages(banner_images));
    }
    if let Some(location) = payload.location {
        active.location = Set(location);
    }
    active.start_at = Set(effective_start);
    active.end_at = Set(effective_end);
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("An event with this name already exists".into())
        }
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Deletes an event together with its manager links, supervisor assignments and roster. Workshops bound to the event and issued QR ledger entries are left in place.",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_event(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_event_manage(&txn, &auth_user, id).await?;
    let _event = find_event_for_update(&txn, id).await?;

    event_administrator::Entity::delete_many()
        .filter(event_administrator::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event_supervisor::Entity::delete_many()
        .filter(event_supervisor::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event_participant::Entity::delete_many()
        .filter(event_participant::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/supervisors",
    tag = "Events",
    operation_id = "addEventSupervisor",
    summary = "Assign a supervisor to an event",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = AddEventSupervisorRequest,
    responses(
        (status = 204, description = "Supervisor assigned"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event or supervisor not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Supervisor already assigned (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(event_id))]
pub async fn add_event_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    AppJson(payload): AppJson<AddEventSupervisorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_event_manage(&txn, &auth_user, event_id).await?;
    find_event_for_update(&txn, event_id).await?;

    supervisor::Entity::find_by_id(payload.supervisor_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Supervisor not found".into()))?;

    if event_supervisor::Entity::find_by_id((event_id, payload.supervisor_id))
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Supervisor is already assigned to this event".into(),
        ));
    }

    event_supervisor::ActiveModel {
        event_id: Set(event_id),
        supervisor_id: Set(payload.supervisor_id),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/workshops",
    tag = "Events",
    operation_id = "linkWorkshop",
    summary = "Bind a workshop to an event",
    description = "Binds a workshop to the event. The binding is one-time: a workshop already bound to any event is rejected with 409. The workshop's dates must fall within the event's.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = LinkWorkshopRequest,
    responses(
        (status = 204, description = "Workshop bound"),
        (status = 400, description = "Workshop dates outside event dates (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event or workshop not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Workshop already bound to an event (CONFLICT)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(event_id))]
pub async fn link_workshop(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    AppJson(payload): AppJson<LinkWorkshopRequest>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    check_event_manage(&txn, &auth_user, event_id).await?;
    let event = find_event_for_update(&txn, event_id).await?;

    let workshop =
        crate::utils::workshop::find_workshop_for_update(&txn, payload.workshop_id).await?;

    if workshop.event_id.is_some() {
        return Err(AppError::Conflict(
            "Workshop is already bound to an event".into(),
        ));
    }
    if workshop.start_at < event.start_at || workshop.end_at > event.end_at {
        return Err(AppError::Validation(
            "Workshop dates must fall within the event dates".into(),
        ));
    }

    let mut active: workshop::ActiveModel = workshop.into();
    active.event_id = Set(Some(event_id));
    active.updated_at = Set(chrono::Utc::now());
    active.update(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/{id}/participants",
    tag = "Events",
    operation_id = "listEventParticipants",
    summary = "List the event roster",
    description = "Returns the enrolled participants with their attendance flags. Available to the event's managers and assigned supervisors.",
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event roster", body = RosterResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(event_id))]
pub async fn list_event_participants(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<Json<RosterResponse>, AppError> {
    find_event(&state.db, event_id).await?;
    check_event_checkin(&state.db, &auth_user, event_id).await?;

    let rows = event_participant::Entity::find()
        .filter(event_participant::Column::EventId.eq(event_id))
        .find_also_related(participant::Entity)
        .order_by_asc(event_participant::Column::RegisteredAt)
        .all(&state.db)
        .await?;

    let data = rows
        .into_iter()
        .filter_map(|(row, p)| {
            p.map(|p| RosterEntry {
                participant_id: p.id,
                name: p.name,
                last_name: p.last_name,
                email: p.email,
                attended: row.attended,
                registered_at: row.registered_at,
            })
        })
        .collect();

    Ok(Json(RosterResponse { data }))
}

#[utoipa::path(
    post,
    path = "/{id}/enrollments",
    tag = "Enrollment",
    operation_id = "enrollInEvent",
    summary = "Enroll a participant in an event",
    description = "Adds a participant to the event roster and issues a folio plus QR image. Authenticated participants enroll themselves with an empty body. Walk-up registrations instead carry an email: it is matched to an existing participant account, or a new account is created on the spot with a generated password. Enrolling twice returns 409.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = EnrollEventRequest,
    responses(
        (status = 201, description = "Enrolled", body = EventEnrollmentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid token (TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Already enrolled (CONFLICT), or the email belongs to a staff account (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security((), ("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(event_id))]
pub async fn enroll_in_event(
    auth_user: Option<AuthUser>,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    AppJson(payload): AppJson<EnrollEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_enroll_event(&payload)?;

    let txn = state.db.begin().await?;
    let event = find_event_for_update(&txn, event_id).await?;

    let enrollee = resolve_enrollee(&txn, auth_user.as_ref(), &payload).await?;
    let enrollment = enroll_participant(&txn, &event, enrollee.id).await?;
    txn.commit().await?;

    state
        .mailer
        .send_enrollment_confirmation(&enrollee.email, &event.name, &enrollment.folio);

    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// Find the participant to enroll: the authenticated caller, or for walk-up
/// registrations the account matching the submitted email, created on the
/// fly when none exists yet.
async fn resolve_enrollee(
    txn: &DatabaseTransaction,
    auth_user: Option<&AuthUser>,
    payload: &EnrollEventRequest,
) -> Result<participant::Model, AppError> {
    let Some(email) = payload.email.as_deref() else {
        let auth_user = auth_user.ok_or(AppError::TokenMissing)?;
        auth_user.require_role(Role::Participant)?;
        return participant::Entity::find_by_id(auth_user.user_id)
            .one(txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Participant not found".into()));
    };

    let email = email.trim().to_lowercase();
    match identity::find_by_email(txn, &email).await? {
        Some(UserRecord::Participant(m)) => Ok(m),
        // Staff accounts never double as participants.
        Some(_) => Err(AppError::EmailTaken),
        None => {
            let name = payload.name.as_deref().ok_or_else(|| {
                AppError::Validation("Name is required for a new registration".into())
            })?;
            let last_name = payload.last_name.as_deref().ok_or_else(|| {
                AppError::Validation("Last name is required for a new registration".into())
            })?;
            let raw_password = match payload.password.clone() {
                Some(p) => p,
                None => password::generate_password(16),
            };
            let hashed = hash::hash_password(&raw_password)?;

            participant::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(name.trim().to_string()),
                last_name: Set(last_name.trim().to_string()),
                email: Set(email),
                password: Set(hashed),
                gender: Set(payload.gender.clone()),
                birthday: Set(payload.birthday.clone()),
                awareness: Set(payload.awareness.clone()),
                living_state: Set(payload.living_state.clone()),
                profession: Set(payload.profession.clone()),
                workplace: Set(payload.workplace.clone()),
                created_at: Set(chrono::Utc::now()),
            }
            .insert(txn)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
                _ => AppError::from(e),
            })
        }
    }
}

/// Shared enrollment step: roster row plus ledger row plus rendered QR.
/// Callers must hold the event row lock. Fails with 409 when the participant
/// is already on the roster.
pub(crate) async fn enroll_participant(
    txn: &DatabaseTransaction,
    event: &event::Model,
    participant_id: Uuid,
) -> Result<EventEnrollmentResponse, AppError> {
    if event_participant::Entity::find_by_id((event.id, participant_id))
        .one(txn)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(
            "Participant is already enrolled in this event".into(),
        ));
    }

    event_participant::ActiveModel {
        event_id: Set(event.id),
        participant_id: Set(participant_id),
        attended: Set(false),
        registered_at: Set(chrono::Utc::now()),
    }
    .insert(txn)
    .await?;

    let folio = folio::derive(participant_id, event.id);
    let qr_image = qr::render_registration(participant_id, event.id)?;

    qr_code::ActiveModel {
        id: Set(Uuid::new_v4()),
        participant_id: Set(participant_id),
        event_id: Set(event.id),
        folio: Set(folio.clone()),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("Participant is already enrolled in this event".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(EventEnrollmentResponse {
        event_id: event.id,
        folio,
        qr: qr_image,
    })
}

#[utoipa::path(
    delete,
    path = "/{id}/enrollments/{participant_id}",
    tag = "Enrollment",
    operation_id = "cancelEventEnrollment",
    summary = "Cancel an event enrollment",
    description = "Removes the participant from the event roster and cascades: workshop roster rows for workshops bound to this event are removed too, along with the entire QR ledger entry and its nested workshop folios. Participants may cancel their own enrollment; event managers anyone's.",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("participant_id" = Uuid, Path, description = "Participant ID"),
    ),
    responses(
        (status = 204, description = "Enrollment cancelled"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event or enrollment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(event_id, participant_id))]
pub async fn cancel_event_enrollment(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    if auth_user.role == Role::Participant {
        if auth_user.user_id != participant_id {
            return Err(AppError::PermissionDenied);
        }
    } else {
        check_event_manage(&txn, &auth_user, event_id).await?;
    }

    find_event_for_update(&txn, event_id).await?;

    let roster_row = event_participant::Entity::find_by_id((event_id, participant_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    // Drop the participant from every workshop bound to this event.
    let workshop_ids: Vec<Uuid> = workshop::Entity::find()
        .filter(workshop::Column::EventId.eq(event_id))
        .select_only()
        .column(workshop::Column::Id)
        .into_tuple()
        .all(&txn)
        .await?;
    if !workshop_ids.is_empty() {
        workshop_participant::Entity::delete_many()
            .filter(workshop_participant::Column::WorkshopId.is_in(workshop_ids))
            .filter(workshop_participant::Column::ParticipantId.eq(participant_id))
            .exec(&txn)
            .await?;
    }

    // Tear down the QR ledger entry with its nested workshop folios.
    if let Some(ledger) = qr_code::Entity::find()
        .filter(qr_code::Column::ParticipantId.eq(participant_id))
        .filter(qr_code::Column::EventId.eq(event_id))
        .one(&txn)
        .await?
    {
        qr_workshop::Entity::delete_many()
            .filter(qr_workshop::Column::QrCodeId.eq(ledger.id))
            .exec(&txn)
            .await?;
        qr_code::Entity::delete_by_id(ledger.id).exec(&txn).await?;
    }

    let active: event_participant::ActiveModel = roster_row.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/{id}/attendance",
    tag = "Attendance",
    operation_id = "markEventAttendance",
    summary = "Mark event attendance by scanned folio",
    description = "Resolves a scanned folio against this event's ledger and flips the roster row's attendance flag. Scanning the same folio again succeeds and leaves the flag set.",
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Attendance marked", body = AttendanceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event, folio or enrollment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(event_id))]
pub async fn mark_event_attendance(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    AppJson(payload): AppJson<AttendanceRequest>,
) -> Result<Json<AttendanceResponse>, AppError> {
    validate_attendance_request(&payload)?;

    let txn = state.db.begin().await?;
    let event = find_event_for_update(&txn, event_id).await?;
    check_event_checkin(&txn, &auth_user, event_id).await?;

    let ledger = qr_code::Entity::find()
        .filter(qr_code::Column::EventId.eq(event_id))
        .filter(qr_code::Column::Folio.eq(payload.folio.trim()))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Folio not found for this event".into()))?;

    let roster_row = event_participant::Entity::find_by_id((event_id, ledger.participant_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    let participant_id = roster_row.participant_id;
    let mut active: event_participant::ActiveModel = roster_row.into();
    active.attended = Set(true);
    active.update(&txn).await?;

    let p = participant::Entity::find_by_id(participant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;
    txn.commit().await?;

    Ok(Json(AttendanceResponse {
        participant_id,
        name: p.name,
        last_name: p.last_name,
        event_name: event.name,
        attended: true,
        marked_at: chrono::Utc::now(),
    }))
}

#[utoipa::path(
    post,
    path = "/{id}/participants/{participant_id}/attendance",
    tag = "Attendance",
    operation_id = "markParticipantAttendance",
    summary = "Mark event attendance by participant id",
    description = "Flips the roster row's attendance flag without a folio scan, for manual check-in. Marking twice is a harmless no-op.",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("participant_id" = Uuid, Path, description = "Participant ID"),
    ),
    responses(
        (status = 200, description = "Attendance marked", body = AttendanceResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Event or enrollment not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(event_id, participant_id))]
pub async fn mark_participant_attendance(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((event_id, participant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<AttendanceResponse>, AppError> {
    let txn = state.db.begin().await?;
    let event = find_event_for_update(&txn, event_id).await?;
    check_event_checkin(&txn, &auth_user, event_id).await?;

    let roster_row = event_participant::Entity::find_by_id((event_id, participant_id))
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Enrollment not found".into()))?;

    let mut active: event_participant::ActiveModel = roster_row.into();
    active.attended = Set(true);
    active.update(&txn).await?;

    let p = participant::Entity::find_by_id(participant_id)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;
    txn.commit().await?;

    Ok(Json(AttendanceResponse {
        participant_id,
        name: p.name,
        last_name: p.last_name,
        event_name: event.name,
        attended: true,
        marked_at: chrono::Utc::now(),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}/folios/{folio}",
    tag = "Attendance",
    operation_id = "lookupEventFolio",
    summary = "Resolve a folio to its participant",
    description = "Looks a folio up in this event's ledger without touching attendance. For door staff confirming identity before scanning.",
    params(
        ("id" = Uuid, Path, description = "Event ID"),
        ("folio" = String, Path, description = "Registration folio"),
    ),
    responses(
        (status = 200, description = "Folio resolved", body = FolioLookupResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Folio not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(event_id, folio))]
pub async fn lookup_event_folio(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path((event_id, folio)): Path<(Uuid, String)>,
) -> Result<Json<FolioLookupResponse>, AppError> {
    find_event(&state.db, event_id).await?;
    check_event_checkin(&state.db, &auth_user, event_id).await?;

    let ledger = qr_code::Entity::find()
        .filter(qr_code::Column::EventId.eq(event_id))
        .filter(qr_code::Column::Folio.eq(folio.trim()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Folio not found for this event".into()))?;

    let p = participant::Entity::find_by_id(ledger.participant_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant not found".into()))?;

    Ok(Json(FolioLookupResponse {
        participant_id: p.id,
        name: p.name,
        last_name: p.last_name,
        email: p.email,
        event_id,
        folio: ledger.folio,
    }))
}
