use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{event_supervisor, supervisor, workshop_supervisor};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::supervisor::*;
use crate::state::AppState;
use crate::utils::identity::{self, Role};
use crate::utils::{hash, password};

#[utoipa::path(
    post,
    path = "/",
    tag = "Supervisors",
    operation_id = "createSupervisor",
    summary = "Create a check-in supervisor",
    description = "Creates a supervisor account owned by the calling event admin. A temporary password is generated and emailed to the new account.",
    request_body = CreateSupervisorRequest,
    responses(
        (status = 201, description = "Supervisor created", body = SupervisorResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Email already in use (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(email = %payload.email))]
pub async fn create_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSupervisorRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(Role::EventAdmin)?;
    validate_create_supervisor(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let txn = state.db.begin().await?;
    identity::ensure_email_free(&txn, &email).await?;

    let temp_password = password::generate_password(12);
    let hashed = hash::hash_password(&temp_password)?;

    let new_supervisor = supervisor::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(email.clone()),
        password: Set(hashed),
        phone: Set(payload.phone),
        active: Set(true),
        administrator_id: Set(auth_user.user_id),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_supervisor
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
            _ => AppError::from(e),
        })?;
    txn.commit().await?;

    state.mailer.send_supervisor_credentials(&email, &temp_password);

    Ok((StatusCode::CREATED, Json(SupervisorResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Supervisors",
    operation_id = "listSupervisors",
    summary = "List supervisors",
    description = "Event admins see the supervisors they own; super admins see all of them.",
    responses(
        (status = 200, description = "List of supervisors", body = SupervisorListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn list_supervisors(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<SupervisorListResponse>, AppError> {
    auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin])?;

    let mut select = supervisor::Entity::find();
    if auth_user.role == Role::EventAdmin {
        select = select.filter(supervisor::Column::AdministratorId.eq(auth_user.user_id));
    }

    let data = select
        .order_by_asc(supervisor::Column::CreatedAt)
        .all(&state.db)
        .await?
        .into_iter()
        .map(SupervisorResponse::from)
        .collect();

    Ok(Json(SupervisorListResponse { data }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Supervisors",
    operation_id = "getSupervisor",
    summary = "Get a supervisor by ID",
    params(("id" = Uuid, Path, description = "Supervisor ID")),
    responses(
        (status = 200, description = "Supervisor detail", body = SupervisorResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Supervisor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SupervisorResponse>, AppError> {
    let model = find_owned_supervisor(&state.db, &auth_user, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Supervisors",
    operation_id = "updateSupervisor",
    summary = "Update a supervisor",
    description = "Partially updates a supervisor using PATCH semantics, including deactivating the account.",
    params(("id" = Uuid, Path, description = "Supervisor ID")),
    request_body = UpdateSupervisorRequest,
    responses(
        (status = 200, description = "Supervisor updated", body = SupervisorResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Supervisor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateSupervisorRequest>,
) -> Result<Json<SupervisorResponse>, AppError> {
    validate_update_supervisor(&payload)?;

    let existing = find_owned_supervisor(&state.db, &auth_user, id).await?;
    let mut active: supervisor::ActiveModel = existing.into();

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref last_name) = payload.last_name {
        active.last_name = Set(last_name.trim().to_string());
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(phone);
    }
    if let Some(is_active) = payload.active {
        active.active = Set(is_active);
    }
    if let Some(ref password) = payload.password {
        active.password = Set(hash::hash_password(password)?);
    }

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Supervisors",
    operation_id = "deleteSupervisor",
    summary = "Delete a supervisor",
    description = "Deletes the supervisor account together with its event and workshop assignments.",
    params(("id" = Uuid, Path, description = "Supervisor ID")),
    responses(
        (status = 204, description = "Supervisor deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Supervisor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_supervisor(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_owned_supervisor(&txn, &auth_user, id).await?;

    event_supervisor::Entity::delete_many()
        .filter(event_supervisor::Column::SupervisorId.eq(id))
        .exec(&txn)
        .await?;
    workshop_supervisor::Entity::delete_many()
        .filter(workshop_supervisor::Column::SupervisorId.eq(id))
        .exec(&txn)
        .await?;
    let active: supervisor::ActiveModel = existing.into();
    active.delete(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Look up a supervisor, enforcing ownership: event admins may only touch
/// the supervisors they created, super admins any of them.
async fn find_owned_supervisor<C: ConnectionTrait>(
    db: &C,
    auth_user: &AuthUser,
    id: Uuid,
) -> Result<supervisor::Model, AppError> {
    auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin])?;

    let model = supervisor::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Supervisor not found".into()))?;

    if auth_user.role == Role::EventAdmin && model.administrator_id != auth_user.user_id {
        return Err(AppError::PermissionDenied);
    }
    Ok(model)
}
