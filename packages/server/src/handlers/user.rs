use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{event_admin, participant};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::user::{
    CreateEventAdminRequest, UpdateUserRequest, UserResponse, validate_create_event_admin,
    validate_update_user,
};
use crate::state::AppState;
use crate::utils::identity::{self, Role, UserRecord};
use crate::utils::hash;

#[utoipa::path(
    post,
    path = "/event-admins",
    tag = "Users",
    operation_id = "createEventAdmin",
    summary = "Create an event admin account",
    description = "Creates an event admin. Only super admins may call this. The email must be free across every account type.",
    request_body = CreateEventAdminRequest,
    responses(
        (status = 201, description = "Event admin created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Email already in use (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(email = %payload.email))]
pub async fn create_event_admin(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth_user.require_role(Role::SuperAdmin)?;
    validate_create_event_admin(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let txn = state.db.begin().await?;
    identity::ensure_email_free(&txn, &email).await?;

    let hashed = hash::hash_password(&payload.password)?;
    let new_admin = event_admin::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(email),
        password: Set(hashed),
        phone: Set(payload.phone),
        company: Set(payload.company),
        active: Set(true),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_admin.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from(UserRecord::EventAdmin(model))),
    ))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Users",
    operation_id = "getUser",
    summary = "Get a user profile by ID",
    description = "Admins may fetch anyone; other callers only themselves.",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn get_user(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    if auth_user.user_id != id {
        auth_user.require_any_role(&[Role::SuperAdmin, Role::EventAdmin])?;
    }

    let record = identity::probe_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse::from(record)))
}

#[utoipa::path(
    patch,
    path = "/me",
    tag = "Users",
    operation_id = "updateMe",
    summary = "Update the authenticated user's profile",
    description = "Partially updates the caller's own profile using PATCH semantics. Fields that do not apply to the caller's role are ignored.",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "User not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload))]
pub async fn update_me(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    validate_update_user(&payload)?;

    let record = identity::find_by_id(&state.db, auth_user.role, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    let hashed = match payload.password {
        Some(ref password) => Some(hash::hash_password(password)?),
        None => None,
    };

    let updated = match record {
        UserRecord::SuperAdmin(m) => {
            let mut active: crate::entity::administrator::ActiveModel = m.into();
            if let Some(ref name) = payload.name {
                active.name = Set(name.trim().to_string());
            }
            if let Some(ref last_name) = payload.last_name {
                active.last_name = Set(last_name.trim().to_string());
            }
            if let Some(hashed) = hashed {
                active.password = Set(hashed);
            }
            if let Some(phone) = payload.phone {
                active.phone = Set(phone);
            }
            if let Some(company) = payload.company {
                active.company = Set(company);
            }
            UserRecord::SuperAdmin(active.update(&state.db).await?)
        }
        UserRecord::EventAdmin(m) => {
            let mut active: event_admin::ActiveModel = m.into();
            if let Some(ref name) = payload.name {
                active.name = Set(name.trim().to_string());
            }
            if let Some(ref last_name) = payload.last_name {
                active.last_name = Set(last_name.trim().to_string());
            }
            if let Some(hashed) = hashed {
                active.password = Set(hashed);
            }
            if let Some(phone) = payload.phone {
                active.phone = Set(phone);
            }
            if let Some(company) = payload.company {
                active.company = Set(company);
            }
            UserRecord::EventAdmin(active.update(&state.db).await?)
        }
        UserRecord::Participant(m) => {
            let mut active: participant::ActiveModel = m.into();
            if let Some(ref name) = payload.name {
                active.name = Set(name.trim().to_string());
            }
            if let Some(ref last_name) = payload.last_name {
                active.last_name = Set(last_name.trim().to_string());
            }
            if let Some(hashed) = hashed {
                active.password = Set(hashed);
            }
            if let Some(gender) = payload.gender {
                active.gender = Set(gender);
            }
            if let Some(birthday) = payload.birthday {
                active.birthday = Set(Some(birthday));
            }
            if let Some(awareness) = payload.awareness {
                active.awareness = Set(awareness);
            }
            if let Some(living_state) = payload.living_state {
                active.living_state = Set(living_state);
            }
            if let Some(profession) = payload.profession {
                active.profession = Set(profession);
            }
            if let Some(workplace) = payload.workplace {
                active.workplace = Set(workplace);
            }
            UserRecord::Participant(active.update(&state.db).await?)
        }
        UserRecord::Supervisor(m) => {
            let mut active: crate::entity::supervisor::ActiveModel = m.into();
            if let Some(ref name) = payload.name {
                active.name = Set(name.trim().to_string());
            }
            if let Some(ref last_name) = payload.last_name {
                active.last_name = Set(last_name.trim().to_string());
            }
            if let Some(hashed) = hashed {
                active.password = Set(hashed);
            }
            if let Some(phone) = payload.phone {
                active.phone = Set(phone);
            }
            UserRecord::Supervisor(active.update(&state.db).await?)
        }
    };

    Ok(Json(UserResponse::from(updated)))
}
