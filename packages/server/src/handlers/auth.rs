use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::participant;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    LoginRequest, LoginResponse, RecoveryConfirmRequest, RecoveryRequest, RegisterRequest,
    validate_login_request, validate_recovery_confirm, validate_register_request,
};
use crate::models::user::UserResponse;
use crate::state::AppState;
use crate::utils::{hash, identity, jwt, password};

#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    operation_id = "register",
    summary = "Register a new participant account",
    description = "Creates a participant account. The email must be free across every account type, not only participants.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already in use (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_register_request(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let txn = state.db.begin().await?;
    identity::ensure_email_free(&txn, &email).await?;

    let hashed = hash::hash_password(&payload.password)?;
    let new_participant = participant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        email: Set(email),
        password: Set(hashed),
        gender: Set(payload.gender),
        birthday: Set(payload.birthday),
        awareness: Set(payload.awareness),
        living_state: Set(payload.living_state),
        profession: Set(payload.profession),
        workplace: Set(payload.workplace),
        created_at: Set(chrono::Utc::now()),
    };

    let model = new_participant
        .insert(&txn)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Registration race: unique constraint caught on insert");
                AppError::EmailTaken
            }
            _ => AppError::from(e),
        })?;
    txn.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from(identity::UserRecord::Participant(model))),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in with email and password",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim().to_lowercase();

    let record = identity::find_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, record.password())?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        &state.config.auth.jwt_secret,
        record.id(),
        record.email(),
        record.role().as_str(),
    )
    .map_err(|e| AppError::Internal(format!("Token signing error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse::from(record),
    }))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Get the authenticated user's profile",
    responses(
        (status = 200, description = "Current profile", body = UserResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AppError> {
    let record = identity::find_by_id(&state.db, auth_user.role, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(Json(UserResponse::from(record)))
}

#[utoipa::path(
    post,
    path = "/recovery",
    tag = "Auth",
    operation_id = "startPasswordRecovery",
    summary = "Start password recovery",
    description = "Emails a single-use recovery code to the account, if one exists. Always returns 204 so the endpoint cannot be used to probe for registered emails.",
    request_body = RecoveryRequest,
    responses(
        (status = 204, description = "Recovery code sent if the account exists"),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn start_recovery(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RecoveryRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim().to_lowercase();

    if identity::find_by_email(&state.db, &email).await?.is_some() {
        let code = password::generate_recovery_code();
        state.recovery_codes.issue(&email, code.clone());
        state.mailer.send_recovery_code(&email, &code);
    }

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/recovery/confirm",
    tag = "Auth",
    operation_id = "confirmPasswordRecovery",
    summary = "Complete password recovery with an emailed code",
    request_body = RecoveryConfirmRequest,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad or expired code (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn confirm_recovery(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RecoveryConfirmRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_recovery_confirm(&payload)?;

    let email = payload.email.trim().to_lowercase();

    if !state.recovery_codes.consume(&email, payload.code.trim()) {
        return Err(AppError::InvalidCredentials);
    }

    let record = identity::find_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let hashed = hash::hash_password(&payload.new_password)?;
    identity::set_password(&state.db, &record, hashed).await?;

    Ok(StatusCode::NO_CONTENT)
}
