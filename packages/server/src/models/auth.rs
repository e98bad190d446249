use serde::{Deserialize, Serialize};

use super::shared::{validate_email, validate_name, validate_password};
use super::user::UserResponse;
use crate::error::AppError;

/// Request body for participant self-registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Ana")]
    pub name: String,
    #[schema(example = "Lopez")]
    pub last_name: String,
    /// Must be unique across ALL account types, not just participants.
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    #[serde(default)]
    pub gender: String,
    pub birthday: Option<String>,
    /// How the participant heard about the event.
    #[serde(default)]
    pub awareness: String,
    #[serde(default)]
    pub living_state: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub workplace: String,
}

pub fn validate_register_request(payload: &RegisterRequest) -> Result<(), AppError> {
    validate_name(&payload.name, "Name")?;
    validate_name(&payload.last_name, "Last name")?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    Ok(())
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 2 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub user: UserResponse,
}

/// Request body for starting password recovery.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RecoveryRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
}

/// Request body for completing password recovery with an emailed code.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RecoveryConfirmRequest {
    #[schema(example = "ana@example.com")]
    pub email: String,
    #[schema(example = "493021")]
    pub code: String,
    pub new_password: String,
}

pub fn validate_recovery_confirm(payload: &RecoveryConfirmRequest) -> Result<(), AppError> {
    validate_email(&payload.email)?;
    if payload.code.trim().is_empty() {
        return Err(AppError::Validation("Code must not be empty".into()));
    }
    validate_password(&payload.new_password)?;
    Ok(())
}
