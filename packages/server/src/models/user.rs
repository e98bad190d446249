use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_email, validate_name, validate_password};
use crate::error::AppError;
use crate::utils::identity::{Role, UserRecord};

/// Role-agnostic account profile. Fields that only exist for some roles are
/// omitted from the JSON when absent.
#[derive(Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub awareness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub living_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workplace: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        match record {
            UserRecord::SuperAdmin(m) => Self {
                id: m.id,
                name: m.name,
                last_name: m.last_name,
                email: m.email,
                role: Role::SuperAdmin,
                phone: Some(m.phone),
                company: Some(m.company),
                gender: None,
                birthday: None,
                awareness: None,
                living_state: None,
                profession: None,
                workplace: None,
                created_at: m.created_at,
            },
            UserRecord::EventAdmin(m) => Self {
                id: m.id,
                name: m.name,
                last_name: m.last_name,
                email: m.email,
                role: Role::EventAdmin,
                phone: Some(m.phone),
                company: Some(m.company),
                gender: None,
                birthday: None,
                awareness: None,
                living_state: None,
                profession: None,
                workplace: None,
                created_at: m.created_at,
            },
            UserRecord::Participant(m) => Self {
                id: m.id,
                name: m.name,
                last_name: m.last_name,
                email: m.email,
                role: Role::Participant,
                phone: None,
                company: None,
                gender: Some(m.gender),
                birthday: m.birthday,
                awareness: Some(m.awareness),
                living_state: Some(m.living_state),
                profession: Some(m.profession),
                workplace: Some(m.workplace),
                created_at: m.created_at,
            },
            UserRecord::Supervisor(m) => Self {
                id: m.id,
                name: m.name,
                last_name: m.last_name,
                email: m.email,
                role: Role::Supervisor,
                phone: Some(m.phone),
                company: None,
                gender: None,
                birthday: None,
                awareness: None,
                living_state: None,
                profession: None,
                workplace: None,
                created_at: m.created_at,
            },
        }
    }
}

/// PATCH body for a user's own profile. Every field optional; absent fields
/// are left untouched. Fields that don't apply to the caller's role are
/// ignored.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<String>,
    pub awareness: Option<String>,
    pub living_state: Option<String>,
    pub profession: Option<String>,
    pub workplace: Option<String>,
}

pub fn validate_update_user(req: &UpdateUserRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Name")?;
    }
    if let Some(ref last_name) = req.last_name {
        validate_name(last_name, "Last name")?;
    }
    if let Some(ref password) = req.password {
        validate_password(password)?;
    }
    Ok(())
}

/// Query for looking a participant up by email.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ParticipantLookupQuery {
    #[param(example = "ana@example.com")]
    pub email: String,
}

/// Request body for creating an event admin account (super admin only).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEventAdminRequest {
    pub name: String,
    pub last_name: String,
    #[schema(example = "carla@example.com")]
    pub email: String,
    pub password: String,
    pub phone: String,
    pub company: String,
}

pub fn validate_create_event_admin(req: &CreateEventAdminRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Name")?;
    validate_name(&req.last_name, "Last name")?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    Ok(())
}
