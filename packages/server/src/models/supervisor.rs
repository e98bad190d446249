use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_email, validate_name, validate_password};
use crate::entity::supervisor;
use crate::error::AppError;

/// Request body for creating a check-in supervisor. No password field: a
/// temporary one is generated and emailed to the new account.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSupervisorRequest {
    pub name: String,
    pub last_name: String,
    #[schema(example = "door-staff@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateSupervisorRequest {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub active: Option<bool>,
    /// Replaces the temporary emailed password.
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct SupervisorResponse {
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub active: bool,
    /// Event admin this supervisor reports to.
    pub administrator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<supervisor::Model> for SupervisorResponse {
    fn from(m: supervisor::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            last_name: m.last_name,
            email: m.email,
            phone: m.phone,
            active: m.active,
            administrator_id: m.administrator_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct SupervisorListResponse {
    pub data: Vec<SupervisorResponse>,
}

pub fn validate_create_supervisor(req: &CreateSupervisorRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Name")?;
    validate_name(&req.last_name, "Last name")?;
    validate_email(&req.email)?;
    Ok(())
}

pub fn validate_update_supervisor(req: &UpdateSupervisorRequest) -> Result<(), AppError> {
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
