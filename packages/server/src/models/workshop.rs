use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::validate_name;
use crate::entity::workshop;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateWorkshopRequest {
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub image: String,
    /// Maximum roster size. Must be positive.
    #[schema(example = 30)]
    pub limit_quota: i32,
    #[schema(example = "01-09-2026T10:00")]
    pub start_at: String,
    #[schema(example = "01-09-2026T12:00")]
    pub end_at: String,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateWorkshopRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub image: Option<String>,
    pub limit_quota: Option<i32>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct WorkshopListQuery {
    /// Case-insensitive substring match on the workshop name.
    pub name: Option<String>,
    /// Only workshops bound to this event.
    pub event_id: Option<Uuid>,
    /// Only workshops managed by this event admin.
    pub admin_id: Option<Uuid>,
    /// Only workshops this supervisor is assigned to.
    pub supervisor_id: Option<Uuid>,
    /// Only workshops this participant is enrolled in.
    pub participant_id: Option<Uuid>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddWorkshopSupervisorRequest {
    pub supervisor_id: Uuid,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub instructor: String,
    pub image: String,
    pub limit_quota: i32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    /// Event this workshop is bound to, if any. The binding is one-time.
    pub event_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<workshop::Model> for WorkshopResponse {
    fn from(m: workshop::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            instructor: m.instructor,
            image: m.image,
            limit_quota: m.limit_quota,
            start_at: m.start_at,
            end_at: m.end_at,
            event_id: m.event_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopListResponse {
    pub data: Vec<WorkshopResponse>,
}

pub fn validate_create_workshop(req: &CreateWorkshopRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Workshop name")?;
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if req.instructor.trim().is_empty() {
        return Err(AppError::Validation("Instructor must not be empty".into()));
    }
    if req.limit_quota <= 0 {
        return Err(AppError::Validation("limit_quota must be positive".into()));
    }
    Ok(())
}

pub fn validate_update_workshop(req: &UpdateWorkshopRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Workshop name")?;
    }
    if let Some(quota) = req.limit_quota
        && quota <= 0
    {
        return Err(AppError::Validation("limit_quota must be positive".into()));
    }
    Ok(())
}
