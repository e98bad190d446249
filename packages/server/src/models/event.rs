use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::validate_name;
use crate::entity::event;
use crate::error::AppError;

/// Events must always expose at least this many banner images.
pub const MIN_BANNER_IMAGES: usize = 3;

/// Request body for creating an event. Dates accept RFC 3339 as well as the
/// legacy day-first forms (`DD-MM-YYYY`, optionally with a time part).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateEventRequest {
    pub name: String,
    pub description: String,
    pub main_image: String,
    /// At least three banner image filenames.
    pub banner_images: Vec<String>,
    pub location: String,
    #[schema(example = "01-09-2026T09:00")]
    pub start_at: String,
    #[schema(example = "03-09-2026T18:00")]
    pub end_at: String,
}

#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub main_image: Option<String>,
    pub banner_images: Option<Vec<String>>,
    pub location: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct EventListQuery {
    /// Case-insensitive substring match on the event name.
    pub name: Option<String>,
    /// Only events managed by this event admin.
    pub admin_id: Option<Uuid>,
    /// Only events this supervisor is assigned to.
    pub supervisor_id: Option<Uuid>,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct AddEventSupervisorRequest {
    pub supervisor_id: Uuid,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct LinkWorkshopRequest {
    pub workshop_id: Uuid,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub main_image: String,
    pub banner_images: Vec<String>,
    pub location: String,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<event::Model> for EventResponse {
    fn from(m: event::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            main_image: m.main_image,
            banner_images: m.banner_images.0,
            location: m.location,
            start_at: m.start_at,
            end_at: m.end_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventListResponse {
    pub data: Vec<EventResponse>,
}

/// One row of an event roster.
#[derive(Serialize, utoipa::ToSchema)]
pub struct RosterEntry {
    pub participant_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub attended: bool,
    pub registered_at: DateTime<Utc>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RosterResponse {
    pub data: Vec<RosterEntry>,
}

pub fn validate_banner_images(banners: &[String]) -> Result<(), AppError> {
    if banners.len() < MIN_BANNER_IMAGES {
        return Err(AppError::Validation(format!(
            "At least {MIN_BANNER_IMAGES} banner images are required"
        )));
    }
    if banners.iter().any(|b| b.trim().is_empty()) {
        return Err(AppError::Validation(
            "Banner image names must not be empty".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_event(req: &CreateEventRequest) -> Result<(), AppError> {
    validate_name(&req.name, "Event name")?;
    if req.description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if req.main_image.trim().is_empty() {
        return Err(AppError::Validation("Main image must not be empty".into()));
    }
    validate_banner_images(&req.banner_images)?;
    if req.location.trim().is_empty() {
        return Err(AppError::Validation("Location must not be empty".into()));
    }
    Ok(())
}

pub fn validate_update_event(req: &UpdateEventRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name, "Event name")?;
    }
    if let Some(ref description) = req.description
        && description.trim().is_empty()
    {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    if let Some(ref banners) = req.banner_images {
        validate_banner_images(banners)?;
    }
    Ok(())
}
