use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::{validate_email, validate_name, validate_password};
use crate::error::AppError;

/// Request body for enrolling in an event. Authenticated participants send
/// an empty body; walk-up registrations carry an email and are matched to an
/// existing participant account or get one created on the spot.
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct EnrollEventRequest {
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
    pub name: Option<String>,
    pub last_name: Option<String>,
    /// Optional for walk-ups; a random password is generated when absent.
    pub password: Option<String>,
    #[serde(default)]
    pub gender: String,
    pub birthday: Option<String>,
    #[serde(default)]
    pub awareness: String,
    #[serde(default)]
    pub living_state: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default)]
    pub workplace: String,
}

pub fn validate_enroll_event(req: &EnrollEventRequest) -> Result<(), AppError> {
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
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

/// Response for enrolling in an event: the ledger folio plus the rendered
/// QR image as a `data:` URI.
#[derive(Serialize, utoipa::ToSchema)]
pub struct EventEnrollmentResponse {
    pub event_id: Uuid,
    pub folio: String,
    pub qr: String,
}

/// Response for enrolling in a workshop. If the participant was not yet
/// enrolled in the owning event, that enrollment happens implicitly and its
/// folio and QR are returned too.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopEnrollmentResponse {
    pub workshop_id: Uuid,
    pub folio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_enrollment: Option<EventEnrollmentResponse>,
}

/// Request body for marking attendance by scanned folio.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AttendanceRequest {
    #[schema(example = "6d7d845556")]
    pub folio: String,
}

pub fn validate_attendance_request(req: &AttendanceRequest) -> Result<(), AppError> {
    if req.folio.trim().is_empty() {
        return Err(AppError::Validation("Folio must not be empty".into()));
    }
    Ok(())
}

/// Door-scan result for an event folio: who was admitted and to what.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AttendanceResponse {
    pub participant_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub event_name: String,
    pub attended: bool,
    pub marked_at: DateTime<Utc>,
}

/// Door-scan result for a workshop folio.
#[derive(Serialize, utoipa::ToSchema)]
pub struct WorkshopAttendanceResponse {
    pub participant_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub workshop_name: String,
    pub attended: bool,
    pub marked_at: DateTime<Utc>,
}

/// A workshop folio nested under an event ledger entry.
#[derive(Serialize, utoipa::ToSchema)]
pub struct QrWorkshopEntry {
    pub workshop_id: Uuid,
    pub workshop_name: String,
    pub folio: String,
}

/// One entry of a participant's QR ledger: the event-level registration with
/// its re-rendered QR image and any nested workshop folios.
#[derive(Serialize, utoipa::ToSchema)]
pub struct QrLedgerEntry {
    pub event_id: Uuid,
    pub event_name: String,
    pub event_image: String,
    pub folio: String,
    pub qr: String,
    pub workshops: Vec<QrWorkshopEntry>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct QrLedgerResponse {
    pub data: Vec<QrLedgerEntry>,
}

/// Query for a participant searching their own ledger by folio.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct FolioSearchQuery {
    #[param(example = "6d7d845556")]
    pub folio: String,
}

/// A ledger entry found by folio. Event folios carry the re-rendered QR;
/// workshop folios point at the workshop instead.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FolioSearchResponse {
    pub folio: String,
    pub event_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr: Option<String>,
}

/// Response for resolving a folio to its participant at the door.
#[derive(Serialize, utoipa::ToSchema)]
pub struct FolioLookupResponse {
    pub participant_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub event_id: Uuid,
    pub folio: String,
}
