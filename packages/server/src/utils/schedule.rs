use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::AppError;

/// Parse a schedule timestamp. Accepts RFC 3339 as well as the legacy
/// day-first forms clients still send (`DD-MM-YYYY`, `DD-MM-YYYYTHH:MM`,
/// `DD-MM-YYYYTHH:MM:SS`). Naive inputs are taken as UTC.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%d-%m-%YT%H:%M:%S", "%d-%m-%YT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%d-%m-%Y") {
        return Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc());
    }
    Err(AppError::Validation(format!("Invalid date: {input}")))
}

/// Whether two inclusive date ranges overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Reject ranges that do not end strictly after they start.
pub fn check_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation(
            "Start date must be earlier than the end date".into(),
        ));
    }
    Ok(())
}
