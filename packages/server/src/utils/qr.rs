use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::QrCode;
use qrcode::render::svg;
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;

/// Payload baked into every registration QR image.
#[derive(Debug, Serialize)]
struct QrPayload {
    #[serde(rename = "userId")]
    user_id: Uuid,
    #[serde(rename = "eventId")]
    event_id: Uuid,
}

/// Render a registration QR as a base64 `data:` URI of an SVG image. The
/// encoded payload is a JSON object with the participant and event ids, so a
/// scanner app can resolve either side without a folio lookup.
pub fn render_registration(user_id: Uuid, event_id: Uuid) -> Result<String, AppError> {
    let payload = serde_json::to_string(&QrPayload { user_id, event_id })
        .map_err(|e| AppError::Internal(format!("Failed to encode QR payload: {e}")))?;
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| AppError::Internal(format!("Failed to build QR code: {e}")))?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .build();
    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image.as_bytes())
    ))
}
