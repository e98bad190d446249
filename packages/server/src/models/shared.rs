use crate::error::AppError;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Validate a trimmed display name (1-128 Unicode characters).
pub fn validate_name(name: &str, field: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 128 {
        return Err(AppError::Validation(format!(
            "{field} must be 1-128 characters"
        )));
    }
    Ok(())
}

/// Minimal email shape check. Uniqueness is enforced separately.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || email.chars().count() > 254 || !email.contains('@') {
        return Err(AppError::Validation("Invalid email address".into()));
    }
    Ok(())
}

/// Validate a password (8-128 bytes).
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::Validation(
            "Password must be 8-128 characters".into(),
        ));
    }
    Ok(())
}
