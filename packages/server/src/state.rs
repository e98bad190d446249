use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::utils::mail::Mailer;
use crate::utils::recovery::RecoveryCodes;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub mailer: Mailer,
    pub recovery_codes: Arc<RecoveryCodes>,
}
