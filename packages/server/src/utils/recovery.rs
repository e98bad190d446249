use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// In-memory store of outstanding password recovery codes, keyed by email.
/// Codes are single-use and expire after fifteen minutes. Process restarts
/// drop pending codes, which is acceptable for this flow.
#[derive(Default)]
pub struct RecoveryCodes {
    codes: DashMap<String, (String, DateTime<Utc>)>,
}

const CODE_TTL_MINUTES: i64 = 15;

impl RecoveryCodes {
    pub fn issue(&self, email: &str, code: String) {
        let expires = Utc::now() + Duration::minutes(CODE_TTL_MINUTES);
        self.codes.insert(email.to_owned(), (code, expires));
    }

    /// Consume a code. Returns true only if the code matches and has not
    /// expired; the entry is removed either way once presented.
    pub fn consume(&self, email: &str, code: &str) -> bool {
        match self.codes.remove(email) {
            Some((_, (stored, expires))) => stored == code && Utc::now() < expires,
            None => false,
        }
    }
}
