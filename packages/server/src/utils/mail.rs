use std::sync::Arc;

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::warn;

use crate::config::MailConfig;

/// Outbound mail sender. Delivery is fire-and-forget: enrollment and
/// recovery flows must not fail because the relay is down, so errors are
/// logged and swallowed.
#[derive(Clone)]
pub struct Mailer {
    transport: Arc<SmtpTransport>,
    from: String,
}

impl Mailer {
    pub fn from_config(config: &MailConfig) -> Result<Self> {
        let mut builder = SmtpTransport::relay(&config.smtp_host)
            .context("Invalid SMTP relay host")?
            .port(config.smtp_port);
        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }
        Ok(Self {
            transport: Arc::new(builder.build()),
            from: config.from.clone(),
        })
    }

    /// Queue an HTML email for background delivery.
    pub fn send(&self, to: &str, subject: &str, html_body: String) {
        let message = Message::builder()
            .from(match self.from.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    warn!(error = %e, "Invalid sender address, dropping email");
                    return;
                }
            })
            .to(match to.parse() {
                Ok(mailbox) => mailbox,
                Err(e) => {
                    warn!(error = %e, to, "Invalid recipient address, dropping email");
                    return;
                }
            })
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body);
        let message = match message {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Failed to build email, dropping it");
                return;
            }
        };

        let transport = self.transport.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = transport.send(&message) {
                warn!(error = %e, "Failed to deliver email");
            }
        });
    }

    pub fn send_recovery_code(&self, to: &str, code: &str) {
        self.send(
            to,
            "Password recovery code",
            format!(
                "<p>Your password recovery code is <strong>{code}</strong>.</p>\
                 <p>It expires in 15 minutes. If you did not request it, ignore this email.</p>"
            ),
        );
    }

    pub fn send_supervisor_credentials(&self, to: &str, password: &str) {
        self.send(
            to,
            "Your check-in staff account",
            format!(
                "<p>An account was created for you to scan registrations at the door.</p>\
                 <p>Sign in with this email address and the temporary password \
                 <strong>{password}</strong>, then change it.</p>"
            ),
        );
    }

    pub fn send_enrollment_confirmation(&self, to: &str, event_name: &str, folio: &str) {
        self.send(
            to,
            &format!("You're registered for {event_name}"),
            format!(
                "<p>Your registration for <strong>{event_name}</strong> is confirmed.</p>\
                 <p>Your folio is <strong>{folio}</strong>. Show your QR code at the entrance.</p>"
            ),
        );
    }
}
