//! Inquiry notification emails.
//!
//! Sends a fixed-template plain-text email for each submitted inquiry to the
//! configured recipient, over an authenticated STARTTLS session. No retries
//! and no queuing; the submit handler decides what to do with a failure.

use std::time::Duration;

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::models::Inquiry;

const NOTIFICATION_SUBJECT: &str = "New Inquiry";

// A stalled relay must not hold a request open indefinitely.
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Invalid mailbox address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

#[derive(Clone)]
pub struct Notifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    recipient: Mailbox,
}

impl Notifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifierError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            transport,
            from: config.username.parse()?,
            recipient: config.recipient.parse()?,
        })
    }

    /// Send exactly one notification email for a persisted inquiry.
    pub async fn send_inquiry_notification(&self, inquiry: &Inquiry) -> Result<(), NotifierError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.recipient.clone())
            .subject(NOTIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(notification_body(inquiry))?;

        self.transport.send(email).await?;

        tracing::info!(
            "Notification for inquiry {} sent to {}",
            inquiry.id,
            self.recipient
        );

        Ok(())
    }
}

pub fn notification_body(inquiry: &Inquiry) -> String {
    format!(
        "New Inquiry Received:\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Organization Name: {}\n\
         Organization Type: {}\n\
         Message:\n\
         {}\n",
        inquiry.name,
        inquiry.email,
        inquiry.phone,
        inquiry.organization,
        inquiry.option,
        inquiry.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_inquiry() -> Inquiry {
        Inquiry {
            id: Uuid::new_v4(),
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            organization: "Acme Clinics".to_string(),
            option: "Hospital".to_string(),
            message: "We would like a demo.".to_string(),
            flag: "new".to_string(),
            date_registered: Utc::now(),
        }
    }

    #[test]
    fn body_interpolates_all_submitted_fields() {
        let inquiry = sample_inquiry();
        let body = notification_body(&inquiry);

        assert!(body.starts_with("New Inquiry Received:"));
        assert!(body.contains("Name: Jane Doe"));
        assert!(body.contains("Email: jane@example.com"));
        assert!(body.contains("Phone: +1 555 0100"));
        assert!(body.contains("Organization Name: Acme Clinics"));
        assert!(body.contains("Organization Type: Hospital"));
        assert!(body.contains("We would like a demo."));
    }

    #[tokio::test]
    async fn notifier_builds_from_valid_config() {
        let config = SmtpConfig {
            host: "smtp.office365.com".to_string(),
            port: 587,
            username: "sender@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "inbox@example.com".to_string(),
        };

        assert!(Notifier::new(&config).is_ok());
    }

    #[tokio::test]
    async fn notifier_rejects_invalid_recipient() {
        let config = SmtpConfig {
            host: "smtp.office365.com".to_string(),
            port: 587,
            username: "sender@example.com".to_string(),
            password: "secret".to_string(),
            recipient: "not a mailbox".to_string(),
        };

        assert!(Notifier::new(&config).is_err());
    }
}
