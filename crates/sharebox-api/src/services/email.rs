//! Mail transport: the SMTP client behind share notifications.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use sharebox_core::config::SmtpConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address '{address}': {reason}")]
    Address { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(String),

    #[error("Mail transport not configured (SMTP_HOST is not set)")]
    NotConfigured,
}

/// A rendered message, addresses exactly as the caller supplied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.trim().parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Build a multipart/alternative message (plain text + HTML).
pub fn build_message(mail: &OutgoingMail) -> Result<Message, MailError> {
    Message::builder()
        .from(parse_mailbox(&mail.from)?)
        .to(parse_mailbox(&mail.to)?)
        .subject(mail.subject.as_str())
        .multipart(MultiPart::alternative_plain_html(
            mail.text.clone(),
            mail.html.clone(),
        ))
        .map_err(|e| MailError::Build(e.to_string()))
}

/// SMTP transport over lettre, shared for the life of the process.
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Create the transport from config. Returns `None` when SMTP is not configured.
    pub fn from_config(smtp: &SmtpConfig) -> Result<Option<Self>, MailError> {
        let Some(host) = smtp.host.as_deref() else {
            return Ok(None);
        };

        let builder = if smtp.tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        let builder = builder.port(smtp.port);
        let builder = if let (Some(user), Some(password)) = (&smtp.user, &smtp.password) {
            builder.credentials(Credentials::new(user.clone(), password.clone()))
        } else {
            builder
        };

        tracing::info!(
            host = %host,
            port = smtp.port,
            starttls = smtp.tls,
            authenticated = smtp.user.is_some(),
            "Mail transport initialized (SMTP)"
        );

        Ok(Some(Self {
            mailer: builder.build(),
        }))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        let start = std::time::Instant::now();

        let response = self
            .mailer
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(
            code = %response.code(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Share email accepted by SMTP relay"
        );
        Ok(())
    }
}

/// Stand-in used when SMTP is not configured: every send fails at call time.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnconfiguredMailTransport;

#[async_trait]
impl MailTransport for UnconfiguredMailTransport {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(from: &str, to: &str) -> OutgoingMail {
        OutgoingMail {
            from: from.to_string(),
            to: to.to_string(),
            subject: "File shared with you".to_string(),
            text: format!("{} shared a file with you", from),
            html: "<p>hello</p>".to_string(),
        }
    }

    #[test]
    fn message_carries_both_bodies() {
        let message = build_message(&mail("a@x.com", "b@x.com")).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("Subject: File shared with you"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("a@x.com shared a file with you"));
        assert!(raw.contains("<p>hello</p>"));
    }

    #[test]
    fn unparseable_addresses_fail_at_send_time() {
        let err = build_message(&mail("not an address", "b@x.com")).unwrap_err();
        assert!(matches!(err, MailError::Address { ref address, .. } if address == "not an address"));
    }

    #[test]
    fn missing_host_means_no_smtp_transport() {
        let transport = SmtpMailTransport::from_config(&SmtpConfig::default()).unwrap();
        assert!(transport.is_none());
    }

    #[tokio::test]
    async fn smtp_transport_builds_without_connecting() {
        let config = SmtpConfig {
            host: Some("smtp.example.com".to_string()),
            port: 2525,
            user: Some("mailer".to_string()),
            password: Some("secret".to_string()),
            tls: false,
        };
        assert!(SmtpMailTransport::from_config(&config).unwrap().is_some());
    }

    #[tokio::test]
    async fn unconfigured_transport_always_fails() {
        let result = UnconfiguredMailTransport.send(&mail("a@x.com", "b@x.com")).await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }
}
