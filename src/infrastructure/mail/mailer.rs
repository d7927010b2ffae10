use std::fmt;

use async_trait::async_trait;
use derive_more::Display;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::settings::AppConfig;

const IMPLICIT_TLS_PORT: u16 = 465;

/// A rendered notification, independent of the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    /// Display name shown next to the configured sender address.
    pub from_name: String,
    pub reply_to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Mail transport is not configured")]
    NotConfigured,

    #[display("Invalid mail address: {_0}")]
    InvalidAddress(String),

    #[display("Failed to build message: {_0}")]
    Build(String),

    #[display("SMTP delivery failed: {_0}")]
    Transport(String),
}

impl std::error::Error for MailError {}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError>;
}

/// Delivers mail through an authenticated SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: String,
    recipient: Mailbox,
}

impl SmtpMailer {
    /// Returns `Ok(None)` when no SMTP account is configured.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, MailError> {
        let (Some(user), Some(pass)) = (config.email_user.as_deref(), config.email_pass.as_deref()) else {
            return Ok(None);
        };
        if user.trim().is_empty() || pass.is_empty() {
            return Ok(None);
        }

        let recipient = config
            .notification_recipient()
            .ok_or(MailError::NotConfigured)?
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        let credentials = Credentials::new(user.trim().to_string(), pass.to_string());

        let builder = if config.email_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.email_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.email_host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        let transport = builder
            .port(config.email_port)
            .credentials(credentials)
            .build();

        Ok(Some(SmtpMailer {
            transport,
            sender: user.trim().to_string(),
            recipient,
        }))
    }

    fn build_message(&self, mail: &OutgoingMail) -> Result<Message, MailError> {
        let from = Mailbox::new(
            Some(mail.from_name.clone()),
            self.sender
                .parse()
                .map_err(|e: lettre::address::AddressError| MailError::InvalidAddress(e.to_string()))?,
        );
        let reply_to = mail
            .reply_to
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(e.to_string()))?;

        Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(self.recipient.clone())
            .subject(mail.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html_body.clone()),
                    ),
            )
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("sender", &self.sender)
            .field("recipient", &self.recipient.to_string())
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Stand-in used when SMTP is not configured; every send fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, _mail: &OutgoingMail) -> Result<(), MailError> {
        Err(MailError::NotConfigured)
    }
}
