//! Mail transport
//!
//! The contact endpoint only sees the [`Mailer`] trait; the SMTP
//! implementation builds a fresh transport for every message from the
//! configured credentials.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpConfig;

/// Errors raised while building or sending a mail
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A plain-text mail ready to hand to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
}

/// Something that can deliver an [`OutgoingMail`]
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

/// SMTP delivery to the site owner's own mailbox
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        if self.config.host.is_empty() {
            return Err(MailError::NotConfigured("SMTP_HOST is empty"));
        }

        // Plain connection upgraded with STARTTLS when the server offers it
        let tls = TlsParameters::new(self.config.host.clone())?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
            .port(self.config.port)
            .tls(Tls::Opportunistic(tls))
            .credentials(Credentials::new(
                self.config.user.clone(),
                self.config.pass.clone(),
            ))
            .build();
        Ok(transport)
    }

    fn message(&self, mail: OutgoingMail) -> Result<Message, MailError> {
        if self.config.user.is_empty() {
            return Err(MailError::NotConfigured("SMTP_USER is empty"));
        }
        let owner: Mailbox = self.config.user.parse()?;

        let message = Message::builder()
            .from(owner.clone())
            .to(owner)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;
        Ok(message)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let message = self.message(mail)?;
        let transport = self.transport()?;
        let response = transport.send(message).await?;
        tracing::debug!("SMTP accepted message: {:?}", response.code());
        Ok(())
    }
}
