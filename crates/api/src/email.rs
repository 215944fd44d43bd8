//! Magic-link email delivery via SMTP.
//!
//! [`Mailer`] wraps the `lettre` async SMTP transport. Configuration is
//! loaded from environment variables; if `SMTP_HOST` is not set,
//! [`EmailConfig::from_env`] returns `None` and no mailer is constructed --
//! sends are then logged and skipped, which keeps local development and
//! tests free of SMTP dependencies.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(String),
}

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender address when `SMTP_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "noreply@slimpathai.com";

/// Configuration for the SMTP mailer.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    /// RFC 5322 "From" address.
    pub from_address: String,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMTP_HOST` is not set, signalling that email
    /// delivery is not configured and should be skipped.
    ///
    /// | Variable        | Required | Default                   |
    /// |-----------------|----------|---------------------------|
    /// | `SMTP_HOST`     | yes      | --                         |
    /// | `SMTP_PORT`     | no       | `587`                     |
    /// | `SMTP_FROM`     | no       | `noreply@slimpathai.com`  |
    /// | `SMTP_USER`     | no       | --                         |
    /// | `SMTP_PASSWORD` | no       | --                         |
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;
        Some(Self {
            smtp_host,
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_SMTP_PORT),
            from_address: std::env::var("SMTP_FROM")
                .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
            smtp_user: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASSWORD").ok(),
        })
    }
}

/// Sends transactional email via SMTP.
pub struct Mailer {
    config: EmailConfig,
}

impl Mailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Send the passwordless sign-in email with the onboarding link.
    pub async fn send_magic_link(&self, to_email: &str, link: &str) -> Result<(), EmailError> {
        let body = format!(
            "Welcome to SlimPath!\n\n\
             Your account is ready. Click the link below to sign in and start \
             your 30-day program:\n\n{link}\n\n\
             This link expires in 24 hours. If you did not purchase SlimPath, \
             you can ignore this email."
        );

        let email = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to_email.parse()?)
            .subject("Your SlimPath sign-in link")
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)?
                .port(self.config.smtp_port);

        if let (Some(user), Some(password)) = (&self.config.smtp_user, &self.config.smtp_password)
        {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        let transport = builder.build();
        transport.send(email).await?;
        Ok(())
    }
}
