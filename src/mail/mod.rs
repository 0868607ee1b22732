//! Outgoing mail.
//!
//! The auth flows only see [`MailDispatcher`]; [`SmtpMailer`] is the
//! production transport.

use async_trait::async_trait;
use mail_send::{mail_builder::MessageBuilder, SmtpClientBuilder};
use tracing::{error, info};

use crate::config::MailConfig;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl OutgoingMail {
    pub fn password_reset(to: &str, link: &str) -> Self {
        let href = link.replace('&', "&amp;");
        Self {
            to: to.to_string(),
            subject: "Password Reset Request".to_string(),
            html_body: format!(
                "<p>Click the link to reset your password:</p><a href=\"{href}\">{href}</a>"
            ),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn dispatch(&self, mail: OutgoingMail) -> Result<(), AppError>;
}

/// Opens one SMTP session per message.
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl MailDispatcher for SmtpMailer {
    async fn dispatch(&self, mail: OutgoingMail) -> Result<(), AppError> {
        let config = &self.config;

        let message = MessageBuilder::new()
            .from((config.from_name.as_str(), config.from_address.as_str()))
            .to(mail.to.as_str())
            .subject(mail.subject.as_str())
            .html_body(mail.html_body.as_str());

        let mut client = SmtpClientBuilder::new(config.smtp_host.as_str(), config.smtp_port)
            .implicit_tls(config.implicit_tls)
            .credentials((config.username.as_str(), config.password.as_str()))
            .connect()
            .await
            .map_err(|e| {
                error!("SMTP connection to {}:{} failed: {}", config.smtp_host, config.smtp_port, e);
                e
            })?;

        client.send(message).await.map_err(|e| {
            error!("SMTP delivery to {} failed: {}", mail.to, e);
            e
        })?;

        info!("Mail \"{}\" sent to {}", mail.subject, mail.to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailError;

    #[test]
    fn test_password_reset_mail_embeds_link() {
        let mail = OutgoingMail::password_reset(
            "coach@example.com",
            "http://localhost:3000/reset-password.html?token=abc&email=coach%40example.com",
        );

        assert_eq!(mail.to, "coach@example.com");
        assert_eq!(mail.subject, "Password Reset Request");
        assert!(mail.html_body.contains("token=abc&amp;email=coach%40example.com"));
        assert!(!mail.html_body.contains("abc&email"));
    }

    #[tokio::test]
    async fn test_unreachable_smtp_server_is_a_dispatch_failure() {
        let mailer = SmtpMailer::new(MailConfig {
            smtp_host: "127.0.0.1".into(),
            smtp_port: 1,
            implicit_tls: false,
            username: String::new(),
            password: String::new(),
            from_name: "Football Management".into(),
            from_address: "no-reply@fms.com".into(),
        });

        let err = mailer
            .dispatch(OutgoingMail::password_reset("coach@example.com", "http://localhost/x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MailError(MailError::DispatchFailed(_))));
        assert_eq!(err.public_message(), "Server error");
    }
}
