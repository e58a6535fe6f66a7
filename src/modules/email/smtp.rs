use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::transport::smtp::PoolConfig;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::{Deserialize, Serialize};

use super::message::{DispatchError, Notification, NotificationDispatcher};

/// Structure to hold SMTP settings, loaded from the configuration file
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SmtpSettings {
    // SMTP server hostname (e.g., smtp.gmail.com)
    pub host: String,
    // SMTP server port (typically 587 for TLS)
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    // The email address/username for SMTP authentication
    pub username: String,
    // The password or app-specific password for SMTP
    pub password: String,
    // Sender address placed on outbound messages
    #[serde(default = "default_from_address")]
    pub from: String,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@domain.com".to_string()
}

/// Dispatcher delivering notifications over authenticated SMTP
pub struct SmtpDispatcher {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpDispatcher {
    /// Function to build the SMTP transport from the configured settings
    pub fn new(settings: &SmtpSettings) -> Result<Self, DispatchError> {
        // Configure TLS parameters
        let tls_parameters = TlsParameters::builder(settings.host.clone())
            .build()
            .map_err(|e| {
                DispatchError::Delivery(format!("Failed to build TLS parameters: {}", e))
            })?;

        // Set up SMTP transport with explicit TLS configuration
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)
            .map_err(|e| DispatchError::Delivery(format!("Failed to create SMTP transport: {}", e)))?
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .port(settings.port)
            .tls(Tls::Required(tls_parameters))
            .pool_config(PoolConfig::new().max_size(1))
            .timeout(Some(std::time::Duration::from_secs(10)))
            .build();

        Ok(SmtpDispatcher {
            mailer,
            from: settings.from.clone(),
        })
    }
}

#[async_trait]
impl NotificationDispatcher for SmtpDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        // Create email message
        let email = Message::builder()
            .from(self.from.parse().map_err(|e| {
                DispatchError::InvalidMessage(format!("Invalid from address: {}", e))
            })?)
            .to(notification.to.parse().map_err(|e| {
                DispatchError::InvalidMessage(format!("Invalid to address: {}", e))
            })?)
            .subject(notification.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body)
            .map_err(|e| DispatchError::InvalidMessage(format!("Failed to create email: {}", e)))?;

        // Send the email
        self.mailer
            .send(email)
            .await
            .map_err(|e| DispatchError::Delivery(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> SmtpSettings {
        SmtpSettings {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: "mailer@example.com".to_string(),
            password: "app-password".to_string(),
            from: "noreply@domain.com".to_string(),
        }
    }

    #[test]
    fn test_settings_defaults_apply() {
        let parsed: SmtpSettings = serde_json::from_str(
            r#"{"host": "smtp.example.com", "username": "u", "password": "p"}"#,
        )
        .unwrap();

        assert_eq!(parsed.port, 587);
        assert_eq!(parsed.from, "noreply@domain.com");
    }

    #[tokio::test]
    async fn test_dispatcher_builds_without_network() {
        // Construction spawns the pool's upkeep task, so it needs a running
        // runtime, but it opens no connection to the relay
        assert!(SmtpDispatcher::new(&test_settings()).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_recipient_rejected_before_delivery() {
        let dispatcher = SmtpDispatcher::new(&test_settings()).unwrap();

        let result = dispatcher
            .dispatch(Notification {
                to: "not an address".to_string(),
                subject: "Registration Confirmation".to_string(),
                body: "hello".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DispatchError::InvalidMessage(_))));
    }
}
