use async_trait::async_trait;
use log::info;
use thiserror::Error;

use crate::modules::utils::logging::format_sensitive;

/// A plain-text message ready for out-of-band delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Errors surfaced while handing a message to the delivery channel
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("invalid message: {0}")]
    InvalidMessage(String),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivery channel for outbound notifications
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError>;
}

/// Stand-in dispatcher used when no SMTP settings are configured
pub struct LogDispatcher;

#[async_trait]
impl NotificationDispatcher for LogDispatcher {
    async fn dispatch(&self, notification: Notification) -> Result<(), DispatchError> {
        // The body is never logged; it carries the confirmation token
        info!(
            "SMTP is not configured; notification \"{}\" for {} was not delivered",
            notification.subject,
            format_sensitive(&notification.to),
        );
        Ok(())
    }
}
