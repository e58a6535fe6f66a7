pub mod message;
pub mod smtp;
pub mod templates;

// Re-export the main types and functions
pub use message::{DispatchError, LogDispatcher, Notification, NotificationDispatcher};
pub use smtp::{SmtpDispatcher, SmtpSettings};
pub use templates::confirmation_email;
