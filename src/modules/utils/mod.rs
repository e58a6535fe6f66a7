pub mod logging;
pub mod time;

// Re-export the main helpers
pub use logging::{format_sensitive, initialize_logging, log_account_event};
pub use time::{format_timestamp, get_current_timestamp};
