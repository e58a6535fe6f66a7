use env_logger::{Builder, WriteStyle};
use log::{info, warn, LevelFilter};

/// Initialize the logging system for console output
pub fn initialize_logging() -> Result<(), Box<dyn std::error::Error>> {
    // Configure the logging system
    Builder::new()
        // Set default log level
        .filter_level(LevelFilter::Info)
        // Let RUST_LOG override the default
        .parse_default_env()
        // Enable timestamps
        .format_timestamp_secs()
        // Enable module path in logs
        .format_module_path(true)
        // Set colored output for console
        .write_style(WriteStyle::Auto)
        .try_init()?;

    info!("Logging system initialized");
    Ok(())
}

/// Helper function to format sensitive data for logging
pub fn format_sensitive(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let prefix: String = chars[..2].iter().collect();
    let suffix: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", prefix, suffix)
}

/// Add structured logging for account lifecycle events
pub fn log_account_event(event_type: &str, identity: &str, success: bool, details: Option<&str>) {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    if success {
        info!(
            "Account event: type={}, identity={}, success=true, timestamp={}, details={:?}",
            event_type,
            format_sensitive(identity),
            timestamp,
            details
        );
    } else {
        warn!(
            "Account event: type={}, identity={}, success=false, timestamp={}, details={:?}",
            event_type,
            format_sensitive(identity),
            timestamp,
            details
        );
    }
}
