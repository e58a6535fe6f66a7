// Declare all modules
pub mod accounts;
pub mod config;
pub mod email;
pub mod http;
pub mod utils;
pub mod venues;

// No re-exports here as they're handled in lib.rs
