// First, declare the modules folder itself
mod modules;

// Re-export everything from modules for easier access
pub use modules::{
    accounts,
    config,
    email,
    http,
    utils,
    venues,
};

// Re-export commonly used types
pub use modules::accounts::confirm::ConfirmationService;
pub use modules::accounts::register::RegistrationService;
pub use modules::accounts::store::{AccountStore, JsonFileAccountStore, MemoryAccountStore};
pub use modules::config::AppConfig;
pub use modules::http::state::{build_router, AppState};
pub use modules::venues::store::VenueStore;

// Constants
pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const VENUES_FILE: &str = "venues.json";
pub const CONFIRMATION_TOKEN_BYTES: usize = 32;
pub const PBKDF2_ROUNDS: u32 = 100_000;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;
