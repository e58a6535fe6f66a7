pub mod confirm;
pub mod model;
pub mod password;
pub mod register;
pub mod store;
pub mod tokens;
pub mod validate;

// Re-export the main types and functions
pub use confirm::{ConfirmationOutcome, ConfirmationService, TokenLookup};
pub use model::{Account, AccountStatus};
pub use password::{EncodingError, PasswordHasher};
pub use register::{RegistrationOutcome, RegistrationService};
pub use store::{AccountStore, JsonFileAccountStore, MemoryAccountStore, StorageError};
pub use tokens::{RandomTokenGenerator, TokenGenerator};
pub use validate::{validate_confirmation, validate_registration, FieldError};
