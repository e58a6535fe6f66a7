use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::modules::utils::time::get_current_timestamp;

/// Define account lifecycle status enum
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum AccountStatus {
    Pending,
    Active,
}

impl AccountStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

/// Represents a single account with its confirmation state and profile data
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Account {
    pub id: Option<u64>,               // Assigned by the store on first save
    pub email: String,                 // Normalized identity, unique and immutable
    pub password_hash: Option<String>, // PHC string, present only once Active
    pub status: AccountStatus,
    pub confirmation_token: Option<String>, // Unique across all accounts, live or consumed
    pub profile: Map<String, Value>,        // Remaining registration fields, kept opaque
    pub created_at: u64,
    pub confirmed_at: Option<u64>,
    pub version: u64, // Bumped by the store on every update
}

impl Account {
    /// Function to create a pending account awaiting e-mail confirmation
    pub fn pending(email: String, confirmation_token: String, profile: Map<String, Value>) -> Self {
        Account {
            id: None,
            email,
            password_hash: None,
            status: AccountStatus::Pending,
            confirmation_token: Some(confirmation_token),
            profile,
            created_at: get_current_timestamp(),
            confirmed_at: None,
            version: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_account_shape() {
        let mut profile = Map::new();
        profile.insert("name".to_string(), Value::String("Alice".to_string()));

        let account = Account::pending(
            "alice@example.com".to_string(),
            "token-123".to_string(),
            profile,
        );

        assert_eq!(account.id, None);
        assert_eq!(account.email, "alice@example.com");
        assert_eq!(account.password_hash, None);
        assert_eq!(account.status, AccountStatus::Pending);
        assert_eq!(account.confirmation_token.as_deref(), Some("token-123"));
        assert_eq!(account.profile.get("name"), Some(&Value::String("Alice".to_string())));
        assert!(account.created_at > 0);
        assert_eq!(account.confirmed_at, None);
    }

    #[test]
    fn test_status_helpers() {
        // Test enum variants
        assert!(AccountStatus::Active.is_active());
        assert!(!AccountStatus::Pending.is_active());
    }
}
