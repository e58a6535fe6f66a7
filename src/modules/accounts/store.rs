use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::Account;

/// Errors surfaced by account persistence
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("an account with this identity already exists")]
    IdentityExists,
    #[error("confirmation token is already assigned to another account")]
    TokenExists,
    #[error("no stored account with id {0}")]
    UnknownAccount(u64),
    #[error("account {0} was modified concurrently")]
    VersionConflict(u64),
    #[error("account identity cannot be changed")]
    IdentityImmutable,
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Durable storage of accounts, keyed by identity and by confirmation token
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an account by its normalized identity
    async fn find_by_identity(&self, email: &str) -> Result<Option<Account>, StorageError>;

    /// Look up the account holding a confirmation token, live or consumed
    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, StorageError>;

    /// Insert or update an account, enforcing uniqueness and version checks
    ///
    /// An account without an id is inserted and assigned one; an account
    /// with an id replaces the stored record only when its version matches.
    /// The returned copy carries the assigned id and bumped version.
    async fn save(&self, account: Account) -> Result<Account, StorageError>;
}

/// In-memory account table shared by both store implementations
#[derive(Serialize, Deserialize, Clone)]
struct AccountTable {
    accounts: HashMap<u64, Account>,
    next_id: u64,
}

impl AccountTable {
    fn new() -> Self {
        AccountTable {
            accounts: HashMap::new(),
            next_id: 1,
        }
    }

    fn find_by_identity(&self, email: &str) -> Option<Account> {
        self.accounts.values().find(|a| a.email == email).cloned()
    }

    fn find_by_token(&self, token: &str) -> Option<Account> {
        self.accounts
            .values()
            .find(|a| a.confirmation_token.as_deref() == Some(token))
            .cloned()
    }

    /// Upsert with uniqueness and optimistic concurrency checks
    fn apply(&mut self, mut account: Account) -> Result<Account, StorageError> {
        match account.id {
            None => {
                // Insert path: identity and token must be unused
                if self.accounts.values().any(|a| a.email == account.email) {
                    return Err(StorageError::IdentityExists);
                }
                if let Some(token) = account.confirmation_token.as_deref() {
                    if self.token_taken(token, None) {
                        return Err(StorageError::TokenExists);
                    }
                }

                let id = self.next_id;
                self.next_id += 1;
                account.id = Some(id);
                account.version = 1;
                self.accounts.insert(id, account.clone());
                Ok(account)
            }
            Some(id) => {
                let current = match self.accounts.get(&id) {
                    Some(existing) => existing,
                    None => return Err(StorageError::UnknownAccount(id)),
                };

                if current.email != account.email {
                    return Err(StorageError::IdentityImmutable);
                }
                // Stale version means another writer got here first
                if current.version != account.version {
                    return Err(StorageError::VersionConflict(id));
                }
                if let Some(token) = account.confirmation_token.as_deref() {
                    if self.token_taken(token, Some(id)) {
                        return Err(StorageError::TokenExists);
                    }
                }

                account.version += 1;
                self.accounts.insert(id, account.clone());
                Ok(account)
            }
        }
    }

    fn token_taken(&self, token: &str, excluding: Option<u64>) -> bool {
        self.accounts
            .values()
            .any(|a| a.id != excluding && a.confirmation_token.as_deref() == Some(token))
    }
}

/// Volatile store used by tests and ephemeral deployments
pub struct MemoryAccountStore {
    table: RwLock<AccountTable>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        MemoryAccountStore {
            table: RwLock::new(AccountTable::new()),
        }
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_identity(&self, email: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.table.read().await.find_by_identity(email))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.table.read().await.find_by_token(token))
    }

    async fn save(&self, account: Account) -> Result<Account, StorageError> {
        self.table.write().await.apply(account)
    }
}

/// File-backed store persisting the account table as pretty-printed JSON
pub struct JsonFileAccountStore {
    table: RwLock<AccountTable>,
    path: PathBuf,
}

impl JsonFileAccountStore {
    /// Function to open a store file, creating an empty table when the
    /// file does not exist yet
    ///
    /// A file that exists but cannot be parsed is an error: silently
    /// replacing the account book would lose every registered account.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        let table = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => AccountTable::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AccountTable::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(JsonFileAccountStore {
            table: RwLock::new(table),
            path,
        })
    }

    /// Write the table to a sibling temp file, then rename it over the
    /// store file
    async fn persist(&self, table: &AccountTable) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(table)?;

        let mut tmp = self.path.as_os_str().to_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, data).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for JsonFileAccountStore {
    async fn find_by_identity(&self, email: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.table.read().await.find_by_identity(email))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Account>, StorageError> {
        Ok(self.table.read().await.find_by_token(token))
    }

    async fn save(&self, account: Account) -> Result<Account, StorageError> {
        // The write lock is held across the file write so saves serialize
        // fully; the change is staged on a copy and only committed to the
        // shared table once it is on disk
        let mut table = self.table.write().await;

        let mut staged = table.clone();
        let saved = staged.apply(account)?;
        self.persist(&staged).await?;
        *table = staged;

        Ok(saved)
    }
}
