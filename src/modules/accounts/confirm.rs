use std::sync::Arc;

use log::{debug, info, warn};
use thiserror::Error;

use super::model::{Account, AccountStatus};
use super::password::{EncodingError, PasswordHasher};
use super::store::{AccountStore, StorageError};
use crate::modules::utils::logging::{format_sensitive, log_account_event};
use crate::modules::utils::time::get_current_timestamp;

/// Probe result for a confirmation token
#[derive(Debug)]
pub enum TokenLookup {
    /// The token belongs to an account still awaiting confirmation
    Valid(Account),
    /// The token matches nothing usable; callers get no further detail
    Invalid,
}

/// Custom result type for confirmation flow control
#[derive(Debug)]
pub enum ConfirmationOutcome {
    /// The account is now active and its password set
    Confirmed { email: String, message: String },
    /// The token matches no account
    InvalidToken { message: String },
    /// The token's account was already confirmed; nothing was changed
    AlreadyConfirmed { message: String },
}

/// Errors that abort a confirmation attempt
#[derive(Debug, Error)]
pub enum ConfirmationError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Password(#[from] EncodingError),
}

// Both failure outcomes share one caller-facing message, so responses do
// not reveal whether a guessed token ever existed
const INVALID_LINK_MESSAGE: &str = "Oops!  This is an invalid confirmation link.";

/// Orchestrates token validation, account activation and password setup
pub struct ConfirmationService {
    store: Arc<dyn AccountStore>,
    hasher: PasswordHasher,
}

impl ConfirmationService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: PasswordHasher) -> Self {
        ConfirmationService { store, hasher }
    }

    /// Function to probe a confirmation token without mutating anything
    pub async fn lookup_token(&self, token: &str) -> Result<TokenLookup, StorageError> {
        match self.store.find_by_token(token).await? {
            Some(account) if !account.status.is_active() => {
                debug!(
                    "Token probe for {} is valid",
                    format_sensitive(&account.email)
                );
                Ok(TokenLookup::Valid(account))
            }
            Some(account) => {
                // Consumed tokens stay on record, so a replayed link is
                // distinguishable from a guessed one in the logs
                info!(
                    "Token probe for {} refers to an already confirmed account",
                    format_sensitive(&account.email)
                );
                Ok(TokenLookup::Invalid)
            }
            None => {
                info!("Token probe does not match any account");
                Ok(TokenLookup::Invalid)
            }
        }
    }

    /// Function to confirm an account and set its password
    pub async fn confirm(
        &self,
        token: &str,
        password: &str,
    ) -> Result<ConfirmationOutcome, ConfirmationError> {
        let mut account = match self.store.find_by_token(token).await? {
            Some(account) => account,
            None => {
                // An unknown token is an expected outcome, never a crash
                warn!("Confirmation attempted with a token that matches no account");
                return Ok(ConfirmationOutcome::InvalidToken {
                    message: INVALID_LINK_MESSAGE.to_string(),
                });
            }
        };

        if account.status.is_active() {
            log_account_event("confirm", &account.email, false, Some("token already consumed"));
            return Ok(ConfirmationOutcome::AlreadyConfirmed {
                message: INVALID_LINK_MESSAGE.to_string(),
            });
        }

        // Activate the account; the token stays on record as consumed
        account.password_hash = Some(self.hasher.hash(password)?);
        account.status = AccountStatus::Active;
        account.confirmed_at = Some(get_current_timestamp());

        match self.store.save(account).await {
            Ok(saved) => {
                log_account_event("confirm", &saved.email, true, Some("account activated"));
                Ok(ConfirmationOutcome::Confirmed {
                    email: saved.email,
                    message: "Your password has been set!".to_string(),
                })
            }
            Err(StorageError::VersionConflict(_)) => {
                // A concurrent confirmation won the race; report a replay
                Ok(ConfirmationOutcome::AlreadyConfirmed {
                    message: INVALID_LINK_MESSAGE.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
