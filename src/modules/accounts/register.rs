use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

use super::model::Account;
use super::store::{AccountStore, StorageError};
use super::tokens::TokenGenerator;
use super::validate::ValidRegistration;
use crate::modules::email::message::{DispatchError, NotificationDispatcher};
use crate::modules::email::templates::confirmation_email;
use crate::modules::utils::logging::{format_sensitive, log_account_event};

/// Delivery result for the confirmation notification
#[derive(Debug)]
pub enum NotificationOutcome {
    Sent,
    Failed(DispatchError),
}

/// Custom result type for registration flow control
#[derive(Debug)]
pub enum RegistrationOutcome {
    /// A pending account was created and a confirmation e-mail dispatched
    Pending {
        email: String,
        message: String,
        notification: NotificationOutcome,
    },
    /// The identity is already taken; nothing was changed
    AlreadyRegistered { email: String, message: String },
}

/// Errors that abort a registration attempt
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Orchestrates account creation, token issuance and notification dispatch
pub struct RegistrationService {
    store: Arc<dyn AccountStore>,
    tokens: Arc<dyn TokenGenerator>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    origin: String,
}

impl RegistrationService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        tokens: Arc<dyn TokenGenerator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        origin: String,
    ) -> Self {
        RegistrationService {
            store,
            tokens,
            dispatcher,
            origin,
        }
    }

    /// Function to register a new account and send its confirmation e-mail
    pub async fn register(
        &self,
        input: ValidRegistration,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        debug!(
            "Account registration requested for {}",
            format_sensitive(&input.email)
        );

        // Check if the identity is already taken
        if self.store.find_by_identity(&input.email).await?.is_some() {
            return Ok(self.already_registered(&input.email));
        }

        let token = self.tokens.generate();
        let account = Account::pending(input.email.clone(), token.clone(), input.profile);

        // The store's uniqueness constraint is what actually decides a
        // duplicate; a racing registration surfaces here as IdentityExists
        let saved = match self.store.save(account).await {
            Ok(saved) => saved,
            Err(StorageError::IdentityExists) => {
                return Ok(self.already_registered(&input.email));
            }
            Err(e) => return Err(e.into()),
        };

        log_account_event(
            "register",
            &saved.email,
            true,
            Some("pending account created"),
        );

        // Dispatch strictly after the account is durably stored; a delivery
        // failure is reported in the outcome but never undoes the account
        let notification = match self
            .dispatcher
            .dispatch(confirmation_email(&saved.email, &self.origin, &token))
            .await
        {
            Ok(()) => NotificationOutcome::Sent,
            Err(e) => {
                warn!(
                    "Confirmation e-mail for {} could not be delivered: {}",
                    format_sensitive(&saved.email),
                    e
                );
                NotificationOutcome::Failed(e)
            }
        };

        Ok(RegistrationOutcome::Pending {
            message: format!("A confirmation e-mail has been sent to {}", saved.email),
            email: saved.email,
            notification,
        })
    }

    fn already_registered(&self, email: &str) -> RegistrationOutcome {
        log_account_event(
            "register",
            email,
            false,
            Some("identity already registered"),
        );

        RegistrationOutcome::AlreadyRegistered {
            email: email.to_string(),
            message: "Oops!  There is already a user registered with the email provided."
                .to_string(),
        }
    }
}
