use serde::Serialize;
use serde_json::{Map, Value};

use crate::MAX_PASSWORD_LENGTH;

/// A single rejected input field with a caller-facing message
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: &str) -> Self {
        FieldError {
            field,
            message: message.to_string(),
        }
    }
}

/// Registration input that passed validation
#[derive(Debug, Clone)]
pub struct ValidRegistration {
    pub email: String,
    pub profile: Map<String, Value>,
}

/// Confirmation input that passed validation
#[derive(Debug, Clone)]
pub struct ValidConfirmation {
    pub token: String,
    pub password: String,
}

/// Helper function to validate email format
fn is_valid_email(email: &str) -> bool {
    // Basic email validation
    email.is_ascii()
        && email.contains('@')
        && email.contains('.')
        && !email.contains(' ')
        && email.chars().filter(|&c| c == '@').count() == 1
        && email.len() >= 5
        && email.len() <= 254
}

/// Function to validate a raw registration payload
///
/// The email field is checked and normalized to trimmed lowercase; every
/// other field is passed through opaquely as profile data.
pub fn validate_registration(
    mut payload: Map<String, Value>,
) -> Result<ValidRegistration, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email = match payload.remove("email") {
        Some(Value::String(raw)) => raw.trim().to_lowercase(),
        Some(_) => {
            errors.push(FieldError::new("email", "email must be a string"));
            String::new()
        }
        None => {
            errors.push(FieldError::new("email", "email is required"));
            String::new()
        }
    };

    if errors.is_empty() && !is_valid_email(&email) {
        errors.push(FieldError::new("email", "email address is not valid"));
    }

    if errors.is_empty() {
        Ok(ValidRegistration {
            email,
            profile: payload,
        })
    } else {
        Err(errors)
    }
}

/// Function to validate a raw confirmation request
pub fn validate_confirmation(
    token: &str,
    password: &str,
) -> Result<ValidConfirmation, Vec<FieldError>> {
    let mut errors = Vec::new();

    let token = token.trim();
    if token.is_empty() {
        errors.push(FieldError::new("token", "confirmation token is required"));
    }

    if password.is_empty() {
        errors.push(FieldError::new("password", "password must not be empty"));
    } else if password.len() > MAX_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            "password exceeds the maximum supported length",
        ));
    }

    if errors.is_empty() {
        Ok(ValidConfirmation {
            token: token.to_string(),
            password: password.to_string(),
        })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload_with_email(email: &str) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("email".to_string(), Value::String(email.to_string()));
        payload
    }

    #[test]
    fn test_email_validation() {
        // Valid emails
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("user.name@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));

        // Invalid emails
        assert!(!is_valid_email("user@example")); // Missing TLD
        assert!(!is_valid_email("user example.com")); // Contains space
        assert!(!is_valid_email("user")); // No @ symbol
        assert!(!is_valid_email("")); // Empty string
        assert!(!is_valid_email("user@@example.com")); // Multiple @ symbols
        assert!(!is_valid_email("ユーザー@example.com")); // Non-ASCII local part
    }

    #[test]
    fn test_registration_email_is_normalized() {
        let valid = validate_registration(payload_with_email("  Alice@Example.COM ")).unwrap();
        assert_eq!(valid.email, "alice@example.com");
    }

    #[test]
    fn test_registration_profile_passes_through() {
        let mut payload = payload_with_email("alice@example.com");
        payload.insert("name".to_string(), Value::String("Alice".to_string()));
        payload.insert("newsletter".to_string(), Value::Bool(true));

        let valid = validate_registration(payload).unwrap();

        // The identity is pulled out, everything else stays
        assert!(valid.profile.get("email").is_none());
        assert_eq!(valid.profile.get("name"), Some(&Value::String("Alice".to_string())));
        assert_eq!(valid.profile.get("newsletter"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_registration_rejects_missing_email() {
        let errors = validate_registration(Map::new()).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "email is required")]);
    }

    #[test]
    fn test_registration_rejects_non_string_email() {
        let mut payload = Map::new();
        payload.insert("email".to_string(), Value::Bool(true));

        let errors = validate_registration(payload).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("email", "email must be a string")]);
    }

    #[test]
    fn test_registration_rejects_malformed_email() {
        let errors = validate_registration(payload_with_email("not-an-address")).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
    }

    #[test]
    fn test_confirmation_accepts_short_passwords() {
        // Password strength is the account holder's choice here; only empty
        // input is refused
        let valid = validate_confirmation("some-token", "S3cret!").unwrap();
        assert_eq!(valid.token, "some-token");
        assert_eq!(valid.password, "S3cret!");
    }

    #[test]
    fn test_confirmation_trims_token() {
        let valid = validate_confirmation("  some-token  ", "S3cret!").unwrap();
        assert_eq!(valid.token, "some-token");
    }

    #[test]
    fn test_confirmation_collects_all_errors() {
        let errors = validate_confirmation("", "").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "token");
        assert_eq!(errors[1].field, "password");
    }

    #[test]
    fn test_confirmation_rejects_oversized_password() {
        let long_password = "x".repeat(MAX_PASSWORD_LENGTH + 1);
        let errors = validate_confirmation("some-token", &long_password).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "password");
    }
}
