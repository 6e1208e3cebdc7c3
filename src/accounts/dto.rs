use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::accounts::repo_types::User;
use crate::error::{FieldErrors, MSG_BLANK, MSG_REQUIRED};

/// Login request body. Both fields are optional at the serde level so that a
/// missing field and a blank field produce different validation messages.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginRequest {
    /// Field-presence validation; runs before any credential check.
    pub fn validate(&self) -> Result<(&str, &str), FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = require(&mut errors, "email", self.email.as_deref());
        let password = require(&mut errors, "password", self.password.as_deref());
        match (email, password) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => Err(errors),
        }
    }
}

fn require<'a>(errors: &mut FieldErrors, field: &str, value: Option<&'a str>) -> Option<&'a str> {
    match value {
        None => {
            errors.insert(field.to_string(), vec![MSG_REQUIRED.to_string()]);
            None
        }
        Some(s) if s.trim().is_empty() => {
            errors.insert(field.to_string(), vec![MSG_BLANK.to_string()]);
            None
        }
        Some(s) => Some(s),
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_required() {
        let req = LoginRequest::default();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors["email"], vec![MSG_REQUIRED.to_string()]);
        assert_eq!(errors["password"], vec![MSG_REQUIRED.to_string()]);
    }

    #[test]
    fn blank_fields_may_not_be_blank() {
        let req = LoginRequest {
            email: Some(String::new()),
            password: Some("   ".to_string()),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors["email"], vec![MSG_BLANK.to_string()]);
        assert_eq!(errors["password"], vec![MSG_BLANK.to_string()]);
    }

    #[test]
    fn mixed_missing_and_present() {
        let req = LoginRequest {
            email: Some("me@example.com".to_string()),
            password: None,
        };
        let errors = req.validate().unwrap_err();
        assert!(!errors.contains_key("email"));
        assert_eq!(errors["password"], vec![MSG_REQUIRED.to_string()]);
    }

    #[test]
    fn valid_input_passes_through_raw() {
        let req = LoginRequest {
            email: Some(" Me@EXAMPLE.com ".to_string()),
            password: Some("password".to_string()),
        };
        let (email, password) = req.validate().expect("valid");
        // No normalization here; the authenticator owns that.
        assert_eq!(email, " Me@EXAMPLE.com ");
        assert_eq!(password, "password");
    }
}
