use serde::Deserialize;

use super::models::RegistrationRequest;
use crate::session::Role;

/// Sign-up form as submitted by the register screen.
#[derive(Clone, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Guest
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl RegistrationForm {
    pub fn validate(self) -> Result<RegistrationRequest, RegistrationError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();

        if name.is_empty() {
            return Err(RegistrationError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(RegistrationError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(RegistrationError::MissingField("password"));
        }
        if self.password != self.confirm_password {
            return Err(RegistrationError::PasswordMismatch);
        }

        Ok(RegistrationRequest {
            name,
            email,
            password: self.password,
            role: self.role,
        })
    }
}
