//! Sign-in form

use serde::Deserialize;
use crate::utils::errors::FormError;
use super::is_valid_email;

pub const LOGIN_PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    /// Keep the session across restarts
    #[serde(default)]
    pub remember: bool,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if !is_valid_email(self.email.trim()) {
            return Err(FormError::InvalidEmail);
        }
        if self.password.chars().count() < LOGIN_PASSWORD_MIN {
            return Err(FormError::PasswordTooShort { min: LOGIN_PASSWORD_MIN });
        }
        Ok(())
    }
}
