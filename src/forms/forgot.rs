//! Password recovery form

use crate::utils::errors::FormError;
use super::is_valid_email;

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if is_valid_email(self.email.trim()) {
            Ok(())
        } else {
            Err(FormError::InvalidEmail)
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }
}
