//! Sign-up form

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use crate::models::{Plan, RegisterPayload};
use crate::utils::errors::FormError;
use super::is_valid_email;
use super::rut::{format_rut, is_valid_rut};

pub const REGISTER_PASSWORD_MIN: usize = 8;
pub const MIN_NAME_LEN: usize = 3;
pub const ADULT_AGE: i32 = 18;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterForm {
    pub full_name: String,
    pub rut: String,
    /// `YYYY-MM-DD`
    pub birth_date: String,
    pub phone: String,
    pub user_name: String,
    pub email: String,
    pub email_confirmation: String,
    pub password: String,
    pub password_confirmation: String,
    pub consent: bool,
    pub plan: Option<Plan>,
}

/// Live password requirements shown under the password field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordChecklist {
    pub min_length: bool,
    pub uppercase: bool,
    pub special: bool,
}

impl PasswordChecklist {
    pub fn of(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= REGISTER_PASSWORD_MIN,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        }
    }

    pub fn is_satisfied(&self) -> bool {
        self.min_length && self.uppercase && self.special
    }
}

/// At least 18 full years old on `today`; unparseable dates are not adult
pub fn is_adult(birth_date: &str, today: NaiveDate) -> bool {
    let Ok(dob) = NaiveDate::parse_from_str(birth_date.trim(), "%Y-%m-%d") else {
        return false;
    };

    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age >= ADULT_AGE
}

/// 9 to 12 digits once every non-digit is dropped
pub fn phone_valid(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (9..=12).contains(&digits)
}

impl RegisterForm {
    /// Every failing rule, in field order; empty when the form can be sent
    pub fn errors(&self, today: NaiveDate) -> Vec<FormError> {
        let mut errors = Vec::new();

        if self.full_name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(FormError::FullNameTooShort);
        }

        match is_valid_rut(&self.rut) {
            None => errors.push(FormError::RutIncomplete),
            Some(false) => errors.push(FormError::RutInvalid),
            Some(true) => {}
        }

        if NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d").is_err() {
            errors.push(FormError::InvalidBirthDate);
        } else if !is_adult(&self.birth_date, today) {
            errors.push(FormError::Underage);
        }

        if !phone_valid(&self.phone) {
            errors.push(FormError::InvalidPhone);
        }

        if self.user_name.trim().chars().count() < MIN_NAME_LEN {
            errors.push(FormError::UserNameTooShort);
        }

        if !is_valid_email(&self.email) || !is_valid_email(&self.email_confirmation) {
            errors.push(FormError::InvalidEmail);
        } else if self.email != self.email_confirmation {
            errors.push(FormError::EmailMismatch);
        }

        let checklist = PasswordChecklist::of(&self.password);
        if !checklist.min_length {
            errors.push(FormError::PasswordTooShort { min: REGISTER_PASSWORD_MIN });
        }
        if !checklist.uppercase {
            errors.push(FormError::PasswordMissingUppercase);
        }
        if !checklist.special {
            errors.push(FormError::PasswordMissingSpecial);
        }
        if self.password.is_empty() || self.password != self.password_confirmation {
            errors.push(FormError::PasswordMismatch);
        }

        if !self.consent {
            errors.push(FormError::ConsentRequired);
        }

        errors
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<FormError>> {
        let errors = self.errors(today);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and build the registration payload
    pub fn into_payload(self, today: NaiveDate) -> Result<RegisterPayload, Vec<FormError>> {
        self.validate(today)?;

        Ok(RegisterPayload {
            full_name: self.full_name,
            rut: format_rut(&self.rut),
            birth_date: Some(self.birth_date.trim().to_string()),
            phone_number: self.phone,
            user_name: self.user_name,
            email: self.email,
            password: self.password,
            plan: self.plan,
            role: None,
        })
    }
}
