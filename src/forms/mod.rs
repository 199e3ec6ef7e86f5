//! Client-side form validation
//!
//! All checks are synchronous and run before any network call; a failing
//! form is never submitted.

pub mod forgot;
pub mod login;
pub mod register;
pub mod rut;

use std::sync::OnceLock;
use regex::Regex;

pub use forgot::ForgotPasswordForm;
pub use login::LoginForm;
pub use register::{is_adult, phone_valid, PasswordChecklist, RegisterForm};
pub use rut::{compute_rut_dv, format_rut, is_valid_rut};

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).unwrap_or_else(|e| panic!("email pattern: {}", e)))
}

/// `something@domain.tld` with no whitespace
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}
