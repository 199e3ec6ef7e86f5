//! User model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::utils::errors::CuponmeError;
use crate::utils::helpers::as_string;

/// Hierarchical privilege tier.
///
/// Variants are declared from lowest to highest rank; the derived `Ord`
/// is the rank order used by the role gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Member,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::User, Role::Member, Role::Admin, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Member => "member",
            Role::Admin => "admin",
            Role::SuperAdmin => "superadmin",
        }
    }

    /// Position in the rank order, 0 for `User`
    pub fn rank(&self) -> usize {
        *self as usize
    }

    /// Parse a stored role, treating anything unknown as `User`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or(Role::User)
    }
}

impl FromStr for Role {
    type Err = CuponmeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::SuperAdmin),
            other => Err(CuponmeError::InvalidInput(format!("Unknown role: {}", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Commercial subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Basic,
    Premium,
    Gold,
}

impl Plan {
    pub const ALL: [Plan; 4] = [Plan::Free, Plan::Basic, Plan::Premium, Plan::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Basic => "basic",
            Plan::Premium => "premium",
            Plan::Gold => "gold",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Parse a stored plan, treating anything unknown as `Free`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or(Plan::Free)
    }
}

impl FromStr for Plan {
    type Err = CuponmeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(Plan::Free),
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            "gold" => Ok(Plan::Gold),
            other => Err(CuponmeError::InvalidInput(format!("Unknown plan: {}", other))),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user as seen by the access-control gates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub plan: Plan,
}

/// Profile of the signed-in user as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub user_name: String,
    pub phone: String,
    pub rut: String,
    pub birth_date: Option<String>,
    pub role: String,
    pub plan: String,
}

impl UserProfile {
    /// Map a profile response, tolerating missing fields; `None` for a
    /// non-object body
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            email: as_string(obj.get("email"), ""),
            full_name: as_string(obj.get("fullName"), ""),
            user_name: as_string(obj.get("userName"), ""),
            phone: as_string(obj.get("phone"), ""),
            rut: as_string(obj.get("rut"), ""),
            birth_date: match obj.get("birthDate") {
                None | Some(Value::Null) | Some(Value::Bool(false)) => None,
                Some(Value::String(s)) if s.is_empty() => None,
                Some(v) => Some(as_string(Some(v), "")),
            },
            role: as_string(obj.get("role"), "user"),
            plan: as_string(obj.get("plan"), "free"),
        })
    }
}

/// Editable profile fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub email: String,
    pub full_name: String,
    pub user_name: String,
    pub phone: String,
    pub rut: String,
    pub birth_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// A user row in the admin users tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub user_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub rut: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    pub role: Role,
    pub plan: Plan,
    pub created_at: String,
}
