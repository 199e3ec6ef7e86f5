//! Thin client for the external backend
//!
//! One [`ApiClient`] serves every endpoint group; each submodule adds the
//! calls of one group.

pub mod admin_users;
pub mod auth;
pub mod carousel;
pub mod client;
pub mod events;
pub mod plans;
pub mod profile;
pub mod purchases;

pub use client::ApiClient;
pub use plans::UpsertOutcome;
