//! State management module
//!
//! This module holds the signed-in session and its storage

pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use session::{SessionHolder, mirror_cookies};
pub use storage::{SessionStore, StorageTier};
