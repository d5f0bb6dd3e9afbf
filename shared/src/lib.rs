//! Shared types for the HR service
//!
//! Wire models, the error system, the base64 blob codec, the permission
//! policy and the re-registration payload builder used by both
//! `hr-server` and `hr-client`.

pub mod codec;
pub mod error;
pub mod messages;
pub mod models;
pub mod policy;
pub mod reregister;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
