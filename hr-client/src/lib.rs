//! HR Client - HTTP client and People directory for the HR service
//!
//! Provides network calls to the HR API and the directory state behind the
//! People view: cached employee collections, display rows, permission-gated
//! action menus and re-registration of terminated employees.

pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod http;

pub use api::{DocumentApi, HrApi};
pub use config::ClientConfig;
pub use directory::{DirectoryCache, DirectoryContext, PeopleDirectory};
pub use error::{ClientError, ClientResult};
pub use http::HrClient;

// Re-export shared types for convenience
pub use shared::error::ApiResponse;
pub use shared::policy::{PermissionLevel, Viewer};
