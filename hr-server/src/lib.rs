//! hr-server: HR directory backend
//!
//! JSON over HTTP for documents and employees, stored in PostgreSQL.
//!
//! ```text
//! hr-server/src/
//! ├── api/     # routes and handlers
//! ├── auth/    # bearer-token identity
//! ├── db/      # repository traits, PostgreSQL and in-memory stores
//! ├── config.rs
//! ├── error.rs
//! └── state.rs
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod state;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
