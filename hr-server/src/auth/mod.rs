//! Bearer-token identity for the HR API

pub mod identity;

pub use identity::{Identity, create_token, identity_middleware, require};
