//! JWT identity for the HR API
//!
//! Tokens are issued by the login service; this module only verifies them
//! and turns their claims into an [`Identity`] request extension.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use shared::error::AppError;
use shared::policy::{Capability, PermissionLevel, Viewer, allows};

use crate::state::AppState;

/// JWT claims for an HR user
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Employee id of the user, empty for accounts without an employee record
    pub sub: String,
    /// Permission id (1 = admin, 2 = manager, 3 = staff)
    pub permission: PermissionLevel,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated user extracted from the bearer token
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub emp_id: Option<i64>,
    pub level: PermissionLevel,
}

impl Identity {
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.level, self.emp_id)
    }
}

/// Refuse the request unless the identity holds `capability`
pub fn require(identity: &Identity, capability: Capability) -> Result<(), AppError> {
    if allows(&identity.viewer(), capability) {
        Ok(())
    } else {
        tracing::debug!(emp_id = ?identity.emp_id, ?capability, "Capability refused");
        Err(AppError::admin_required())
    }
}

const JWT_EXPIRY_HOURS: i64 = 12;

/// Create a JWT token for a user
pub fn create_token(
    emp_id: Option<i64>,
    level: PermissionLevel,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = Claims {
        sub: emp_id.map(|id| id.to_string()).unwrap_or_default(),
        permission: level,
        exp: (now + chrono::Duration::hours(JWT_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Middleware that verifies the bearer token and inserts an [`Identity`]
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::not_authenticated().into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::invalid_token("Invalid Authorization format").into_response())?;

    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("JWT validation failed: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::token_expired().into_response(),
            _ => AppError::invalid_token("Invalid or expired token").into_response(),
        }
    })?;

    let identity = Identity {
        emp_id: token_data.claims.sub.parse().ok(),
        level: token_data.claims.permission,
    };

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}
