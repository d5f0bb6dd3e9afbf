//! Unified service-layer error type for hr-server
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`) and the
//! API-layer error (`AppError`), so repositories and handlers can use `?`
//! without hand-written `map_err` logging.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl ServiceError {
    /// Translate constraint violations into business errors
    ///
    /// Unique violations become `on_unique`, foreign-key violations become
    /// `on_foreign_key`; anything else stays a database error.
    pub fn from_constraint(e: sqlx::Error, on_unique: ErrorCode, on_foreign_key: ErrorCode) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let code = if db.is_unique_violation() {
                Some(on_unique)
            } else if db.is_foreign_key_violation() {
                Some(on_foreign_key)
            } else {
                None
            };
            if let Some(code) = code {
                let mut err = AppError::new(code);
                if let Some(constraint) = db.constraint() {
                    err = err.with_detail("constraint", constraint);
                }
                return ServiceError::App(err);
            }
        }
        ServiceError::from(e)
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Db(e.into())
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
