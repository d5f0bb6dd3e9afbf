//! Application state for hr-server

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::db::{DocumentRepository, EmployeeRepository, PgDocuments, PgEmployees};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentRepository>,
    pub employees: Arc<dyn EmployeeRepository>,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Mail domain for re-registered employees
    pub email_domain: String,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
}

impl AppState {
    /// Connect to PostgreSQL, run migrations and build the state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = PgPool::connect(&config.database_url).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");

        Ok(Self {
            documents: Arc::new(PgDocuments::new(pool.clone())),
            employees: Arc::new(PgEmployees::new(pool)),
            jwt_secret: config.jwt_secret.clone(),
            email_domain: config.email_domain.clone(),
            max_body_bytes: config.max_body_bytes,
        })
    }

    /// Build a state over arbitrary repositories
    pub fn with_repositories(
        documents: Arc<dyn DocumentRepository>,
        employees: Arc<dyn EmployeeRepository>,
        jwt_secret: impl Into<String>,
    ) -> Self {
        Self {
            documents,
            employees,
            jwt_secret: jwt_secret.into(),
            email_domain: shared::reregister::DEFAULT_EMAIL_DOMAIN.to_string(),
            max_body_bytes: 25 * 1024 * 1024,
        }
    }
}
