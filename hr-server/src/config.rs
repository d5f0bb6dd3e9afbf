//! HR server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// HR server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Mail domain for addresses synthesized on re-registration
    pub email_domain: String,
    /// Request body limit (document uploads are base64 inside JSON)
    pub max_body_bytes: usize,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            email_domain: std::env::var("COMPANY_EMAIL_DOMAIN")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| shared::reregister::DEFAULT_EMAIL_DOMAIN.into()),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_BODY_BYTES),
            environment,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_placeholder_only_in_development() {
        let name = "HR_SERVER_TEST_UNSET_SECRET";
        let dev = Config::require_secret(name, "development").unwrap();
        assert_eq!(dev, format!("dev-{name}-not-for-production"));
        assert!(Config::require_secret(name, "production").is_err());
    }
}
