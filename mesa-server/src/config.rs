//! Server configuration

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL (e.g. `sqlite:mesa.db`)
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// JWT signing secret
    pub jwt_secret: String,
    /// Access token lifetime (minutes)
    pub access_token_minutes: i64,
    /// Refresh token lifetime (days)
    pub refresh_token_days: i64,
    /// Minimum allowed table capacity
    pub table_min_capacity: i64,
    /// Maximum allowed table capacity
    pub table_max_capacity: i64,
    /// Environment: development | staging | production
    pub environment: String,
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
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:mesa.db".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            access_token_minutes: std::env::var("ACCESS_TOKEN_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            refresh_token_days: std::env::var("REFRESH_TOKEN_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(7),
            table_min_capacity: std::env::var("TABLE_MIN_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            table_max_capacity: std::env::var("TABLE_MAX_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
            environment,
        })
    }
}
