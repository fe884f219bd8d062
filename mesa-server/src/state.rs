//! Application state

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::config::Config;
use crate::db;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt: JwtService,
    /// Minimum allowed table capacity
    pub table_min_capacity: i64,
    /// Maximum allowed table capacity
    pub table_max_capacity: i64,
}

impl AppState {
    /// Create a new AppState: open the pool, run migrations, build the JWT service
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let pool = db::connect(&config.database_url).await?;
        let jwt = JwtService::new(
            &config.jwt_secret,
            config.access_token_minutes,
            config.refresh_token_days,
        );

        Ok(Self {
            pool,
            jwt,
            table_min_capacity: config.table_min_capacity,
            table_max_capacity: config.table_max_capacity,
        })
    }
}
