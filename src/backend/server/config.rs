/**
 * Server Configuration
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary first), with defaults suitable for local development.
 *
 * | Variable       | Default                       |
 * |----------------|-------------------------------|
 * | `PORT`         | `4000`                        |
 * | `DATABASE_URL` | `sqlite://plaza.db?mode=rwc`  |
 * | `JWT_SECRET`   | `changeme_super_secret`       |
 * | `UPLOAD_DIR`   | `public/uploads`              |
 * | `PUBLIC_URL`   | `http://localhost:<PORT>`     |
 * | `BCRYPT_COST`  | `10`                          |
 *
 * The database is required: unlike optional services, a failure to open it
 * or to run migrations aborts startup.
 */

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://plaza.db?mode=rwc";
pub const DEFAULT_JWT_SECRET: &str = "changeme_super_secret";
pub const DEFAULT_UPLOAD_DIR: &str = "public/uploads";
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("bcrypt cost must be between 4 and 31, got {0}")]
    InvalidBcryptCost(u32),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runtime configuration shared by every handler
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Base URL used to build absolute image URLs
    pub public_url: String,
    pub bcrypt_cost: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_url: format!("http://localhost:{}", DEFAULT_PORT),
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(port) = lookup("PORT") {
            let parsed = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: port.clone() })?;
            builder = builder.port(parsed);
        }
        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => builder = builder.jwt_secret(secret),
            None => tracing::warn!("JWT_SECRET not set, using the insecure development secret"),
        }
        if let Some(dir) = lookup("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(url) = lookup("PUBLIC_URL") {
            builder = builder.public_url(url);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            let parsed = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue { name: "BCRYPT_COST", value: cost.clone() })?;
            builder = builder.bcrypt_cost(parsed);
        }

        builder.build()
    }

    /// Build the absolute URL of an uploaded file
    pub fn upload_url(&self, file_name: &str) -> String {
        format!("{}/uploads/{}", self.public_url.trim_end_matches('/'), file_name)
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    upload_dir: Option<PathBuf>,
    public_url: Option<String>,
    bcrypt_cost: Option<u32>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = ServerConfig::default();
        let port = self.port.unwrap_or(defaults.port);
        let bcrypt_cost = self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost);

        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(bcrypt_cost));
        }

        Ok(ServerConfig {
            port,
            database_url: self.database_url.unwrap_or(defaults.database_url),
            jwt_secret: self.jwt_secret.unwrap_or(defaults.jwt_secret),
            upload_dir: self.upload_dir.unwrap_or(defaults.upload_dir),
            public_url: self
                .public_url
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            bcrypt_cost,
        })
    }
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Open the SQLite pool and run migrations
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never recycled.
///
/// ```rust,ignore
/// let pool = load_database("sqlite::memory:").await?;
/// ```
pub async fn load_database(database_url: &str) -> Result<SqlitePool, ConfigError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
