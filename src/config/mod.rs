use std::env;

use anyhow::Result;
use sqlx::PgPool;

use crate::services::Notifier;

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("DATABASE_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DATABASE_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()?,
            username: env::var("DATABASE_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME").unwrap_or_else(|_| "inquiries".to_string()),
            ssl_mode: env::var("DATABASE_SSL_MODE").unwrap_or_else(|_| "prefer".to_string()),
        })
    }

    pub fn connection_string(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            self.username, self.password, self.host, self.port, self.database, self.ssl_mode
        )
    }
}

/// SMTP settings for the notifier. Host, port, and recipient default to the
/// values the inquiry form has always used; credentials must be provided.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub recipient: String,
}

impl SmtpConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.office365.com".to_string()),
            port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "587".to_string())
                .parse()?,
            username: env::var("EMAIL_USER")?,
            password: env::var("EMAIL_PASSWORD")?,
            recipient: env::var("EMAIL_RECIPIENT")
                .unwrap_or_else(|_| "Inquery.developement@outlook.com".to_string()),
        })
    }
}

/// Process-wide configuration, constructed once at startup and handed to the
/// handlers as axum state. There is no ambient global client anywhere.
#[derive(Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub smtp: SmtpConfig,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub database_pool: PgPool,
    pub notifier: Notifier,
}

impl AppConfig {
    pub async fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let database_config = DatabaseConfig::from_env()?;
        let database_pool = sqlx::PgPool::connect(&database_config.connection_string()).await?;

        let smtp_config = SmtpConfig::from_env()?;
        let notifier = Notifier::new(&smtp_config)?;

        Ok(Self {
            database: database_config,
            smtp: smtp_config,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            cors_origins,
            database_pool,
            notifier,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
