use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub query_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.connect_options.get_host())
            .field("port", &self.connect_options.get_port())
            .field("database", &self.connect_options.get_database())
            .field("max_connections", &self.max_connections)
            .field("connect_timeout", &self.connect_timeout)
            .field("query_timeout", &self.query_timeout)
            .finish_non_exhaustive()
    }
}

impl DatabaseConfig {
    /// `DATABASE_URL` wins; otherwise the connection is assembled from the
    /// `DB_*` variables, taken verbatim.
    pub fn from_env() -> Result<Self> {
        let connect_options = match env::var("DATABASE_URL") {
            Ok(url) => PgConnectOptions::from_str(&url)
                .context("DATABASE_URL is not a valid PostgreSQL URL")?,
            Err(_) => options_from_parts()?,
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .context("DB_MAX_CONNECTIONS must be an integer")?;

        let connect_timeout_secs = env::var("DB_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .context("DB_CONNECT_TIMEOUT must be a number of seconds")?;

        let query_timeout_secs = env::var("DB_QUERY_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DB_QUERY_TIMEOUT_SECS must be a number of seconds")?;

        Ok(DatabaseConfig {
            connect_options,
            max_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            query_timeout: Duration::from_secs(query_timeout_secs),
        })
    }

    pub async fn create_pool(&self) -> Result<PgPool> {
        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.connect_timeout)
            .connect_with(self.connect_options.clone())
            .await
            .context("failed to connect to PostgreSQL")?;

        Ok(pool)
    }
}

fn options_from_parts() -> Result<PgConnectOptions> {
    let user = env::var("DB_USER").context("DB_USER or DATABASE_URL must be set")?;
    let name = env::var("DB_NAME").context("DB_NAME or DATABASE_URL must be set")?;
    let password = env::var("DB_PASSWORD").context("DB_PASSWORD or DATABASE_URL must be set")?;
    let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port: u16 = env::var("DB_PORT")
        .unwrap_or_else(|_| "5432".to_string())
        .parse()
        .context("DB_PORT must be a port number")?;
    let ssl_mode = env::var("DB_SSLMODE")
        .unwrap_or_else(|_| "disable".to_string())
        .parse::<PgSslMode>()
        .context("DB_SSLMODE is not a valid sslmode")?;

    Ok(PgConnectOptions::new()
        .host(&host)
        .port(port)
        .username(&user)
        .password(&password)
        .database(&name)
        .ssl_mode(ssl_mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 10] = [
        "DATABASE_URL",
        "DB_USER",
        "DB_NAME",
        "DB_PASSWORD",
        "DB_HOST",
        "DB_PORT",
        "DB_SSLMODE",
        "DB_MAX_CONNECTIONS",
        "DB_CONNECT_TIMEOUT",
        "DB_QUERY_TIMEOUT_SECS",
    ];

    fn clear() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_options_built_from_parts() {
        clear();
        env::set_var("DB_USER", "gym");
        env::set_var("DB_NAME", "gym_db");
        env::set_var("DB_PASSWORD", "hunter2");

        let config = DatabaseConfig::from_env().unwrap();
        let options = &config.connect_options;
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "gym");
        assert_eq!(options.get_database(), Some("gym_db"));
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Disable));
        assert_eq!(config.query_timeout, Duration::from_secs(5));
        assert!(!format!("{:?}", config).contains("hunter2"));
        clear();
    }

    #[test]
    #[serial]
    fn test_password_with_url_metacharacters_keeps_host_and_database() {
        clear();
        env::set_var("DB_USER", "gym");
        env::set_var("DB_NAME", "gym_db");
        env::set_var("DB_PASSWORD", "p@ss/w#rd?:x");
        env::set_var("DB_HOST", "db.internal");
        env::set_var("DB_PORT", "6543");

        let config = DatabaseConfig::from_env().unwrap();
        let options = &config.connect_options;
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "gym");
        assert_eq!(options.get_database(), Some("gym_db"));
        assert!(!format!("{:?}", config).contains("p@ss"));
        clear();
    }

    #[test]
    #[serial]
    fn test_database_url_takes_precedence() {
        clear();
        env::set_var("DATABASE_URL", "postgresql://u:p@db:5432/gym");
        env::set_var("DB_USER", "ignored");

        let config = DatabaseConfig::from_env().unwrap();
        assert_eq!(config.connect_options.get_host(), "db");
        assert_eq!(config.connect_options.get_username(), "u");
        assert_eq!(config.connect_options.get_database(), Some("gym"));
        clear();
    }

    #[test]
    #[serial]
    fn test_invalid_port_fails() {
        clear();
        env::set_var("DB_USER", "gym");
        env::set_var("DB_NAME", "gym_db");
        env::set_var("DB_PASSWORD", "hunter2");
        env::set_var("DB_PORT", "not-a-port");

        assert!(DatabaseConfig::from_env().is_err());
        clear();
    }

    #[test]
    #[serial]
    fn test_missing_credentials_fail() {
        clear();
        assert!(DatabaseConfig::from_env().is_err());
    }
}
