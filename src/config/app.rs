use anyhow::{bail, Context, Result};
use chrono::Duration;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_in: Duration,
    pub bcrypt_cost: u32,
    pub exercise_catalog_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("PORT must be a valid port number")?;

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        if jwt_secret.is_empty() {
            bail!("JWT_SECRET must not be empty");
        }

        let jwt_expires_in_secs: i64 = env::var("JWT_EXPIRES_IN_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .context("JWT_EXPIRES_IN_SECS must be a number of seconds")?;
        if jwt_expires_in_secs <= 0 {
            bail!("JWT_EXPIRES_IN_SECS must be positive");
        }

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(cost) => cost.parse().context("BCRYPT_COST must be an integer")?,
            Err(_) => bcrypt::DEFAULT_COST,
        };

        let exercise_catalog_url = env::var("EXERCISE_CATALOG_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Ok(AppConfig {
            host,
            port,
            jwt_secret,
            jwt_expires_in: Duration::seconds(jwt_expires_in_secs),
            bcrypt_cost,
            exercise_catalog_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        for key in [
            "HOST",
            "PORT",
            "JWT_SECRET",
            "JWT_EXPIRES_IN_SECS",
            "BCRYPT_COST",
            "EXERCISE_CATALOG_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        env::set_var("JWT_SECRET", "s3cret");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.server_address(), "0.0.0.0:8000");
        assert_eq!(config.jwt_expires_in, Duration::hours(24));
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert!(config.exercise_catalog_url.is_none());
        clear();
    }

    #[test]
    #[serial]
    fn test_secret_is_required() {
        clear();
        assert!(AppConfig::from_env().is_err());

        env::set_var("JWT_SECRET", "");
        assert!(AppConfig::from_env().is_err());
        clear();
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear();
        env::set_var("JWT_SECRET", "s3cret");
        env::set_var("PORT", "9090");
        env::set_var("BCRYPT_COST", "10");
        env::set_var("EXERCISE_CATALOG_URL", "http://catalog.local/exercises");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.exercise_catalog_url.as_deref(), Some("http://catalog.local/exercises"));
        clear();
    }
}
