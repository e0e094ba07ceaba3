use std::str::FromStr;

use thiserror::Error;

use super::args::ServerArgs;
use super::secret::SecretKey;
use crate::env::Env;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKERS: u32 = 2;
pub const DEFAULT_EVENT_LOOP: &str = "uvloop";
pub const DEFAULT_KEEP_ALIVE_SECS: u32 = 65;
pub const DEFAULT_POOL_SIZE: &str = "5";
pub const DEFAULT_POOL_MAX_OVERFLOW: &str = "5";
pub const DEFAULT_VECTOR_DB: &str = "pgvector";
pub const DEFAULT_SERVER_BIN: &str = "uvicorn";
pub const DEFAULT_APP: &str = "open_webui.main:app";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected}, got '{value}'")]
    InvalidNumber {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings read straight from the environment, before the secret and the
/// server arguments are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: u32,
    pub event_loop: String,
    /// Keep-alive timeout in seconds.
    pub keep_alive: u32,
    /// Passed through to the application as-is.
    pub pool_size: String,
    /// Passed through to the application as-is.
    pub pool_max_overflow: String,
    pub vector_db: String,
    /// Server executable to exec.
    pub server_bin: String,
    /// Application import path handed to the server.
    pub app: String,
}

impl ServerSettings {
    /// Load settings from the environment snapshot with defaults.
    pub fn from_env(env: &Env) -> Result<Self, ConfigError> {
        let workers: u32 = parse_var(env, "UVICORN_WORKERS", DEFAULT_WORKERS, "a positive integer")?;
        if workers == 0 {
            return Err(ConfigError::InvalidNumber {
                key: "UVICORN_WORKERS",
                value: "0".into(),
                expected: "a positive integer",
            });
        }

        let settings = Self {
            // Always all interfaces; a platform-provided HOST is not honored.
            host: DEFAULT_HOST.to_string(),
            port: parse_var(env, "PORT", DEFAULT_PORT, "a port number (0-65535)")?,
            workers,
            event_loop: env.get_or("UVICORN_LOOP", DEFAULT_EVENT_LOOP).to_string(),
            keep_alive: parse_var(
                env,
                "UVICORN_TIMEOUT_KEEP_ALIVE",
                DEFAULT_KEEP_ALIVE_SECS,
                "a number of seconds",
            )?,
            pool_size: env.get_or("DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE).to_string(),
            pool_max_overflow: env
                .get_or("DATABASE_POOL_MAX_OVERFLOW", DEFAULT_POOL_MAX_OVERFLOW)
                .to_string(),
            vector_db: env.get_or("VECTOR_DB", DEFAULT_VECTOR_DB).to_string(),
            server_bin: env.get_or("WEBUI_SERVER_BIN", DEFAULT_SERVER_BIN).to_string(),
            app: env.get_or("WEBUI_APP", DEFAULT_APP).to_string(),
        };
        settings.warn_on_odd_pool_sizing();
        Ok(settings)
    }

    /// Pool values are not ours to enforce; flag ones the application is
    /// unlikely to accept.
    fn warn_on_odd_pool_sizing(&self) {
        for (key, value) in [
            ("DATABASE_POOL_SIZE", &self.pool_size),
            ("DATABASE_POOL_MAX_OVERFLOW", &self.pool_max_overflow),
        ] {
            if value.parse::<i64>().is_err() {
                tracing::warn!("{key}={value} is not an integer; passing it through unchanged");
            }
        }
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Everything the launch needs, derived once per start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub settings: ServerSettings,
    pub secret: SecretKey,
    /// Integrations whose API key is present.
    pub integrations: Vec<&'static str>,
    pub server_args: ServerArgs,
}

fn parse_var<T: FromStr>(
    env: &Env,
    key: &'static str,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match env.non_empty(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_on_empty_env() {
        let s = ServerSettings::from_env(&Env::default()).unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.port, 8080);
        assert_eq!(s.workers, 2);
        assert_eq!(s.keep_alive, 65);
        assert_eq!(s.pool_size, "5");
        assert_eq!(s.pool_max_overflow, "5");
        assert_eq!(s.vector_db, "pgvector");
        assert_eq!(s.server_bin, "uvicorn");
        assert_eq!(s.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn environment_overrides_defaults() {
        let env = Env::from_pairs([
            ("PORT", "3000"),
            ("UVICORN_WORKERS", "8"),
            ("UVICORN_LOOP", "asyncio"),
            ("DATABASE_POOL_SIZE", "20"),
            ("VECTOR_DB", "chroma"),
        ]);
        let s = ServerSettings::from_env(&env).unwrap();
        assert_eq!(s.port, 3000);
        assert_eq!(s.workers, 8);
        assert_eq!(s.event_loop, "asyncio");
        assert_eq!(s.pool_size, "20");
        assert_eq!(s.vector_db, "chroma");
    }

    #[test]
    fn listen_host_ignores_host_variable() {
        let s = ServerSettings::from_env(&Env::from_pairs([("HOST", "127.0.0.1")])).unwrap();
        assert_eq!(s.host, "0.0.0.0");
        assert_eq!(s.addr(), "0.0.0.0:8080");
    }

    #[test]
    fn pool_values_pass_through_unvalidated() {
        let env = Env::from_pairs([
            ("DATABASE_POOL_SIZE", "-3"),
            ("DATABASE_POOL_MAX_OVERFLOW", "lots"),
        ]);
        let s = ServerSettings::from_env(&env).unwrap();
        assert_eq!(s.pool_size, "-3");
        assert_eq!(s.pool_max_overflow, "lots");
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServerSettings::from_env(&Env::from_pairs([("PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "PORT", .. }));

        let err = ServerSettings::from_env(&Env::from_pairs([("PORT", "70000")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "PORT", .. }));
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err =
            ServerSettings::from_env(&Env::from_pairs([("UVICORN_WORKERS", "0")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "UVICORN_WORKERS must be a positive integer, got '0'"
        );
    }
}
