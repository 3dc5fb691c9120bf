use axum::http::HeaderValue;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// The database location is not configurable; see
/// [`todolist_db::DATABASE_FILE`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                expected: "a valid u16",
                value,
            })?,
            None => 3000,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse().map_err(|_| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    expected: "a list of valid header values",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                expected: "a valid u64",
                value,
            })?,
            None => 30,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}
