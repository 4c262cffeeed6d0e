use thiserror::Error;

/// Problems with the TOML configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store could not be reached (pool exhausted, file unopenable).
    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    /// A stored value that cannot be mapped back to a domain type.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid day range: {0}")]
    InvalidDay(String),

    /// One or more modes of the daily driver failed.
    #[error("rollup failed: {0}")]
    Rollup(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::Connection(err.to_string())
    }
}
