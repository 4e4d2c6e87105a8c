use diesel::result::Error as DieselError;

/// Failure kinds surfaced by the user store and its configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No user with this id exists
    #[error("user {0} not found")]
    NotFound(i64),
    /// Input was malformed or failed validation before reaching the store
    #[error("invalid user data: {0}")]
    Decode(String),
    /// The backing medium failed to read or write
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
    /// The HTTP listener could not be bound or stopped unexpectedly
    #[error("server error: {0}")]
    Server(String),
}

impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<r2d2::Error> for Error {
    fn from(err: r2d2::Error) -> Self {
        Error::Storage(format!("connection pool: {}", err))
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Storage(format!("blocking task failed: {}", err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
