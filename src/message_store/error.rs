use std::fmt;

/// Result type for message store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for message store operations
#[derive(Debug)]
pub enum Error {
    /// Validation error - invalid input data or an unreadable row
    ValidationError(String),

    /// Connection error - database unreachable or authentication failure
    ConnectionError(String),

    /// Database error - SQL errors, constraint violations
    DatabaseError(String),

    /// Pool error - connection pool issues
    PoolError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Error::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Error::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            Error::PoolError(msg) => write!(f, "Pool error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Convert tokio-postgres errors to store errors
impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db_error) = err.as_db_error() {
            return Error::DatabaseError(format!(
                "{}: {}",
                db_error.code().code(),
                db_error.message()
            ));
        }

        // For non-database errors, show the full error
        Error::DatabaseError(format!("{:?}", err))
    }
}

/// Convert deadpool errors to store errors
impl From<deadpool_postgres::PoolError> for Error {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Error::PoolError(err.to_string())
    }
}

/// Convert deadpool build errors to store errors
impl From<deadpool_postgres::BuildError> for Error {
    fn from(err: deadpool_postgres::BuildError) -> Self {
        Error::ConnectionError(err.to_string())
    }
}
