use thiserror::Error;

/// Failure surfaced by the database: connection, query execution or driver fault.
///
/// `Display` is exactly the underlying failure message so callers see what the
/// driver reported, untouched.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DatabaseError {
    message: String,
    #[source]
    source: Option<mongodb::error::Error>,
}

impl DatabaseError {
    #[cfg(test)]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The driver error this was built from, if any.
    pub fn driver_error(&self) -> Option<&mongodb::error::Error> {
        self.source.as_ref()
    }
}

impl From<mongodb::error::Error> for DatabaseError {
    fn from(err: mongodb::error::Error) -> Self {
        Self {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
