use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// The identifier is not a 24-character hex object id.
    #[error("Invalid Planet ID")]
    InvalidId,

    /// A lookup or delete matched zero documents.
    #[error("document not found")]
    NotFound,

    #[error("Storage operation failed: {0}")]
    Storage(#[from] mongodb::error::Error),

    /// A failure from a backend that is not the MongoDB driver.
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to connect to the database: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("Invalid database connection settings: {0}")]
    ConnectionConfigError(String),
}

impl DbError {
    /// True for everything that is not a classified client-side condition.
    pub fn is_storage(&self) -> bool {
        !matches!(self, DbError::InvalidId | DbError::NotFound)
    }
}
