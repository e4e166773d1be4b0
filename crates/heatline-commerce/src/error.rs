//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in catalog and cart operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Part not found.
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Cart line not found.
    #[error("Cart line not found: {0}")]
    CartLineNotFound(String),

    /// User not found.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Malformed pagination input (negative limit/offset).
    #[error("Invalid pagination: {0}")]
    InvalidPagination(String),

    /// Invalid cart quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommerceError {
    /// HTTP status the boundary layer should translate this error to.
    ///
    /// Authentication failures are not represented here; the session guard
    /// rejects unauthenticated calls before the core is reached.
    pub fn http_status(&self) -> u16 {
        match self {
            CommerceError::PartNotFound(_)
            | CommerceError::CartLineNotFound(_)
            | CommerceError::UserNotFound(_) => 404,
            CommerceError::InvalidPagination(_)
            | CommerceError::InvalidQuantity(_)
            | CommerceError::InvalidArgument(_) => 400,
            CommerceError::DatabaseError(_) | CommerceError::SerializationError(_) => 500,
        }
    }

    /// Check if this error signals a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CommerceError::PartNotFound(_)
                | CommerceError::CartLineNotFound(_)
                | CommerceError::UserNotFound(_)
        )
    }
}

impl From<heatline_db::DbError> for CommerceError {
    fn from(e: heatline_db::DbError) -> Self {
        CommerceError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::SerializationError(e.to_string())
    }
}
