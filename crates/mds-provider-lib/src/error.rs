use thiserror::Error;

/// Convenient result alias for the MDS provider library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type for the resource endpoints.
#[derive(Debug, Error)]
pub enum Error {
    /// A mandatory query parameter was absent or empty.
    #[error("{name} parameter is required")]
    MissingParameter { name: String },

    /// A time parameter could not be parsed as integer epoch milliseconds.
    #[error("Invalid timestamp format for {name}: {value}")]
    MalformedTimestamp { name: String, value: String },

    /// Raised when the backing data source fails to produce records.
    #[error("data source failure: {message}")]
    DataSource { message: String },

    /// Wrapper for JSON serialization errors.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::MissingParameter`] for the named parameter.
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Returns true when the error was caused by the caller's input.
    ///
    /// Client errors map to `400 Bad Request`; everything else is a `500`.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter { .. } | Error::MalformedTimestamp { .. }
        )
    }
}
