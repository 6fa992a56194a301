use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A request handler panicked.
    ///
    /// Caught by the panic layer so the process keeps serving. Results in a 500
    /// Internal Server Error with a generic message returned to client.
    #[error("Request handler panicked: {0}")]
    HandlerPanicked(String),

    /// A value read back from the database is not one the application writes.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Invalid value '{value}' stored in column {column}")]
    InvalidStoredValue {
        /// Column the value was read from
        column: &'static str,
        /// The offending value
        value: String,
    },
}
