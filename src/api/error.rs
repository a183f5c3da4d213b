/// Error types for the Climatiq client
use thiserror::Error;

/// Reasons an estimate request could not produce a usable result
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EstimationError {
    /// Connection, DNS or transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        body: String,
    },

    /// Response body was not the JSON we expected
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Response carried no usable `co2e` total
    #[error("No CO2e in response")]
    MissingTotal,
}
