use std::io;
use thiserror::Error;

/// Unified error type for the SIAK-Klinis client
#[derive(Error, Debug)]
pub enum SiakError {
    /// No API credential was configured for the active provider
    #[error("API credential is missing")]
    MissingCredential,

    /// Provider returned an error status or an unusable body
    #[error("API error: {0}")]
    Api(String),

    /// Provider answered but produced no text
    #[error("Provider returned an empty response")]
    EmptyResponse,

    /// Network-related errors
    #[error("Network error: {0}")]
    Network(String),

    /// Image attachment could not be read or is not an image
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl From<reqwest::Error> for SiakError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            SiakError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            SiakError::Network(format!("Connection failed: {}", err))
        } else if err.is_status() {
            SiakError::Api(format!("API returned error status: {}", err))
        } else {
            SiakError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for SiakError {
    fn from(err: serde_json::Error) -> Self {
        SiakError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for SiakError {
    fn from(err: serde_yml::Error) -> Self {
        SiakError::Serialization(format!("YAML error: {}", err))
    }
}
