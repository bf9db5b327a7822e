/*!
 * Error types for the sitelingo application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the translation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The response was well formed but carried no translation
    #[error("API response contained no translation")]
    EmptyResponse,

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised by the durable key/value storage
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing a slot failed
    #[error("Storage I/O error on slot '{slot}': {source}")]
    Io {
        /// Slot name
        slot: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A value could not be serialized or deserialized
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store refuses further writes
    #[error("Storage quota exceeded for slot '{0}'")]
    QuotaExceeded(String),
}

/// Errors raised by a document implementation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// No translatable element has this id
    #[error("Unknown element: {0}")]
    UnknownElement(String),
}

/// Errors that abort a language switch
#[derive(Error, Debug)]
pub enum SessionError {
    /// The requested code is not one of the configured languages
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The page is not authored in the language translations start from
    #[error("Page language '{page_language}' does not match source language '{source_language}'")]
    SourceMismatch {
        /// Language declared by the page
        page_language: String,
        /// Configured source language
        source_language: String,
    },

    /// The document rejected a read or mutation
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
}
