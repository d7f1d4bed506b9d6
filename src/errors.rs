/*!
 * Error types for the signflow application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Declining a transcript at the gate is not an error and has no type here; the gate
 * simply answers `false`.
 */

use thiserror::Error;

use crate::playback::{ClipId, Generation};

/// Errors that can occur when talking to a translation service
#[derive(Error, Debug, Clone, PartialEq)]
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

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Why a translation cycle ended without a playable sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    /// The service answered, but with no clips
    #[error("no content")]
    EmptyResult,

    /// The service could not be reached or answered with a failure
    #[error("Failed to fetch sign language clips: {0}")]
    Network(#[from] ProviderError),
}

/// A single clip failed to play; scoped to that clip only
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Error playing clip {clip}: {message}")]
pub struct ClipPlaybackError {
    /// Clip that failed
    pub clip: ClipId,
    /// Reason reported by the clip driver
    pub message: String,
}

/// A translation outcome arrived after a newer request was issued.
///
/// Never surfaced to the host; the requester logs it and drops the outcome.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("result of generation {generation} superseded by {latest}")]
pub struct SupersededResult {
    /// Generation the outcome belongs to
    pub generation: Generation,
    /// Highest generation issued when the outcome arrived
    pub latest: Generation,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Translation cycle failed
    #[error("Translation error: {0}")]
    Cycle(#[from] CycleError),

    /// The player task is gone
    #[error("Player stopped: {0}")]
    PlayerStopped(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
