//! Error types for the narrative service boundary

use thiserror::Error;

/// Errors surfaced by story generation.
///
/// All of these end up as readable text in the story box; none of them are
/// fatal and the generate control is re-enabled in every case.
#[derive(Error, Debug)]
pub enum NarrativeError {
    /// Transport failure, including the 60s timeout
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with an error payload or a non-2xx status
    #[error("service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// The body was not the JSON shape we expect (raw body truncated)
    #[error("unexpected response: {preview}")]
    UnexpectedResponse { preview: String },

    /// A 2xx response with no story in it
    #[error("no story returned")]
    MissingStory,

    /// The worker thread died without reporting a result
    #[error("story generation stopped unexpectedly")]
    WorkerDied,
}
