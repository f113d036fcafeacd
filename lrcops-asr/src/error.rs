//! Error types for lrcops-asr organized by processing stage.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// ASR backend error variants organized by processing stage.
#[derive(Debug, Error)]
pub enum Error {
    /// Model loading stage error
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Transcription stage error
    #[error(transparent)]
    Transcribe(#[from] TranscribeError),
}

/// Model loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Backend program is not resolvable on PATH
    #[error("program not found: {program}")]
    ProgramNotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// Model identifier is neither a known name nor an existing checkpoint
    #[error("unknown model: {0}")]
    UnknownModel(String),
}

/// Transcription errors (process spawning, backend failure, output parsing).
#[derive(Debug, Error)]
pub enum TranscribeError {
    /// Backend exited unsuccessfully
    #[error("backend exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// Backend finished but its result file is missing
    #[error("missing backend output: {0}")]
    MissingOutput(PathBuf),

    /// Audio path has no file name to derive the output name from
    #[error("invalid audio path: {0}")]
    InvalidAudioPath(PathBuf),

    /// IO error while spawning or reading results
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Result file is not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for lrcops-asr operations.
pub type Result<T> = std::result::Result<T, Error>;

// Nested From implementations for automatic error conversion chains

// std::io::Error → TranscribeError → Error
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Transcribe(TranscribeError::Io(e))
    }
}

// serde_json::Error → TranscribeError → Error
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Transcribe(TranscribeError::Json(e))
    }
}
