//! Input checks run before any model is loaded.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Audio and container extensions accepted as input.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "wav", "flac", "ogg", "opus", "mkv", "mp4"];

/// External program the recognition backend needs for decoding.
pub const REQUIRED_TOOL: &str = "ffmpeg";

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("file not found: {0:?}")]
    NotAFile(PathBuf),

    #[error("unsupported file type: {path:?} (supported extensions: {})", AUDIO_EXTENSIONS.join(", "))]
    UnsupportedExtension { path: PathBuf },

    #[error("{tool} not found, install it and ensure it is in PATH")]
    MissingTool {
        tool: String,
        #[source]
        source: which::Error,
    },
}

/// Check the input file and that every tool in `required_tools` is on PATH.
pub fn validate_input<S: AsRef<str>>(
    path: &Path,
    required_tools: &[S],
) -> Result<(), ValidationError> {
    if !path.is_file() {
        return Err(ValidationError::NotAFile(path.to_path_buf()));
    }

    if !has_audio_extension(path) {
        return Err(ValidationError::UnsupportedExtension {
            path: path.to_path_buf(),
        });
    }

    for tool in required_tools {
        let tool = tool.as_ref();
        let resolved = which::which(tool).map_err(|source| ValidationError::MissingTool {
            tool: tool.to_owned(),
            source,
        })?;
        tracing::debug!(tool, path = ?resolved.display(), "tool resolved");
    }

    Ok(())
}

/// Case-insensitive check against [`AUDIO_EXTENSIONS`].
pub fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(e)))
}
