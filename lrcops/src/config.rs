//! Configuration types for resolved CLI arguments.
//!
//! Args structs (for CLI parsing) remain in cli.rs.

use crate::cli::Cli;
use eyre::{Result, ensure};
use lrcops_asr::options::TranscribeOptions;
use std::path::PathBuf;

/// Resolved configuration for one lyrics generation run.
#[derive(Clone, Debug)]
pub struct Config {
    /// Input audio file
    pub path: PathBuf,
    /// Model identifier passed to the loader
    pub model: String,
    pub options: TranscribeOptions,
    /// Whisper program name or path
    pub whisper: String,
    /// Print a preview of the generated lyrics
    pub preview: bool,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>, model: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            model: model.into(),
            options: TranscribeOptions::default(),
            whisper: lrcops_asr::whisper::DEFAULT_PROGRAM.to_owned(),
            preview: false,
        }
    }
}

impl TryFrom<Cli> for Config {
    type Error = eyre::Error;

    fn try_from(args: Cli) -> Result<Self> {
        let model = args.model.trim().to_owned();
        ensure!(!model.is_empty(), "model identifier must not be empty");

        Ok(Self {
            path: args.path,
            model,
            options: TranscribeOptions::new(Some(args.language.as_str()), args.word_timestamps),
            whisper: args.whisper,
            preview: args.preview,
        })
    }
}
