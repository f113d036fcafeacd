//! CLI argument definitions using clap.

use crate::config::Config;
use crate::lrc::{self, SrtToLrc};
use crate::pipeline::{FileOutcome, Pipeline};
use crate::validate::REQUIRED_TOOL;
use clap::Parser;
use color_eyre::Section;
use eyre::Result;
use lrcops_asr::error::{Error as AsrError, LoadError};
use lrcops_asr::options::AUTO_LANGUAGE;
use lrcops_asr::whisper::{DEFAULT_PROGRAM, KNOWN_MODELS, WhisperCli};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lrc")]
#[command(about = "Generate LRC lyrics for a single audio file using Whisper")]
#[command(version)]
pub struct Cli {
    /// Path to the audio file
    pub path: PathBuf,

    /// Whisper model to use (e.g. tiny, base, small, medium, large)
    #[arg(short, long, default_value = "base")]
    pub model: String,

    /// Language of the audio file (e.g. en, ja, auto)
    #[arg(short, long, default_value = AUTO_LANGUAGE)]
    pub language: String,

    /// Enable word-level timestamps
    #[arg(short, long, alias = "word_timestamps")]
    pub word_timestamps: bool,

    /// Whisper program name or path
    #[arg(long, env = "LRCOPS_WHISPER", default_value = DEFAULT_PROGRAM)]
    pub whisper: String,

    /// Print the first and last lyrics lines after generation
    #[arg(long)]
    pub preview: bool,
}

/// Execute CLI command - separated for testing.
pub fn run_cli(cli: Cli) -> Result<()> {
    tracing::debug!(?cli, "parsed arguments");

    let config = Config::try_from(cli)?;

    let pipeline = Pipeline::new(WhisperCli::new(&config.whisper), SrtToLrc)
        .with_required_tools([REQUIRED_TOOL]);

    let outcome = pipeline.run(&config).map_err(|e| {
        match e.downcast_ref::<AsrError>().and_then(load_hint) {
            Some(hint) => e.suggestion(hint),
            None => e,
        }
    })?;

    if let FileOutcome::Placed(path) = &outcome
        && config.preview
    {
        match std::fs::read_to_string(path) {
            Ok(content) => println!("{}", lrc::preview_lyrics(&content, 3, 3)),
            Err(e) => tracing::warn!(path = ?path.display(), error = %e, "failed to read lyrics for preview"),
        }
    }

    tracing::info!("processing finished");

    Ok(())
}

/// Suggestion matching a model loading failure.
fn load_hint(error: &AsrError) -> Option<String> {
    match error {
        AsrError::Load(LoadError::UnknownModel(_)) => Some(format!(
            "pass --model with one of: {}, or a path to a checkpoint",
            KNOWN_MODELS.join(", ")
        )),
        AsrError::Load(LoadError::ProgramNotFound { .. }) => Some(
            "install openai-whisper, or pass --whisper (or set LRCOPS_WHISPER) to point at the program"
                .to_owned(),
        ),
        _ => None,
    }
}
