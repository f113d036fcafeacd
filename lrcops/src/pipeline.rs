//! Lyrics generation pipeline for a single audio file.
//!
//! Validation and model loading are fatal and surface as `Err`. Everything
//! after that runs inside a [`TempWorkspace`] and is reported as a
//! [`FileOutcome`], so a failed file never changes the exit status.

use crate::config::Config;
use crate::lrc::{self, LyricsConverter};
use crate::srt;
use crate::validate::validate_input;
use crate::workspace::TempWorkspace;
use eyre::{OptionExt, Result, WrapErr};
use lrcops_asr::traits::{ModelLoader, Transcriber};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Last stage a file reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Validated,
    ModelLoaded,
    Transcribed,
    CuesBuilt,
    SubtitlePersisted,
    Converted,
    Placed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validated => "validated",
            Stage::ModelLoaded => "model_loaded",
            Stage::Transcribed => "transcribed",
            Stage::CuesBuilt => "cues_built",
            Stage::SubtitlePersisted => "subtitle_persisted",
            Stage::Converted => "converted",
            Stage::Placed => "placed",
        };
        f.write_str(name)
    }
}

/// Result of processing one file after the fatal stages succeeded.
#[derive(Debug)]
pub enum FileOutcome {
    /// Lyrics written to the given path
    Placed(PathBuf),
    /// Transcription produced no cues
    Empty,
    /// Converter produced no lyrics file
    NotConverted,
    /// A stage failed; `stage` is the last one that completed
    Failed { stage: Stage, error: eyre::Report },
}

impl FileOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, FileOutcome::Placed(_))
    }
}

/// Staged orchestrator over a model loader and a lyrics converter.
#[derive(Debug)]
pub struct Pipeline<L, C> {
    loader: L,
    converter: C,
    required_tools: Vec<String>,
}

impl<L, C> Pipeline<L, C>
where
    L: ModelLoader,
    C: LyricsConverter,
{
    pub fn new(loader: L, converter: C) -> Self {
        Self {
            loader,
            converter,
            required_tools: Vec::new(),
        }
    }

    /// Programs that must be on PATH before the model is loaded.
    pub fn with_required_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    /// Run every stage for `config.path`.
    ///
    /// Returns `Err` only for failures before the workspace exists.
    pub fn run(&self, config: &Config) -> Result<FileOutcome> {
        validate_input(&config.path, self.required_tools.as_slice())?;

        tracing::info!(model = config.model, "loading model");

        let s = Instant::now();

        let mut model = self
            .loader
            .load(&config.model)
            .wrap_err_with(|| format!("failed to load model: {}", config.model))?;

        let d = s.elapsed();
        tracing::info!(duration = %format_secs(d.as_secs_f32()), "model loaded");

        let workspace_parent = parent_dir(&config.path);
        let mut workspace = TempWorkspace::create_in(workspace_parent).wrap_err_with(|| {
            format!(
                "failed to create workspace in {:?}",
                workspace_parent.display()
            )
        })?;

        tracing::info!(input = ?config.path.display(), "processing");

        let mut stage = Stage::ModelLoaded;
        let outcome = match self.process(&mut model, config, &mut workspace, &mut stage) {
            Ok(outcome) => outcome,
            Err(error) => FileOutcome::Failed { stage, error },
        };

        drop(workspace);

        log_outcome(&config.path, &outcome);

        Ok(outcome)
    }

    /// Stages 3 to 7. `stage` tracks the last completed stage.
    fn process(
        &self,
        model: &mut L::Model,
        config: &Config,
        workspace: &mut TempWorkspace,
        stage: &mut Stage,
    ) -> Result<FileOutcome> {
        let s = Instant::now();

        let result = model
            .transcribe(&config.path, &config.options)
            .wrap_err("transcription failed")?;
        *stage = Stage::Transcribed;

        let d = s.elapsed();
        tracing::info!(
            duration = %format_secs(d.as_secs_f32()),
            segments = result.segments.len(),
            language = ?result.language,
            "inference completed"
        );

        let document = srt::build_cues(&result);
        if document.is_empty() {
            return Ok(FileOutcome::Empty);
        }
        *stage = Stage::CuesBuilt;

        let stem = config
            .path
            .file_stem()
            .ok_or_eyre("input path has no file name")?;
        let subtitle = workspace
            .persist_subtitle(stem, &document)
            .wrap_err("failed to write srt")?;
        *stage = Stage::SubtitlePersisted;

        let Some(lyrics) = self
            .converter
            .convert(&subtitle)
            .wrap_err_with(|| format!("failed to convert srt: {:?}", subtitle.display()))?
        else {
            return Ok(FileOutcome::NotConverted);
        };
        workspace.track_lyrics(lyrics);
        *stage = Stage::Converted;

        let target = config.path.with_extension(lrc::EXTENSION);
        let placed = workspace
            .place_lyrics(&target)
            .wrap_err_with(|| format!("failed to move lrc to {:?}", target.display()))?;
        if !placed {
            return Ok(FileOutcome::NotConverted);
        }
        *stage = Stage::Placed;

        Ok(FileOutcome::Placed(target))
    }
}

fn log_outcome(input: &Path, outcome: &FileOutcome) {
    let input = input.display();

    match outcome {
        FileOutcome::Placed(path) => {
            tracing::info!(path = ?path.display(), "successfully generated lrc file")
        }
        FileOutcome::Empty => tracing::warn!(input = ?input, "whisper produced no output"),
        FileOutcome::NotConverted => tracing::error!(input = ?input, "lrc file not generated"),
        FileOutcome::Failed { stage, error } => {
            tracing::error!(input = ?input, %stage, error = ?error, "processing failed")
        }
    }
}

/// Directory containing `path`, or the current directory for bare file names.
fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Format seconds as a string with two decimal places.
fn format_secs(secs: f32) -> String {
    format!("{:.2}s", secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_ordered() {
        assert!(Stage::Validated < Stage::ModelLoaded);
        assert!(Stage::Converted < Stage::Placed);
        assert_eq!(Stage::SubtitlePersisted.to_string(), "subtitle_persisted");
    }

    #[test]
    fn parent_of_bare_name_is_cwd() {
        assert_eq!(parent_dir(Path::new("song.mp3")), Path::new("."));
        assert_eq!(parent_dir(Path::new("music/song.mp3")), Path::new("music"));
    }

    #[test]
    fn formats_seconds() {
        assert_eq!(format_secs(1.234), "1.23s");
    }
}
