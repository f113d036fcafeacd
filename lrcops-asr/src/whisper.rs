//! Whisper backend driven through the `whisper` command-line program.
//!
//! The program writes its result as `<stem>.json` into an output directory;
//! the backend points that directory at a private temp dir and reads the file back.

use crate::error::{LoadError, Result, TranscribeError};
use crate::options::TranscribeOptions;
use crate::traits::{ModelLoader, Transcriber};
use crate::types::TranscriptionResult;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

/// Default program name looked up on PATH.
pub const DEFAULT_PROGRAM: &str = "whisper";

/// Model names accepted by the whisper program.
pub const KNOWN_MODELS: &[&str] = &[
    "tiny.en",
    "tiny",
    "base.en",
    "base",
    "small.en",
    "small",
    "medium.en",
    "medium",
    "large-v1",
    "large-v2",
    "large-v3",
    "large",
    "large-v3-turbo",
    "turbo",
];

/// Loader resolving the whisper program and validating model identifiers.
#[derive(Clone, Debug)]
pub struct WhisperCli {
    program: String,
}

impl WhisperCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for WhisperCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ModelLoader for WhisperCli {
    type Model = WhisperModel;

    fn load(&self, model_id: &str) -> Result<WhisperModel> {
        let program = which::which(&self.program).map_err(|source| LoadError::ProgramNotFound {
            program: self.program.clone(),
            source,
        })?;

        if !is_known_model(model_id) && !Path::new(model_id).is_file() {
            return Err(LoadError::UnknownModel(model_id.to_owned()).into());
        }

        tracing::debug!(program = %program.display(), model = model_id, "whisper resolved");

        Ok(WhisperModel {
            program,
            model: model_id.to_owned(),
        })
    }
}

/// Whether `model_id` names a released whisper model.
pub fn is_known_model(model_id: &str) -> bool {
    KNOWN_MODELS.contains(&model_id)
}

/// Resolved whisper program bound to a model.
#[derive(Clone, Debug)]
pub struct WhisperModel {
    program: PathBuf,
    model: String,
}

impl WhisperModel {
    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the argument list for one transcription call.
    pub fn args(
        &self,
        audio: &Path,
        output_dir: &Path,
        options: &TranscribeOptions,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            audio.into(),
            "--model".into(),
            self.model.as_str().into(),
            "--output_format".into(),
            "json".into(),
            "--output_dir".into(),
            output_dir.into(),
            "--verbose".into(),
            "False".into(),
            "--word_timestamps".into(),
            py_bool(options.word_timestamps).into(),
            "--beam_size".into(),
            options.decoding.beam_size.to_string().into(),
            "--fp16".into(),
            py_bool(options.decoding.fp16).into(),
        ];

        if let Some(language) = &options.language {
            args.push("--language".into());
            args.push(language.into());
        }

        args
    }
}

impl Transcriber for WhisperModel {
    fn transcribe(
        &mut self,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        let stem = audio
            .file_stem()
            .ok_or_else(|| TranscribeError::InvalidAudioPath(audio.to_path_buf()))?;

        let output_dir = tempfile::Builder::new()
            .prefix("lrcops-whisper-")
            .tempdir()?;

        tracing::debug!(
            program = %self.program.display(),
            model = self.model,
            language = ?options.language,
            word_timestamps = options.word_timestamps,
            "running whisper"
        );

        let s = Instant::now();

        let output = Command::new(&self.program)
            .args(self.args(audio, output_dir.path(), options))
            .stdin(Stdio::null())
            .output()?;

        tracing::debug!(elapsed = ?s.elapsed(), status = %output.status, "whisper exited");

        if !output.status.success() {
            return Err(TranscribeError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            }
            .into());
        }

        let mut file_name = stem.to_os_string();
        file_name.push(".json");
        let json_path = output_dir.path().join(file_name);

        if !json_path.is_file() {
            return Err(TranscribeError::MissingOutput(json_path).into());
        }

        let reader = BufReader::new(File::open(&json_path)?);
        let result: TranscriptionResult = serde_json::from_reader(reader)?;

        tracing::debug!(
            segments = result.segments.len(),
            language = ?result.language,
            "whisper result parsed"
        );

        Ok(result)
    }
}

/// Format a flag the way the whisper argument parser expects.
fn py_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
