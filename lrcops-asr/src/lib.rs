//! lrcops-asr: transcription data model and speech recognition backends.
//!
//! The crate keeps recognition behind two traits so the rest of the
//! tool never depends on a particular model runtime:
//!
//! - [`traits::ModelLoader`]: resolves a model identifier into a loaded model
//! - [`traits::Transcriber`]: turns an audio file into a [`types::TranscriptionResult`]
//!
//! [`whisper::WhisperCli`] implements both on top of the `whisper` program.
//!
//! # Quick Start
//!
//! ```ignore
//! use lrcops_asr::options::TranscribeOptions;
//! use lrcops_asr::traits::{ModelLoader, Transcriber};
//! use lrcops_asr::whisper::WhisperCli;
//!
//! let mut model = WhisperCli::default().load("base")?;
//! let result = model.transcribe("song.mp3".as_ref(), &TranscribeOptions::new(None, true))?;
//! println!("{} segments", result.segments.len());
//! ```

pub mod error;
pub mod options;
pub mod traits;
pub mod types;
pub mod whisper;
