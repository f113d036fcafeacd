//! lrcops: speech transcription to SRT subtitles to LRC lyrics.
//!
//! The [`pipeline::Pipeline`] validates the input, loads a model through
//! [`lrcops_asr::traits::ModelLoader`], builds SRT cues with [`srt::build_cues`],
//! converts them with a [`lrc::LyricsConverter`] and places the lyrics next to
//! the input. Intermediate files live in a [`workspace::TempWorkspace`].

pub mod cli;
pub mod config;
pub mod lrc;
pub mod pipeline;
pub mod srt;
pub mod validate;
pub mod workspace;
