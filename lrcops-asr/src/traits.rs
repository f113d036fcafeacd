//! Core traits for speech recognition backends.

use crate::error::Result;
use crate::options::TranscribeOptions;
use crate::types::TranscriptionResult;
use std::path::Path;

/// Loaded speech recognition model.
///
/// Implementations may block for a long time; no progress reporting or
/// cancellation is expected.
pub trait Transcriber {
    /// Transcribe the audio file at `audio`.
    ///
    /// Note: Takes `&mut self` so backends can hold mutable inference state.
    fn transcribe(
        &mut self,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult>;
}

/// Factory resolving a model identifier into a ready [`Transcriber`].
pub trait ModelLoader {
    type Model: Transcriber;

    /// Load the model named by `model_id`.
    fn load(&self, model_id: &str) -> Result<Self::Model>;
}

impl<T: Transcriber + ?Sized> Transcriber for Box<T> {
    fn transcribe(
        &mut self,
        audio: &Path,
        options: &TranscribeOptions,
    ) -> Result<TranscriptionResult> {
        (**self).transcribe(audio, options)
    }
}
