//! Core types for lrcops-asr

use serde::Deserialize;

/// Transcription output from a speech recognition backend.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TranscriptionResult {
    /// Segments in the order the backend emitted them
    pub segments: Vec<Segment>,
    /// Language requested or detected by the backend, when reported
    #[serde(default)]
    pub language: Option<String>,
}

impl TranscriptionResult {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            language: None,
        }
    }
}

/// Text segment with timestamps.
///
/// Represents a portion of transcribed text with start and end times in seconds,
/// optionally subdivided into words.
#[derive(Clone, Debug, Deserialize)]
pub struct Segment {
    /// Transcribed text
    pub text: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
    /// Word timings, present when word-level timestamps were requested
    #[serde(default)]
    pub words: Option<Vec<Word>>,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            words: None,
        }
    }

    pub fn with_words(mut self, words: Vec<Word>) -> Self {
        self.words = Some(words);
        self
    }

    /// Granularity at which this segment should be rendered.
    ///
    /// A missing or empty word list falls back to the segment itself.
    pub fn granularity(&self) -> Granularity<'_> {
        match self.words.as_deref() {
            Some(words) if !words.is_empty() => Granularity::Words(words),
            _ => Granularity::Segment,
        }
    }
}

/// Single timed word within a segment.
#[derive(Clone, Debug, Deserialize)]
pub struct Word {
    /// Word text, possibly with surrounding whitespace
    pub word: String,
    /// Start time in seconds
    pub start: f64,
    /// End time in seconds
    pub end: f64,
}

impl Word {
    pub fn new(word: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            word: word.into(),
            start,
            end,
        }
    }
}

/// Timing granularity of a segment.
#[derive(Clone, Copy, Debug)]
pub enum Granularity<'a> {
    /// One entry per word, using each word's own timing
    Words(&'a [Word]),
    /// One entry for the whole segment
    Segment,
}
