//! SRT subtitle conversion utilities.
//!
//! Converts transcription segments into SRT cues, one per word or one per
//! segment depending on the timing data each segment carries.

use lrcops_asr::types::{Granularity, TranscriptionResult};
use std::fmt;

/// Subtitle file extension.
pub const EXTENSION: &str = "srt";

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Format seconds as an SRT clock string `HH:MM:SS,mmm`.
///
/// The value is rounded to the nearest millisecond, ties to even, before
/// splitting into fields, so carries propagate (`59.9996` becomes `00:01:00,000`).
///
/// # Panics
///
/// Panics if `secs` is negative or NaN.
pub fn format_timecode(secs: f64) -> String {
    assert!(secs >= 0.0, "non-negative timestamp expected, got {secs}");

    let mut ms = (secs * 1000.0).round_ties_even() as u64;

    let hours = ms / MS_PER_HOUR;
    ms %= MS_PER_HOUR;

    let minutes = ms / MS_PER_MINUTE;
    ms %= MS_PER_MINUTE;

    let seconds = ms / MS_PER_SECOND;
    ms %= MS_PER_SECOND;

    format!("{hours:02}:{minutes:02}:{seconds:02},{ms:03}")
}

/// Single timed subtitle entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtitleCue {
    pub index: usize,
    pub start: String,
    pub end: String,
    pub text: String,
}

impl SubtitleCue {
    fn new(index: usize, start: f64, end: f64, text: &str) -> Self {
        Self {
            index,
            start: format_timecode(start),
            end: format_timecode(end),
            text: text.trim().to_owned(),
        }
    }
}

impl fmt::Display for SubtitleCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{} --> {}\n{}\n\n",
            self.index, self.start, self.end, self.text
        )
    }
}

/// Ordered cues forming one SRT file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtitleDocument {
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleDocument {
    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cues.iter().try_for_each(|cue| write!(f, "{cue}"))
    }
}

/// Convert a transcription into SRT cues.
///
/// Segments with word timings contribute one cue per word; the rest
/// contribute one cue each. Indices run from 1 across the whole document.
/// Input order is kept as is.
pub fn build_cues(result: &TranscriptionResult) -> SubtitleDocument {
    let mut cues: Vec<SubtitleCue> = Vec::new();

    for segment in &result.segments {
        match segment.granularity() {
            Granularity::Words(words) => {
                for word in words {
                    cues.push(SubtitleCue::new(
                        cues.len() + 1,
                        word.start,
                        word.end,
                        &word.word,
                    ));
                }
            }
            Granularity::Segment => cues.push(SubtitleCue::new(
                cues.len() + 1,
                segment.start,
                segment.end,
                &segment.text,
            )),
        }
    }

    SubtitleDocument { cues }
}
