//! Transcription options passed to backends.

/// Sentinel language value requesting automatic detection.
pub const AUTO_LANGUAGE: &str = "auto";

/// Fixed decoder settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodingParams {
    /// Beam search width
    pub beam_size: u32,
    /// Half-precision inference
    pub fp16: bool,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            beam_size: 5,
            fp16: false,
        }
    }
}

/// Per-call transcription configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranscribeOptions {
    /// Spoken language code, `None` for automatic detection
    pub language: Option<String>,
    /// Request word-level timestamps
    pub word_timestamps: bool,
    pub decoding: DecodingParams,
}

impl TranscribeOptions {
    /// Build options from a user-facing language string.
    ///
    /// Empty strings and [`AUTO_LANGUAGE`] (any case) select automatic detection.
    pub fn new(language: Option<&str>, word_timestamps: bool) -> Self {
        Self {
            language: normalize_language(language),
            word_timestamps,
            decoding: DecodingParams::default(),
        }
    }
}

/// Map a language argument to a concrete code, or `None` for auto-detection.
pub fn normalize_language(language: Option<&str>) -> Option<String> {
    language
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case(AUTO_LANGUAGE))
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_language_means_detection() {
        assert_eq!(normalize_language(None), None);
        assert_eq!(normalize_language(Some("auto")), None);
        assert_eq!(normalize_language(Some("AUTO")), None);
        assert_eq!(normalize_language(Some("")), None);
        assert_eq!(normalize_language(Some("ja")), Some("ja".to_string()));
    }

    #[test]
    fn default_decoding_params() {
        let options = TranscribeOptions::new(Some("en"), true);

        assert_eq!(options.decoding.beam_size, 5);
        assert!(!options.decoding.fp16);
        assert!(options.word_timestamps);
    }
}
