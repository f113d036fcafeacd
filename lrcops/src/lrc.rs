//! LRC lyrics conversion from SRT subtitle files.

use eyre::{Result, WrapErr, eyre};
use srtlib::{Subtitle, Timestamp};
use std::fs;
use std::path::{Path, PathBuf};

/// Lyrics file extension.
pub const EXTENSION: &str = "lrc";

/// Converter from an SRT file on disk to a lyrics file on disk.
///
/// `Ok(None)` means no lyrics file was produced.
pub trait LyricsConverter {
    fn convert(&self, subtitle: &Path) -> Result<Option<PathBuf>>;
}

impl<F> LyricsConverter for F
where
    F: Fn(&Path) -> Result<Option<PathBuf>>,
{
    fn convert(&self, subtitle: &Path) -> Result<Option<PathBuf>> {
        self(subtitle)
    }
}

/// Writes `<stem>.lrc` next to the SRT file, one line per cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct SrtToLrc;

impl LyricsConverter for SrtToLrc {
    fn convert(&self, subtitle: &Path) -> Result<Option<PathBuf>> {
        let content = fs::read_to_string(subtitle)
            .wrap_err_with(|| format!("failed to read srt: {:?}", subtitle.display()))?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let cues = parse_cues(&content)
            .wrap_err_with(|| format!("failed to parse srt: {:?}", subtitle.display()))?;

        let lines: Vec<String> = cues.iter().map(lrc_line).collect();

        if lines.is_empty() {
            return Ok(None);
        }

        let output = subtitle.with_extension(EXTENSION);

        tracing::debug!(path = ?output.display(), lines = lines.len(), "write lrc file");

        fs::write(&output, lines.join("\n") + "\n")
            .wrap_err_with(|| format!("failed to write lrc: {:?}", output.display()))?;

        Ok(Some(output))
    }
}

/// Read SRT blocks, accepting blocks whose text is empty.
fn parse_cues(content: &str) -> Result<Vec<Subtitle>> {
    let mut cues = Vec::new();
    let mut lines = content.lines().peekable();

    while let Some(line) = lines.next() {
        let index = line.trim().trim_start_matches('\u{feff}');
        if index.is_empty() {
            continue;
        }

        let num: usize = index
            .parse()
            .map_err(|e| eyre!("invalid cue index {index:?}: {e}"))?;

        let timing = lines
            .next()
            .ok_or_else(|| eyre!("cue {num} has no timing line"))?;
        let (start, end) = timing
            .split_once("-->")
            .ok_or_else(|| eyre!("cue {num} has invalid timing {timing:?}"))?;
        let start = Timestamp::parse(start.trim())
            .map_err(|e| eyre!("cue {num} has invalid start time: {e}"))?;
        let end = Timestamp::parse(end.trim())
            .map_err(|e| eyre!("cue {num} has invalid end time: {e}"))?;

        let mut text = Vec::new();
        while let Some(line) = lines.next_if(|l| !l.trim().is_empty()) {
            text.push(line);
        }

        cues.push(Subtitle::new(num, start, end, text.join("\n")));
    }

    Ok(cues)
}

/// Render one cue as `[mm:ss.xx]text`.
fn lrc_line(subtitle: &Subtitle) -> String {
    let text = subtitle
        .text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}{}", format_lrc_timestamp(timestamp_ms(&subtitle.start_time)), text)
}

fn timestamp_ms(timestamp: &Timestamp) -> u64 {
    let (hours, minutes, seconds, ms) = timestamp.get();
    ((hours as u64 * 60 + minutes as u64) * 60 + seconds as u64) * 1000 + ms as u64
}

/// Format milliseconds as an LRC tag `[mm:ss.xx]`.
///
/// Minutes are not wrapped at the hour; centiseconds round with carry.
pub fn format_lrc_timestamp(ms: u64) -> String {
    let cs = (ms + 5) / 10;
    format!("[{:02}:{:02}.{:02}]", cs / 6000, cs % 6000 / 100, cs % 100)
}

/// Display preview of lyrics (first and last lines).
pub fn preview_lyrics(content: &str, head_count: usize, tail_count: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let total = lines.len();

    if total <= head_count + tail_count {
        lines.join("\n")
    } else {
        let mut out = Vec::with_capacity(head_count + tail_count + 1);
        out.extend_from_slice(&lines[..head_count]);
        out.push("...");
        out.extend_from_slice(&lines[(total - tail_count)..]);
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert_str(srt: &str) -> Option<String> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.srt");
        fs::write(&path, srt).unwrap();

        SrtToLrc
            .convert(&path)
            .unwrap()
            .map(|p| {
                assert_eq!(p, dir.path().join("song.lrc"));
                fs::read_to_string(p).unwrap()
            })
    }

    #[test]
    fn formats_lrc_timestamps() {
        assert_eq!(format_lrc_timestamp(0), "[00:00.00]");
        assert_eq!(format_lrc_timestamp(61_230), "[01:01.23]");
        assert_eq!(format_lrc_timestamp(59_996), "[01:00.00]");
        assert_eq!(format_lrc_timestamp(3_723_456), "[62:03.46]");
    }

    #[test]
    fn converts_cues_to_lines() {
        let lrc = convert_str(
            "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n\
             2\n00:01:02,340 --> 00:01:03,000\nworld\n\n",
        );

        assert_eq!(lrc.as_deref(), Some("[00:01.00]Hello\n[01:02.34]world\n"));
    }

    #[test]
    fn joins_multiline_text() {
        let lrc = convert_str("1\n00:00:05,000 --> 00:00:06,000\nfirst line\nsecond line\n\n");

        assert_eq!(lrc.as_deref(), Some("[00:05.00]first line second line\n"));
    }

    #[test]
    fn keeps_cues_without_text() {
        let lrc = convert_str(
            "1\n00:00:01,000 --> 00:00:02,000\n\n\
             2\n00:00:02,000 --> 00:00:03,000\nhello\n\n",
        );

        assert_eq!(lrc.as_deref(), Some("[00:01.00]\n[00:02.00]hello\n"));
    }

    #[test]
    fn malformed_timing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.srt");
        fs::write(&path, "1\nnot a timing line\nhello\n").unwrap();

        assert!(SrtToLrc.convert(&path).is_err());
    }

    #[test]
    fn empty_subtitle_file_yields_nothing() {
        assert_eq!(convert_str(""), None);
        assert_eq!(convert_str("\n\n"), None);
    }

    #[test]
    fn missing_subtitle_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(SrtToLrc.convert(&dir.path().join("nope.srt")).is_err());
    }

    #[test]
    fn closures_are_converters() {
        let converter = |path: &Path| -> Result<Option<PathBuf>> { Ok(Some(path.with_extension("x"))) };

        assert_eq!(
            converter.convert(Path::new("a.srt")).unwrap(),
            Some(PathBuf::from("a.x"))
        );
    }

    #[test]
    fn previews_head_and_tail() {
        let content = "1\n2\n3\n4\n5\n6\n7\n";

        assert_eq!(preview_lyrics(content, 2, 2), "1\n2\n...\n6\n7");
        assert_eq!(preview_lyrics("1\n2\n", 2, 2), "1\n2");
    }
}
