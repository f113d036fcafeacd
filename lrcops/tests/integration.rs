//! Integration tests for lrc CLI.

use clap::Parser;
use lrcops::cli::{Cli, run_cli};

/// Audio file to transcribe, e.g. `LRCOPS_TEST_AUDIO=/path/to/song.mp3`.
const AUDIO_ENV: &str = "LRCOPS_TEST_AUDIO";

#[test]
#[ignore = "whisper, ffmpeg and model download required"]
fn generates_lrc_next_to_audio() {
    let source = std::env::var(AUDIO_ENV).expect("LRCOPS_TEST_AUDIO should be set");
    let source = std::path::Path::new(&source);

    let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
    let audio = temp_dir.path().join(source.file_name().unwrap());
    std::fs::copy(source, &audio).expect("failed to copy audio");

    let cli = Cli::parse_from([
        "lrc",
        audio.to_str().unwrap(),
        "--model",
        "tiny",
        "--word-timestamps",
    ]);

    run_cli(cli).expect("failed to generate lyrics");

    let lrc_path = audio.with_extension("lrc");

    assert!(
        lrc_path.exists(),
        "LRC file not found: {:?}",
        lrc_path.display()
    );

    // Only the input and the lyrics remain
    let count = std::fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(count, 2);
}
