//! Scoped temporary directory for intermediate subtitle and lyrics files.
//!
//! Everything tracked here is removed when the guard drops, whether the
//! pipeline returned normally, bailed out early, or is unwinding from a panic.

use crate::srt::{self, SubtitleDocument};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};

const PREFIX: &str = ".lrcops-";

/// Drop guard owning one file's intermediate artifacts.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: Option<TempDir>,
    subtitle: Option<PathBuf>,
    lyrics: Option<PathBuf>,
}

impl TempWorkspace {
    /// Create a uniquely named workspace directory inside `parent`.
    pub fn create_in(parent: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(PREFIX).tempdir_in(parent)?;

        tracing::debug!(path = ?dir.path().display(), "workspace created");

        Ok(Self {
            dir: Some(dir),
            subtitle: None,
            lyrics: None,
        })
    }

    pub fn path(&self) -> &Path {
        match &self.dir {
            Some(dir) => dir.path(),
            None => Path::new(""),
        }
    }

    /// Write `<stem>.srt` inside the workspace and track it for cleanup.
    pub fn persist_subtitle(
        &mut self,
        stem: &OsStr,
        document: &SubtitleDocument,
    ) -> io::Result<PathBuf> {
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(srt::EXTENSION);

        let path = self.path().join(file_name);
        self.subtitle = Some(path.clone());

        fs::write(&path, document.to_string())?;

        tracing::debug!(path = ?path.display(), cues = document.len(), "write srt file");

        Ok(path)
    }

    /// Track a produced lyrics file until it is placed.
    pub fn track_lyrics(&mut self, path: PathBuf) {
        self.lyrics = Some(path);
    }

    /// Move the tracked lyrics file to `target`, replacing any existing file.
    ///
    /// Returns `Ok(false)` when no lyrics file is tracked or it does not exist.
    pub fn place_lyrics(&mut self, target: &Path) -> io::Result<bool> {
        let Some(source) = self.lyrics.as_deref().filter(|p| p.is_file()) else {
            return Ok(false);
        };

        move_file(source, target)?;
        self.lyrics = None;

        Ok(true)
    }

    fn cleanup(&mut self) {
        for path in [self.subtitle.take(), self.lyrics.take()].into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!(path = ?path.display(), error = %e, "failed to delete temp file");
            }
        }

        if let Some(dir) = self.dir.take() {
            let path = dir.path().to_path_buf();
            match dir.close() {
                Ok(()) => tracing::debug!(path = ?path.display(), "workspace removed"),
                Err(e) => {
                    tracing::warn!(path = ?path.display(), error = %e, "failed to delete temp directory")
                }
            }
        }
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// Rename, falling back to copy and delete when crossing filesystems.
///
/// The fallback copies into a sibling temp file and renames it over `target`,
/// so a failed copy never leaves a partial file at the destination.
fn move_file(source: &Path, target: &Path) -> io::Result<()> {
    if fs::rename(source, target).is_ok() {
        return Ok(());
    }

    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)?;
    io::copy(&mut fs::File::open(source)?, &mut staged)?;
    staged.persist(target).map_err(|e| e.error)?;
    fs::remove_file(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::srt::build_cues;
    use lrcops_asr::types::{Segment, TranscriptionResult};
    use std::panic::AssertUnwindSafe;

    fn document() -> SubtitleDocument {
        build_cues(&TranscriptionResult::new(vec![Segment::new("hi", 0.0, 1.0)]))
    }

    fn entries(dir: &Path) -> Vec<PathBuf> {
        let mut entries: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        entries.sort();
        entries
    }

    #[test]
    fn removes_directory_on_drop() {
        let parent = tempfile::tempdir().unwrap();

        let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();
        let srt = workspace
            .persist_subtitle(OsStr::new("song"), &document())
            .unwrap();
        let path = workspace.path().to_path_buf();

        assert!(path.starts_with(parent.path()));
        assert_eq!(srt, path.join("song.srt"));
        assert!(srt.is_file());

        drop(workspace);

        assert!(!path.exists());
        assert!(entries(parent.path()).is_empty());
    }

    #[test]
    fn keeps_dotted_stem() {
        let parent = tempfile::tempdir().unwrap();
        let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();

        let srt = workspace
            .persist_subtitle(OsStr::new("live.at.home"), &document())
            .unwrap();

        assert_eq!(srt.file_name().unwrap(), "live.at.home.srt");
    }

    #[test]
    fn removes_unplaced_lyrics_outside_workspace() {
        let parent = tempfile::tempdir().unwrap();
        let stray = parent.path().join("stray.lrc");
        fs::write(&stray, "[00:00.00]x\n").unwrap();

        let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();
        workspace.track_lyrics(stray.clone());
        drop(workspace);

        assert!(!stray.exists());
        assert!(entries(parent.path()).is_empty());
    }

    #[test]
    fn places_lyrics_and_stops_tracking() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("song.lrc");

        let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();
        let lyrics = workspace.path().join("song.lrc");
        fs::write(&lyrics, "[00:00.00]hi\n").unwrap();
        workspace.track_lyrics(lyrics.clone());

        assert!(workspace.place_lyrics(&target).unwrap());
        drop(workspace);

        assert!(!lyrics.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "[00:00.00]hi\n");
        assert_eq!(entries(parent.path()), vec![target]);
    }

    #[test]
    fn place_without_lyrics_reports_false() {
        let parent = tempfile::tempdir().unwrap();
        let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();

        assert!(!workspace.place_lyrics(&parent.path().join("x.lrc")).unwrap());

        workspace.track_lyrics(parent.path().join("missing.lrc"));
        assert!(!workspace.place_lyrics(&parent.path().join("x.lrc")).unwrap());
    }

    #[test]
    fn failed_move_leaves_destination_untouched() {
        let parent = tempfile::tempdir().unwrap();
        let target = parent.path().join("song.lrc");
        fs::write(&target, "[00:00.00]old\n").unwrap();

        let result = move_file(&parent.path().join("gone.lrc"), &target);

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "[00:00.00]old\n");
        assert_eq!(entries(parent.path()), vec![target]);
    }

    #[test]
    fn cleans_up_while_unwinding() {
        let parent = tempfile::tempdir().unwrap();
        let path = std::sync::Mutex::new(PathBuf::new());

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let mut workspace = TempWorkspace::create_in(parent.path()).unwrap();
            workspace
                .persist_subtitle(OsStr::new("song"), &document())
                .unwrap();
            *path.lock().unwrap() = workspace.path().to_path_buf();
            panic!("transcriber blew up");
        }));

        assert!(result.is_err());
        assert!(!path.lock().unwrap().exists());
        assert!(entries(parent.path()).is_empty());
    }
}
