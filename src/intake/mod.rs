//! Loading chat exports from disk.
//!
//! An export is a bare `.txt` transcript, a `.zip` "export with media"
//! archive, or a directory holding an extracted export: one `.txt`
//! transcript plus the media files it mentions. Media files are indexed by
//! base filename so message bodies can be resolved against them.
//!
//! Media inside an archive is not extracted. Its locator is
//! `<archive path>!/<entry name>`.

mod error;

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zip::ZipArchive;

use crate::media::{resolve_media, MediaLookup};
use crate::transcript::{parse, Message};

pub use error::IntakeError;

/// File extensions registered as media when loading an export directory.
pub const MEDIA_FILE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "mp4", "mov", "avi"];

/// Extension of transcript files.
const TRANSCRIPT_EXTENSION: &str = "txt";

/// Extension of export archives.
const ARCHIVE_EXTENSION: &str = "zip";

/// Resource-fork entries added by macOS archivers.
const MACOS_METADATA_DIR: &str = "__MACOSX/";

/// Transcript text and media files loaded from one export.
#[derive(Debug, Clone)]
pub struct LoadedChat {
    /// The transcript file that was read.
    pub source: PathBuf,
    pub text: String,
    pub media: MediaLookup,
}

impl LoadedChat {
    /// Parse the transcript and attach the export's media files.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = parse(&self.text);
        resolve_media(&mut messages, &self.media);
        messages
    }
}

/// Load an export from a `.txt` file, a `.zip` archive or an export directory.
pub fn load(path: impl AsRef<Path>) -> Result<LoadedChat, IntakeError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(IntakeError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        return load_directory(path);
    }

    if has_extension(path, &[ARCHIVE_EXTENSION]) {
        return load_archive(path);
    }

    if !has_extension(path, &[TRANSCRIPT_EXTENSION]) {
        return Err(IntakeError::UnsupportedFile {
            path: path.to_path_buf(),
        });
    }

    let text = read_text(path)?;
    info!(path = %path.display(), "loaded transcript");

    Ok(LoadedChat {
        source: path.to_path_buf(),
        text,
        media: MediaLookup::new(),
    })
}

fn load_directory(dir: &Path) -> Result<LoadedChat, IntakeError> {
    let mut files = Vec::new();
    collect_files(dir, &mut files)?;
    files.sort();

    let source = files
        .iter()
        .find(|file| has_extension(file, &[TRANSCRIPT_EXTENSION]))
        .cloned()
        .ok_or_else(|| IntakeError::NoTranscript {
            path: dir.to_path_buf(),
        })?;

    let mut media = MediaLookup::new();
    for file in files
        .iter()
        .filter(|file| has_extension(file, MEDIA_FILE_EXTENSIONS))
    {
        if let Some(name) = file.file_name().and_then(|n| n.to_str()) {
            debug!(file = name, "registered media file");
            media.insert(name, file.display().to_string());
        }
    }

    let text = read_text(&source)?;
    info!(
        path = %source.display(),
        media_files = media.len(),
        "loaded export directory"
    );

    Ok(LoadedChat {
        source,
        text,
        media,
    })
}

fn load_archive(path: &Path) -> Result<LoadedChat, IntakeError> {
    let archive_error = |source| IntakeError::Archive {
        path: path.to_path_buf(),
        source,
    };
    let read_error = |source| IntakeError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_error)?;
    let mut archive = ZipArchive::new(file).map_err(archive_error)?;

    let mut entries: Vec<String> = archive
        .file_names()
        .filter(|name| !name.ends_with('/') && !name.starts_with(MACOS_METADATA_DIR))
        .map(str::to_string)
        .collect();
    entries.sort();

    let transcript = entries
        .iter()
        .find(|name| has_extension(Path::new(name), &[TRANSCRIPT_EXTENSION]))
        .ok_or_else(|| IntakeError::NoTranscript {
            path: path.to_path_buf(),
        })?;

    let mut bytes = Vec::new();
    archive
        .by_name(transcript)
        .map_err(archive_error)?
        .read_to_end(&mut bytes)
        .map_err(read_error)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let mut media = MediaLookup::new();
    for name in entries
        .iter()
        .filter(|name| has_extension(Path::new(name), MEDIA_FILE_EXTENSIONS))
    {
        let base = name.rsplit('/').next().unwrap_or(name.as_str());
        debug!(file = base, "registered archive media entry");
        media.insert(base, format!("{}!/{}", path.display(), name));
    }

    info!(
        path = %path.display(),
        entry = %transcript,
        media_files = media.len(),
        "loaded export archive"
    );

    Ok(LoadedChat {
        source: path.join(transcript),
        text,
        media,
    })
}

/// Recursively collect regular files under `dir`.
fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IntakeError> {
    let entries = fs::read_dir(dir).map_err(|source| IntakeError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| IntakeError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else {
            files.push(path);
        }
    }
    Ok(())
}

/// Read a transcript, replacing invalid UTF-8 rather than failing.
fn read_text(path: &Path) -> Result<String, IntakeError> {
    let bytes = fs::read(path).map_err(|source| IntakeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
