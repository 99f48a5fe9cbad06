//! Loading export files and directories

use std::fs;

use chatview::intake::{self, IntakeError};
use chatview::media::MediaKind;

use crate::helpers::{fixtures_dir, temp_transcript};

#[test]
fn export_directory_resolves_registered_media() {
    let chat = intake::load(fixtures_dir().join("export")).unwrap();
    assert!(chat.source.ends_with("WhatsApp Chat with Alice.txt"));
    assert_eq!(chat.media.len(), 2);

    let messages = chat.messages();
    assert_eq!(messages.len(), 6);

    let image = &messages[2];
    assert_eq!(image.media_kind(), Some(MediaKind::Image));
    assert!(image
        .media_locator()
        .unwrap()
        .ends_with("IMG-20231205-WA0001.jpg"));

    let video = &messages[3];
    assert_eq!(video.media_kind(), Some(MediaKind::Video));
    assert!(video
        .media_locator()
        .unwrap()
        .ends_with("00000007-VIDEO.mp4"));
}

#[test]
fn voice_note_without_file_stays_unresolved() {
    let messages = intake::load(fixtures_dir().join("export"))
        .unwrap()
        .messages();
    let voice = &messages[4];
    assert!(voice.is_media_reference);
    assert!(voice.media.is_none());
}

#[test]
fn plain_text_file_has_no_media() {
    let chat = intake::load(fixtures_dir().join("chat.txt")).unwrap();
    assert!(chat.media.is_empty());
    assert!(chat.messages().iter().all(|m| m.media.is_none()));
}

#[test]
fn missing_path_is_not_found() {
    let err = intake::load(fixtures_dir().join("nope.txt")).unwrap_err();
    assert!(matches!(err, IntakeError::NotFound { .. }));
}

#[test]
fn non_text_file_is_rejected() {
    let (_dir, path) = temp_transcript("chat.pdf", "%PDF-1.7");
    let err = intake::load(&path).unwrap_err();
    assert!(matches!(err, IntakeError::UnsupportedFile { .. }));
}

#[test]
fn directory_without_transcript_is_rejected() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("photo.jpg"), b"jpg").unwrap();

    let err = intake::load(dir.path()).unwrap_err();
    assert!(matches!(err, IntakeError::NoTranscript { .. }));
}

#[test]
fn uppercase_extensions_are_recognized() {
    let (dir, _) = temp_transcript(
        "CHAT.TXT",
        "1/1/24, 9:00 - A: PHOTO.JPG (file attached)",
    );
    fs::write(dir.path().join("PHOTO.JPG"), b"jpg").unwrap();

    let messages = intake::load(dir.path()).unwrap().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].media_kind(), Some(MediaKind::Image));
}

#[test]
fn export_archive_resolves_media_entries() {
    let archive = fixtures_dir().join("export.zip");
    let chat = intake::load(&archive).unwrap();
    assert_eq!(chat.media.len(), 2);

    let messages = chat.messages();
    assert_eq!(messages.len(), 6);

    assert_eq!(messages[2].media_kind(), Some(MediaKind::Image));
    assert_eq!(
        messages[2].media_locator(),
        Some(format!("{}!/IMG-20231205-WA0001.jpg", archive.display()).as_str())
    );
    assert_eq!(messages[3].media_kind(), Some(MediaKind::Video));
    assert!(messages[4].media.is_none());
}

#[test]
fn archive_and_directory_exports_agree() {
    let from_archive = intake::load(fixtures_dir().join("export.zip"))
        .unwrap()
        .messages();
    let from_directory = intake::load(fixtures_dir().join("export"))
        .unwrap()
        .messages();

    assert_eq!(from_archive.len(), from_directory.len());
    for (a, b) in from_archive.iter().zip(&from_directory) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.text, b.text);
        assert_eq!(a.media_kind(), b.media_kind());
    }
}
