//! Integration tests for the chatview CLI

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{config_home, fixtures_dir};

/// Run chatview with an isolated config home and capture output.
fn run_chatview(args: &[&str], home: &Path) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_chatview"))
        .args(args)
        .env("NO_COLOR", "1")
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("CHATVIEW_LOG")
        .output()
        .expect("Failed to execute chatview");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).display().to_string()
}

/// Backend script answering each task with a fixed response.
#[cfg(unix)]
const BACKEND_SCRIPT: &str = r#"input=$(cat)
case "$input" in
  *'"task":"classify"'*) echo 'result: [{"label":"POSITIVE","score":0.93}]' ;;
  *'"task":"translate"'*) echo 'नमस्ते' ;;
  *) echo 'Glad to hear it!' ;;
esac
"#;

/// Config home whose backend runs `BACKEND_SCRIPT`.
#[cfg(unix)]
fn home_with_backend() -> TempDir {
    let home = TempDir::new().unwrap();
    let script = home.path().join("backend.sh");
    fs::write(&script, BACKEND_SCRIPT).unwrap();

    let dir = home.path().join("chatview");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("config.toml"),
        format!(
            "[enrich]\nprogram = \"sh\"\nargs = [\"{}\"]\ntimeout_secs = 10\n",
            script.display()
        ),
    )
    .unwrap();
    home
}

// ============================================================================
// Help Output
// ============================================================================

#[test]
fn help_lists_subcommands() {
    AssertCommand::cargo_bin("chatview")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("languages"));
}

#[test]
fn message_commands_require_id() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_chatview(&["reply", &fixture("chat.txt")], home.path());

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("--id"));
}

// ============================================================================
// Show
// ============================================================================

#[test]
fn show_renders_conversation() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_chatview(&["show", &fixture("chat.txt")], home.path());

    assert_eq!(exit_code, 0);
    insta::assert_snapshot!(stdout, @r###"
12/5/23, 10:01 AM  Alice
    Hello
    how are you?

12/5/23, 10:02 AM  Bob (you)
  > Good!
  > Just got back from the trip

12/5/23, 10:03 AM  Bob (you)
  > [media omitted]
  > IMG-20231205-WA0001.jpg (file attached)

12/5/23, 10:04 AM  Alice
    [media omitted]
    <attached: 00000007-VIDEO.mp4>

12/5/23, 10:05 AM  Bob (you)
  > [media omitted]
  > PTT-20231205-WA0002.opus (file attached)

12/5/23, 10:06 AM  Alice
    see you at 10:30 - don't be late: ok?

6 messages loaded
"###);
}

#[test]
fn show_export_directory_lists_resolved_media() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_chatview(
        &["show", &fixture("export"), "--me", "Alice"],
        home.path(),
    );

    assert_eq!(exit_code, 0);
    insta::with_settings!({filters => vec![
        (r"\[(image|video): [^\]]*/media/", "[$1: [EXPORT]/media/"),
    ]}, {
        insta::assert_snapshot!(stdout, @r###"
12/5/23, 10:01 AM  Alice (you)
  > Hello
  > how are you?

12/5/23, 10:02 AM  Bob
    Good!
    Just got back from the trip

12/5/23, 10:03 AM  Bob
    [image: [EXPORT]/media/IMG-20231205-WA0001.jpg]
    IMG-20231205-WA0001.jpg (file attached)

12/5/23, 10:04 AM  Alice (you)
  > [video: [EXPORT]/media/00000007-VIDEO.mp4]
  > <attached: 00000007-VIDEO.mp4>

12/5/23, 10:05 AM  Bob
    [media omitted]
    PTT-20231205-WA0002.opus (file attached)

12/5/23, 10:06 AM  Alice (you)
  > see you at 10:30 - don't be late: ok?

6 messages loaded
"###);
    });
}

#[test]
fn show_archive_lists_media_entries() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_chatview(&["show", &fixture("export.zip"), "--me", "Alice"], home.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("export.zip!/IMG-20231205-WA0001.jpg]"));
    assert!(stdout.contains("export.zip!/00000007-VIDEO.mp4]"));
    assert!(stdout.ends_with("6 messages loaded\n"));
}

#[test]
fn show_json_emits_message_records() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_chatview(&["show", &fixture("export"), "--json"], home.path());

    assert_eq!(exit_code, 0);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let messages = value.as_array().unwrap();
    assert_eq!(messages.len(), 6);

    assert_eq!(messages[0]["id"], "1-0");
    assert_eq!(messages[0]["sender"], "Alice");
    assert_eq!(messages[0]["isMediaReference"], false);
    assert!(messages[0].get("mediaLocator").is_none());

    assert_eq!(messages[3]["mediaKind"], "video");
    assert!(messages[3]["mediaLocator"]
        .as_str()
        .unwrap()
        .ends_with("00000007-VIDEO.mp4"));

    assert_eq!(messages[4]["isMediaReference"], true);
    assert!(messages[4].get("mediaKind").is_none());
}

#[test]
fn show_uses_me_from_config() {
    let home = config_home("[display]\nme = \"Alice\"\n");
    let (stdout, _stderr, exit_code) = run_chatview(&["show", &fixture("chat.txt")], home.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("10:01 AM  Alice (you)"));
    assert!(!stdout.contains("Bob (you)"));
}

#[test]
fn show_missing_file_fails() {
    let home = TempDir::new().unwrap();
    let (stdout, stderr, exit_code) =
        run_chatview(&["show", &fixture("missing.txt")], home.path());

    assert_eq!(exit_code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("missing.txt"));
}

#[test]
fn show_empty_transcript_reports_zero_messages() {
    let home = TempDir::new().unwrap();
    let (_dir, path) = crate::helpers::temp_transcript("empty.txt", "");
    let (stdout, _stderr, exit_code) =
        run_chatview(&["show", &path.display().to_string()], home.path());

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "0 messages loaded\n");
}

// ============================================================================
// Enrichment
// ============================================================================

#[test]
fn reply_without_backend_fails() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_chatview(
        &["reply", &fixture("chat.txt"), "--id", "1-0"],
        home.path(),
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("No enrichment backend configured"));
}

#[test]
fn unknown_message_id_fails() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) = run_chatview(
        &["emotion", &fixture("chat.txt"), "--id", "99-99"],
        home.path(),
    );

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("No message with id '99-99'"));
}

#[cfg(unix)]
#[test]
fn emotion_uses_backend_classification() {
    let home = home_with_backend();
    let (stdout, _stderr, exit_code) = run_chatview(
        &["emotion", &fixture("chat.txt"), "--id", "3-1"],
        home.path(),
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "😊 happy (0.93)\n");
}

#[cfg(unix)]
#[test]
fn translate_prints_backend_output() {
    let home = home_with_backend();
    let (stdout, _stderr, exit_code) = run_chatview(
        &["translate", &fixture("chat.txt"), "--id", "1-0", "--lang", "hi"],
        home.path(),
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "नमस्ते\n");
}

#[cfg(unix)]
#[test]
fn reply_prints_generated_text() {
    let home = home_with_backend();
    let (stdout, _stderr, exit_code) = run_chatview(
        &["reply", &fixture("chat.txt"), "--id", "3-1"],
        home.path(),
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Glad to hear it!\n");
}

#[cfg(unix)]
#[test]
fn failing_backend_falls_back() {
    let home = config_home("[enrich]\nprogram = \"false\"\n");
    let (stdout, stderr, exit_code) = run_chatview(
        &["reply", &fixture("chat.txt"), "--id", "1-0"],
        home.path(),
    );

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "Thanks for your message!\n");
    assert!(stderr.contains("WARN"));
}

// ============================================================================
// Languages and config
// ============================================================================

#[test]
fn languages_marks_default() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_chatview(&["languages"], home.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("hi  Hindi (default)"));
    assert!(stdout.contains("en  English"));
    assert_eq!(stdout.lines().count(), 6);
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) = run_chatview(&["config", "show"], home.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("[display]"));
    assert!(stdout.contains("language = \"hi\""));
    assert!(stdout.contains("timeout_secs = 120"));
}

#[test]
fn config_set_persists_value() {
    let home = TempDir::new().unwrap();
    let (stdout, _stderr, exit_code) =
        run_chatview(&["config", "set", "display.language", "fr"], home.path());

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Saved display.language"));
    assert!(home.path().join("chatview").join("config.toml").exists());

    let (stdout, _stderr, _exit_code) = run_chatview(&["languages"], home.path());
    assert!(stdout.contains("fr  French (default)"));
    assert!(!stdout.contains("Hindi (default)"));
}

#[test]
fn config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_stdout, stderr, exit_code) =
        run_chatview(&["config", "set", "display.font", "mono"], home.path());

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Unknown config key 'display.font'"));
    assert!(!home.path().join("chatview").join("config.toml").exists());
}
