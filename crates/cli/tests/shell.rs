// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end tests driving the shell binary through piped stdin and
//! `--script`.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::{NamedTempFile, TempDir};

/// Shell command isolated from the caller's environment.
fn nsh() -> Command {
    let mut cmd = Command::cargo_bin("nsh").unwrap();
    cmd.env_remove("NSH_CONFIG")
        .env_remove("NSH_HISTORY_FILE")
        .env_remove("NSH_LOG");
    cmd
}

fn write_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn path_arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// Piped input
// =============================================================================

mod piped {
    use super::*;

    #[test]
    fn test_loopback_round_trip() {
        nsh()
            .arg("loopback")
            .write_stdin("send hi\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("loading connector loopback"))
            .stdout(predicate::str::contains("[loopback] $ send hi\n"))
            .stdout(predicate::str::contains(">> #0 \"hi\"\n<< #1 \"hi\"\n"));
    }

    #[test]
    fn test_starts_without_connector() {
        nsh()
            .write_stdin("/help\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("[(none)] $ /help"))
            .stdout(predicate::str::contains("meta commands:"));
    }

    #[test]
    fn test_details_of_received_message() {
        nsh()
            .arg("loopback")
            .write_stdin("send ping\n/details\n/details 2\n/details 3\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("*** Received ***\ndatagram #1"))
            .stdout(predicate::str::contains("*** Sent ***\ndatagram #0"))
            .stdout(predicate::str::contains("message not found"));
    }

    #[test]
    fn test_unknown_connector_is_not_fatal() {
        nsh()
            .arg("gamma")
            .write_stdin("/load loopback\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("unknown connector: gamma"))
            .stdout(predicate::str::contains("[(none)] $ /load loopback"))
            .stdout(predicate::str::contains("loading connector loopback"));
    }

    #[test]
    fn test_unknown_command_is_reported() {
        nsh()
            .arg("loopback")
            .write_stdin("nope\nsend still-here\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Error: unknown command: nope"))
            .stdout(predicate::str::contains(">> #0 \"still-here\""));
    }

    #[test]
    fn test_usage_error_shows_usage() {
        nsh()
            .arg("loopback")
            .write_stdin("burst many x\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("usage: burst <count: int> <text: str>"));
    }

    #[test]
    fn test_exit_stops_reading() {
        nsh()
            .arg("loopback")
            .write_stdin("/exit\nsend never\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("send never").not());
    }

    #[test]
    fn test_hold_shows_status_in_prompt() {
        nsh()
            .arg("loopback")
            .write_stdin("hold\nsend a\n/reset\nrelease\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("[loopback] (holding 1) $ /reset"))
            .stdout(predicate::str::contains("<< #1 \"a\""));
    }
}

// =============================================================================
// Scripts and test case export
// =============================================================================

mod export {
    use super::*;

    #[test]
    fn test_script_saves_test_case() {
        let dir = TempDir::new().unwrap();
        let case = dir.path().join("case.py");
        let script = write_file(
            ".nsh",
            &format!(
                "# build a small exchange\n/load loopback\nsend hi\n/save '{}'\n",
                case.display()
            ),
        );

        nsh()
            .args(["--script", path_arg(script.path())])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("saved to {}", case.display())));

        assert_eq!(
            std::fs::read_to_string(&case).unwrap(),
            "import loopback\n\
             \n\
             conn = loopback.connect(prefix=\"\")\n\
             \n\
             # send hi\n\
             conn.send(\"hi\")\n\
             assert conn.recv() == \"hi\"\n\
             conn.close()\n"
        );
    }

    #[test]
    fn test_reset_before_save() {
        let dir = TempDir::new().unwrap();
        let case = dir.path().join("case.py");
        nsh()
            .args(["loopback", "--save-path", path_arg(&case)])
            .write_stdin("send old\n/reset\nsend new\n/save\n")
            .assert()
            .success();

        let content = std::fs::read_to_string(&case).unwrap();
        assert!(!content.contains("old"));
        assert!(content.contains("conn.send(\"new\")"));
    }

    #[test]
    fn test_save_overwrites_previous_export() {
        let dir = TempDir::new().unwrap();
        let case = dir.path().join("case.py");
        std::fs::write(&case, "x".repeat(4096)).unwrap();

        nsh()
            .args(["loopback", "--save-path", path_arg(&case)])
            .write_stdin("/save\n/save\n")
            .assert()
            .success();

        assert_eq!(
            std::fs::read_to_string(&case).unwrap(),
            "import loopback\n\nconn = loopback.connect(prefix=\"\")\n\nconn.close()\n"
        );
    }

    #[test]
    fn test_save_to_missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let case = dir.path().join("missing").join("case.py");
        nsh()
            .args(["loopback", "--save-path", path_arg(&case)])
            .write_stdin("/save\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("cannot write"));
    }

    #[test]
    fn test_missing_script_fails() {
        nsh()
            .args(["--script", "/nonexistent/script.nsh"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot open script"));
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_list_connectors() {
        nsh()
            .arg("--list-connectors")
            .assert()
            .success()
            .stdout("loopback\n");
    }

    #[test]
    fn test_config_file_supplies_connector_and_settings() {
        let config = write_file(
            ".toml",
            "default_connector = \"loopback\"\n\n[connectors.loopback]\nprefix = \"echo: \"\n",
        );
        nsh()
            .args(["--config", path_arg(config.path())])
            .write_stdin("send x\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("<< #1 \"echo: x\""));
    }

    #[test]
    fn test_config_from_environment() {
        let config = write_file(".toml", "default_connector = \"loopback\"\n");
        nsh()
            .env("NSH_CONFIG", config.path())
            .write_stdin("")
            .assert()
            .success()
            .stdout(predicate::str::contains("loading connector loopback"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let config = write_file(".toml", "colour = \"red\"\n");
        nsh()
            .args(["--config", path_arg(config.path())])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_bad_connector_settings_reported_on_load() {
        let config = write_file(".toml", "[connectors.loopback]\nport = 9\n");
        nsh()
            .args(["--config", path_arg(config.path()), "loopback"])
            .write_stdin("")
            .assert()
            .success()
            .stderr(predicate::str::contains("invalid setting 'port'"));
    }

    #[test]
    fn test_journal_records_history() {
        let dir = TempDir::new().unwrap();
        let journal = dir.path().join("journal.jsonl");
        nsh()
            .args(["loopback", "--journal", path_arg(&journal)])
            .write_stdin("send hi\n/reset\n")
            .assert()
            .success();

        let lines: Vec<String> = std::fs::read_to_string(&journal)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("\"kind\":\"command\""));
        assert!(lines[0].contains("\"text\":\"send hi\""));
        assert!(lines[1].contains("\"kind\":\"sent\""));
        assert!(lines[2].contains("\"kind\":\"received\""));
        assert!(lines[3].contains("\"kind\":\"reset\""));
    }
}
