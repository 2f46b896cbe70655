//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A suite with trailing whitespace on lines 1 and 3.
const MESSY_SUITE: &str = "*** Test Cases ***  \nCase\n    Log    hello  \n";

const CLEAN_SUITE: &str = "*** Test Cases ***\nCase\n    Log    hello\n";

/// Helper to create a command for the suitelint CLI, run from `dir`
fn suitelint_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_suitelint"));
    cmd.current_dir(dir);
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
    dir
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

mod list_rules {
    use super::*;

    #[test]
    fn lists_rules_sorted_by_id() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .arg("--list")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Rule - E0401 [E]: parsing-error"))
            .stdout(predicate::str::contains("Rule - W1001 [W]: trailing-whitespace"));
    }

    #[test]
    fn lists_reports_with_selection() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .args(["--list-reports", "-r", "rules_by_id"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "rules_by_id - Groups detected issues by rule id and prints the counts (enabled)",
            ))
            .stdout(predicate::str::contains("return_status - "))
            .stdout(predicate::str::contains("(disabled)"));
    }

    #[test]
    fn shows_disabled_rules() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .args(["--list", "-e", "trailing-whitespace"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "trailing-whitespace: Trailing whitespace at the end of line (disabled)",
            ));
    }
}

mod lint_command {
    use super::*;

    #[test]
    fn prints_message_without_paths() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No path has been provided"));
    }

    #[test]
    fn clean_suite_has_no_output() {
        let dir = project(&[("suite.robot", CLEAN_SUITE)]);
        suitelint_cmd(dir.path())
            .arg(".")
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn reports_findings_with_default_format() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .arg("suite.robot")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "suite.robot:1:19 [W] W1001 Trailing whitespace at the end of line",
            ))
            .stdout(predicate::str::contains("suite.robot:3:17 [W] W1001"));
    }

    #[test]
    fn uses_custom_format() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-f", "{rule_id}:{line}:{msg_name}"])
            .assert()
            .success()
            .stdout("W1001:1:trailing-whitespace\nW1001:3:trailing-whitespace\n");
    }

    #[test]
    fn exit_status_follows_return_status_report() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "--reports", "all"])
            .assert()
            .code(2)
            .stdout(predicate::str::contains("W1001 (trailing-whitespace) : 2"))
            .stdout(predicate::str::contains("Found 2 issues: 2 WARNING(s)."));
    }

    #[test]
    fn quality_gate_is_configurable() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-r", "return_status", "-c", "return_status:quality_gate:W=5"])
            .assert()
            .success();
    }

    #[test]
    fn excluded_rule_is_not_reported() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-e", "W1001"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn threshold_filters_rules() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-t", "E"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn severity_can_be_configured() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-c", "trailing-whitespace:severity:E"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[E] W1001"));
    }

    #[test]
    fn writes_to_output_file() {
        let dir = project(&[("suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-o", "issues.txt"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());

        let written = fs::read_to_string(dir.path().join("issues.txt")).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn non_recursive_skips_subdirectories() {
        let dir = project(&[("top.robot", CLEAN_SUITE), ("nested/deep.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "--no-recursive"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn ignore_glob_skips_files() {
        let dir = project(&[("generated/suite.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "--ignore", "**/generated/**"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }

    #[test]
    fn parallel_strategy_reports_same_findings() {
        let dir = project(&[("a.robot", MESSY_SUITE), ("b.robot", MESSY_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "--parallel", "-f", "{line}"])
            .assert()
            .success()
            .stdout("1\n3\n1\n3\n");
    }

    #[test]
    fn reads_config_file() {
        let dir = project(&[
            ("suite.robot", MESSY_SUITE),
            (
                ".suitelint.jsonc",
                r#"{
                    // project settings
                    "paths": ["."],
                    "exclude": ["trailing-whitespace"]
                }"#,
            ),
        ]);
        suitelint_cmd(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_path_fails() {
        let dir = TempDir::new().unwrap();
        suitelint_cmd(dir.path())
            .arg("missing_dir")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn malformed_configure_directive_fails() {
        let dir = project(&[("suite.robot", CLEAN_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-c", "line-too-long"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Provided invalid config"));
    }

    #[test]
    fn unknown_report_fails() {
        let dir = project(&[("suite.robot", CLEAN_SUITE)]);
        suitelint_cmd(dir.path())
            .args([".", "-r", "nope"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn invalid_config_file_fails() {
        let dir = project(&[("suite.robot", CLEAN_SUITE), (".suitelint.json", r#"{ "pathz": [] }"#)]);
        suitelint_cmd(dir.path())
            .arg(".")
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Config validation failed"));
    }
}
