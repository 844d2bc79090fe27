//! Drives the command-line host across a process boundary.
//!
//! `abort` can only be observed this way: the child dies and nothing comes
//! back on stdout.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Harness {
    dir: TempDir,
    config: PathBuf,
}

impl Harness {
    fn new() -> Self {
        Self::with_config("")
    }

    fn with_config(extra: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.toml");
        let logs = dir.path().join("logs");
        fs::write(
            &config,
            format!(
                "[logging]\nfilter = \"debug_functions=debug\"\ndirectory = {:?}\n{extra}",
                logs.display().to_string()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_debug-functions"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .output()
            .unwrap()
    }

    fn root(&self) -> &Path {
        self.dir.path()
    }

    fn log_contents(&self) -> String {
        fs::read_dir(self.root().join("logs"))
            .unwrap()
            .flatten()
            .map(|entry| fs::read_to_string(entry.path()).unwrap())
            .collect()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn sleep_prints_result() {
    let harness = Harness::new();
    let output = harness.run(&["sleep(0)"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Slept for 0 ms.\n");
}

#[test]
fn validation_text_exits_successfully() {
    let harness = Harness::new();
    let output = harness.run(&["sleep()"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("Missing time parameter! USAGE: sleep(##)"));
}

#[test]
fn requested_failure_goes_to_stderr() {
    let harness = Harness::new();
    let output = harness.run(&["error(4)"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).starts_with("ForbiddenError (4): A ForbiddenError was requested. ["),
        "{}",
        stderr(&output)
    );
}

#[test]
fn configured_codes_reach_the_cli() {
    let harness = Harness::with_config("[error_kinds]\nnot_found = 404\n");
    let output = harness.run(&["error(404)"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("NotFoundError (404):"));

    let output = harness.run(&["error(5)"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "An unrecognized error_type parameter was received. error_type: 5\n"
    );
}

#[test]
fn list_shows_usage_lines() {
    let harness = Harness::with_config("[functions]\ndisabled = [\"abort\"]\n");
    let output = harness.run(&["--list"]);
    assert!(output.status.success());
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("error: "));
    assert!(lines[1].starts_with("sleep: "));
    assert!(lines[2].starts_with("sum_until: "));
}

#[test]
fn malformed_expression_exits_with_usage_error() {
    let harness = Harness::new();
    let output = harness.run(&["sleep 5"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("malformed call expression"));
}

#[test]
fn bad_config_exits_with_usage_error() {
    let harness = Harness::with_config("[error_kinds]\ninternal = 2\n");
    let output = harness.run(&["sleep(0)"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("config error"));
}

#[test]
fn logs_land_in_configured_directory() {
    let harness = Harness::new();
    let output = harness.run(&["sleep(0)"]);
    assert!(output.status.success());

    let entries: Vec<_> = fs::read_dir(harness.root().join("logs"))
        .unwrap()
        .flatten()
        .collect();
    assert!(!entries.is_empty());
}

#[cfg(unix)]
#[test]
fn abort_kills_the_process() {
    use std::os::unix::process::ExitStatusExt;

    let harness = Harness::new();
    let output = harness.run(&["abort(0)"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), None);
    assert_eq!(output.status.signal(), Some(6));
    assert!(stdout(&output).is_empty());
}

#[test]
fn abort_warning_reaches_the_log_before_the_process_dies() {
    let harness = Harness::new();
    let output = harness.run(&["abort(0)"]);
    assert!(!output.status.success());

    let log = harness.log_contents();
    assert!(log.contains("debug-functions starting"), "log: {log:?}");
    assert!(log.contains("invoking debug function"), "log: {log:?}");
    assert!(log.contains("abort requested"), "log: {log:?}");
}

#[test]
fn invocation_logs_argument_types() {
    let harness = Harness::new();
    let output = harness.run(&["sleep(0)"]);
    assert!(output.status.success());

    let log = harness.log_contents();
    assert!(log.contains("Int32 0"), "log: {log:?}");
}

#[test]
fn abort_with_bad_arguments_returns_text() {
    let harness = Harness::new();
    let output = harness.run(&["abort(-1)"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("The time parameter must not be negative!"));
}
