// Command-line behavior of the frametree binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_binary(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_frametree"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // The binary may exit before reading stdin, so a broken pipe is fine.
    let _ = child.stdin.take().unwrap().write_all(input.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn rejected_commands_get_an_error_reply() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let output = run_binary(
        &[config.to_str().unwrap()],
        "activate nope\nsplit row\nclose ghost\nleaves\n",
    );
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], r#"error: no leaf with id "nope""#);
    assert!(lines[1].starts_with("frame-"));
    assert_eq!(lines[2], r#"error: no frame with id "ghost""#);
    assert!(lines[3].contains(&format!("*{}", lines[1])));
}

#[test]
fn unknown_option_is_rejected() {
    let output = run_binary(&["--help"], "leaves\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown option --help"));
}

#[test]
fn print_default_config_prints_frames_table() {
    let output = run_binary(&["--print-default-config"], "");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("[frames]"));
}
