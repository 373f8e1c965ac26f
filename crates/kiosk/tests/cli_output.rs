//! Integration tests for CLI behavior, run against the built binary.

use std::io::Read;
use std::net::TcpListener;
use std::process::{Command, Output};
use std::time::{Duration, Instant};

fn kiosk(args: &[&str], dir: &std::path::Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kiosk"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute kiosk")
}

fn free_port() -> u16 {
    TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    let output = kiosk(&["--help"], dir.path());

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for subcommand in ["run", "send", "stop"] {
        assert!(stdout.contains(subcommand), "missing '{}' in {}", subcommand, stdout);
    }
}

#[test]
fn test_no_arguments_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = kiosk(&[], dir.path());
    assert!(!output.status.success());
}

#[test]
fn test_send_delivers_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let server = std::thread::spawn(move || {
        let (mut conn, _) = listener.accept().unwrap();
        let mut received = String::new();
        conn.read_to_string(&mut received).unwrap();
        received
    });

    let output = kiosk(
        &["-q", "send", "http://x", "--host", "127.0.0.1", "--port", &port],
        dir.path(),
    );

    assert!(
        output.status.success(),
        "send failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(server.join().unwrap(), "http://x\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout.contains(r#""event":"#),
        "stdout should not contain JSON logs, got: {}",
        stdout
    );
}

#[test]
fn test_stop_without_controller_fails() {
    let dir = tempfile::tempdir().unwrap();
    let port = free_port().to_string();

    let output = kiosk(
        &["-q", "stop", "--host", "127.0.0.1", "--port", &port],
        dir.path(),
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to stop controller"), "stderr: {}", stderr);
}

/// A browser that exits right away closes the surface, which stops the
/// controller. The exit status is 1 even though nothing went wrong.
#[test]
fn test_run_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let port = free_port();
    std::fs::create_dir_all(dir.path().join(".kiosk")).unwrap();
    std::fs::write(
        dir.path().join(".kiosk").join("config.toml"),
        format!(
            r#"
[control]
port = {port}
bind_address = "127.0.0.1"

[network]
probe_url = "http://127.0.0.1:9"
probe_timeout_secs = 1

[display]
browser = "true"
args = []
width = 800
height = 600
"#
        ),
    )
    .unwrap();

    let started = Instant::now();
    let output = kiosk(&["-q", "run"], dir.path());

    assert_eq!(
        output.status.code(),
        Some(1),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(started.elapsed() < Duration::from_secs(15));

    let targets = std::fs::read_to_string(dir.path().join(".kiosk").join("targets.txt")).unwrap();
    assert_eq!(targets.trim(), "http://supranet.ar/carteleria/lomoro-x4/");
    assert!(dir.path().join(".kiosk").join("offline.html").exists());
}

#[test]
fn test_run_refuses_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let port = free_port();
    std::fs::create_dir_all(dir.path().join(".kiosk")).unwrap();
    std::fs::write(
        dir.path().join(".kiosk").join("config.toml"),
        format!(
            r#"
[control]
port = {port}
bind_address = "127.0.0.1"

[refresh]
interval_secs = 0
"#
        ),
    )
    .unwrap();

    let output = kiosk(&["-q", "run"], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to start kiosk"), "stderr: {}", stderr);
    assert!(stderr.contains("refresh.interval_secs"), "stderr: {}", stderr);
    // Nothing was started, so the targets file was never created.
    assert!(!dir.path().join(".kiosk").join("targets.txt").exists());
}

#[test]
fn test_run_refuses_unparseable_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join(".kiosk")).unwrap();
    std::fs::write(
        dir.path().join(".kiosk").join("config.toml"),
        "[control]\nport = \"not a number\"\n",
    )
    .unwrap();

    let output = kiosk(&["-q", "run"], dir.path());

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config file"), "stderr: {}", stderr);
}
