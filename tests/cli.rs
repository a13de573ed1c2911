use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

use strokepick::trace::{Trace, TraceFrame, TraceRect, TraceSample, save_trace};

fn strokepick_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strokepick").expect("binary exists");
    // Isolate from any user config.
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn sample(id: u32, x: f64, y: f64) -> TraceSample {
    TraceSample { id, x, y }
}

fn two_box_layout() -> Vec<TraceRect> {
    vec![
        TraceRect {
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        },
        TraceRect {
            x: 20.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        },
    ]
}

/// Drag from box 0 across the gap into box 1.
fn sweep_trace() -> Trace {
    Trace::new(
        two_box_layout(),
        vec![
            TraceFrame::Start {
                samples: vec![sample(0, 5.0, 5.0)],
            },
            TraceFrame::Move {
                samples: vec![sample(0, 15.0, 5.0)],
            },
            TraceFrame::Move {
                samples: vec![sample(0, 25.0, 5.0)],
            },
            TraceFrame::End,
        ],
    )
}

/// Enter box 0, leave it, and pass through it again.
fn double_pass_trace() -> Trace {
    Trace::new(
        two_box_layout(),
        vec![
            TraceFrame::Start {
                samples: vec![sample(0, 5.0, 5.0)],
            },
            TraceFrame::Move {
                samples: vec![sample(0, 15.0, 5.0)],
            },
            TraceFrame::Move {
                samples: vec![sample(0, 5.0, 5.0)],
            },
            TraceFrame::End,
        ],
    )
}

/// Two simultaneous contacts, one per box.
fn two_finger_trace() -> Trace {
    Trace::new(
        two_box_layout(),
        vec![
            TraceFrame::Start {
                samples: vec![sample(1, 5.0, 5.0), sample(2, 25.0, 5.0)],
            },
            TraceFrame::End,
        ],
    )
}

#[test]
fn strokepick_help_prints_about() {
    let temp = TempDir::new().unwrap();
    strokepick_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand lasso selection engine for pointer-driven item lists",
        ));
}

#[test]
fn no_arguments_prints_usage() {
    let temp = TempDir::new().unwrap();
    strokepick_cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Replay a recorded gesture trace"));
}

#[test]
fn replaying_a_sweep_reports_both_items() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("sweep.json");
    save_trace(&sweep_trace(), &trace_path).unwrap();

    strokepick_cmd(temp.path())
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items selected"))
        .stdout(predicate::str::contains("selection: 0 1"));
}

#[test]
fn toggle_policy_flag_deselects_on_second_pass() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("double-pass.json");
    save_trace(&double_pass_trace(), &trace_path).unwrap();

    // Additive keeps the item selected.
    strokepick_cmd(temp.path())
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 item selected"));

    // Toggle flips it back off.
    strokepick_cmd(temp.path())
        .args(["--policy", "toggle"])
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 items selected"));
}

#[test]
fn policy_can_come_from_the_config_file() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("strokepick");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[selection]\npolicy = \"toggle\"\n",
    )
    .unwrap();

    let trace_path = temp.path().join("double-pass.json");
    save_trace(&double_pass_trace(), &trace_path).unwrap();

    strokepick_cmd(temp.path())
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 items selected"));
}

#[test]
fn multi_pointer_flag_tracks_every_contact() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("two-finger.json");
    save_trace(&two_finger_trace(), &trace_path).unwrap();

    // Single-pointer default: only the first contact counts.
    strokepick_cmd(temp.path())
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 item selected"));

    strokepick_cmd(temp.path())
        .arg("--multi-pointer")
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items selected"));
}

#[test]
fn compressed_traces_load_transparently() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("sweep.json.gz");
    save_trace(&sweep_trace(), &trace_path).unwrap();

    strokepick_cmd(temp.path())
        .arg(&trace_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items selected"));
}

#[test]
fn unknown_policy_is_rejected() {
    let temp = TempDir::new().unwrap();
    let trace_path = temp.path().join("sweep.json");
    save_trace(&sweep_trace(), &trace_path).unwrap();

    strokepick_cmd(temp.path())
        .args(["--policy", "sticky"])
        .arg(&trace_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown policy 'sticky'"));
}

#[test]
fn missing_trace_file_fails_with_context() {
    let temp = TempDir::new().unwrap();
    strokepick_cmd(temp.path())
        .arg(temp.path().join("nope.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load trace"));
}

#[test]
fn init_config_writes_the_example_file() {
    let temp = TempDir::new().unwrap();
    strokepick_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created default config"));

    let written = temp.path().join("strokepick").join("config.toml");
    let contents = std::fs::read_to_string(written).unwrap();
    assert!(contents.contains("[selection]"));

    // A second run refuses to overwrite.
    strokepick_cmd(temp.path())
        .arg("--init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}
