use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TestDir {
    path: PathBuf,
}

impl TestDir {
    fn new(tag: &str) -> Self {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let path =
            std::env::temp_dir().join(format!("lsys_cli_{tag}_{}_{}", std::process::id(), ts));
        fs::create_dir_all(&path).expect("create temp test dir");
        Self { path }
    }
}

impl Drop for TestDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_lsys(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lsys"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("run lsys")
}

#[test]
fn list_prints_builtin_presets() {
    let dir = TestDir::new("list");
    let output = run_lsys(&["--list"], &dir.path);

    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["bush", "gosper", "hilbert", "pine", "plant", "sierpinski", "square"] {
        assert!(
            stdout.lines().any(|l| l == name),
            "missing preset {name} in: {stdout}"
        );
    }
}

#[test]
fn square_writes_svg_to_output_dir() {
    let dir = TestDir::new("square_svg");
    let out_dir = dir.path.join("out");
    fs::create_dir_all(&out_dir).expect("create output dir");

    let output = run_lsys(&["square", "-o", "out"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Wrote"), "expected write notice, got: {stderr}");

    let svg_path = out_dir.join("square.svg");
    assert!(svg_path.is_file(), "expected output file at {svg_path:?}");
    let svg = fs::read_to_string(svg_path).expect("read svg output");
    assert!(svg.contains("<svg"), "expected svg root element");
    assert!(svg.contains("<path"), "expected rendered path element");
    assert!(svg.contains("<rect"), "expected background rectangle");
}

#[test]
fn print_shows_condensed_string() {
    let dir = TestDir::new("print");
    let output = run_lsys(&["plant", "--print", "-n", "1"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "F+[[]-]-F[-F]+");

    let output = run_lsys(&["plant", "--print", "-n", "1", "--no-condense"], &dir.path);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "F+[[X]-X]-F[-FX]+X");
}

#[test]
fn seeded_stochastic_preset_is_reproducible() {
    let dir = TestDir::new("seeded");
    let first = run_lsys(&["bush", "--print", "-n", "3", "--seed", "7"], &dir.path);
    let second = run_lsys(&["bush", "--print", "-n", "3", "--seed", "7"], &dir.path);
    assert!(first.status.success(), "process failed: {first:?}");
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn unknown_preset_fails() {
    let dir = TestDir::new("unknown");
    let output = run_lsys(&["koch"], &dir.path);
    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("koch"), "expected name in error, got: {stderr}");
    assert!(!dir.path.join("koch.svg").exists());
}

#[test]
fn custom_presets_file_with_bad_binding_warns() {
    let dir = TestDir::new("custom");
    fs::write(
        dir.path.join("mine.json"),
        r#"{ "tri": {
            "lsystem": {
                "start": "F-G-G",
                "rules": { "F": "F-G+F+G-F", "G": "GG" },
                "angle": 120,
                "actions": { "G": { "name": "forward" }, "Q": { "name": "spin" } }
            },
            "draw": { "iterations": 2, "base_length": 5 }
        } }"#,
    )
    .expect("write presets file");

    let output = run_lsys(&["tri", "--presets", "mine.json"], &dir.path);
    assert!(output.status.success(), "process failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning:"), "expected warning, got: {stderr}");
    assert!(dir.path.join("tri.svg").is_file());
}

#[test]
fn unbalanced_brackets_fail() {
    let dir = TestDir::new("underflow");
    fs::write(
        dir.path.join("bad.json"),
        r#"{ "bad": { "lsystem": { "start": "F]F", "angle": 90 }, "draw": { "iterations": 0 } } }"#,
    )
    .expect("write presets file");

    let output = run_lsys(&["bad", "--presets", "bad.json"], &dir.path);
    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("stack underflow"), "got: {stderr}");
    assert!(!dir.path.join("bad.svg").exists());
}

#[test]
fn malformed_presets_file_fails() {
    let dir = TestDir::new("malformed");
    fs::write(dir.path.join("broken.json"), r#"{ "x": { "lsystem": 5 } }"#)
        .expect("write presets file");
    let output = run_lsys(&["x", "--presets", "broken.json"], &dir.path);
    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "got: {stderr}");
}

#[test]
fn repeated_rule_key_fails() {
    let dir = TestDir::new("repeated-key");
    fs::write(
        dir.path.join("twice.json"),
        r#"{ "t": { "lsystem": { "start": "F", "angle": 90, "rules": { "F": "FF", "F": "F+F" } },
                    "draw": { "iterations": 1 } } }"#,
    )
    .expect("write presets file");
    let output = run_lsys(&["t", "--presets", "twice.json"], &dir.path);
    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duplicate key `F`"), "got: {stderr}");
    assert!(!dir.path.join("t.svg").exists());
}

#[test]
fn overflowing_weights_fail_before_drawing() {
    let dir = TestDir::new("huge-weights");
    fs::write(
        dir.path.join("huge.json"),
        r#"{ "h": { "lsystem": { "start": "F", "angle": 90, "rules": { "F": [
                { "replacement": "FF", "weight": 1e308 },
                { "replacement": "F", "weight": 1e308 } ] } },
                "draw": { "iterations": 1 } } }"#,
    )
    .expect("write presets file");
    let output = run_lsys(&["h", "--presets", "huge.json"], &dir.path);
    assert_eq!(output.status.code(), Some(1), "unexpected status: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid weight"), "got: {stderr}");
    assert!(!dir.path.join("h.svg").exists());
}
