use assert_cmd::Command;
use std::fs;

const GRAPH_REQUEST: &str = r#"{
    "from_nodes": ["A", "B"],
    "to_nodes": ["B", "A"],
    "roles": ["original", "mirrored"],
    "dimension": ["weight"],
    "layout": ["circular"],
    "k": [0.5]
}"#;

const RADAR_REQUEST: &str = r#"{
    "data": ["a", "a", "b"],
    "amplitude": ["1", "1", "1"],
    "thread": ["t", "t", "t"],
    "node_type": ["original", "original", "original"],
    "dimension": "size"
}"#;

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

#[test]
fn graph_command_prints_one_value_per_row() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("request.json");
    fs::write(&input, GRAPH_REQUEST).expect("write request");

    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .env_remove("NARWHAL_CACHE_DIR")
        .args(["graph", "--no-cache", input.to_string_lossy().as_ref()])
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output), serde_json::json!([1.0, 1.0]));
}

#[test]
fn radar_command_reads_stdin() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args(["radar", "--no-cache", "-"])
        .write_stdin(RADAR_REQUEST)
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output), serde_json::json!([2.0, 2.0, 1.0]));
}

#[test]
fn cache_dir_receives_entries() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let cache = tmp.path().join("cache");
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .env_remove("NARWHAL_NO_CACHE")
        .args(["graph", "--cache-dir", cache.to_string_lossy().as_ref()])
        .write_stdin(GRAPH_REQUEST)
        .assert()
        .success();

    let entries: Vec<_> = fs::read_dir(&cache)
        .expect("cache dir exists")
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn degenerate_graph_prints_nulls() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    let output = Command::new(exe)
        .current_dir(tmp.path())
        .args(["graph", "--no-cache"])
        .write_stdin(
            r#"{"from_nodes": [null, "B"], "to_nodes": ["B", "A"], "roles": ["original", "original"], "dimension": "x"}"#,
        )
        .output()
        .expect("run narwhal-cli");
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout_json(&output), serde_json::json!([null, null]));
}

#[test]
fn unknown_layout_fails_with_exit_code_one() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    Command::new(exe)
        .current_dir(tmp.path())
        .args(["graph", "--no-cache"])
        .write_stdin(GRAPH_REQUEST.replace("circular", "hyperbolic"))
        .assert()
        .code(1);
}

#[test]
fn missing_command_is_a_usage_error() {
    let exe = assert_cmd::cargo_bin!("narwhal-cli");
    Command::new(exe).assert().code(2);
    Command::new(exe).arg("--help").assert().code(2);
}
