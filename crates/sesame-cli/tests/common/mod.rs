use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI with an isolated data directory and no simulated latency.
pub fn run_cli(args: &[&str], data_dir: &Path) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sesame"));
    cmd.args(args);
    cmd.env("SESAME_DATA_DIR", data_dir);
    cmd.env("SESAME_NO_LATENCY", "true");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], data_dir: &Path) -> String {
    let output = run_cli(args, data_dir);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI with `--json` and parse the result record from stdout.
pub fn run_cli_json(args: &[&str], data_dir: &Path) -> (bool, serde_json::Value) {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let output = run_cli(&full, data_dir);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let record = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("Invalid JSON output {:?}: {}", stdout, e));
    (output.status.success(), record)
}

/// Write the raw storage file as the file store lays it out.
pub fn write_stored_token(data_dir: &Path, token: &str) {
    std::fs::create_dir_all(data_dir).unwrap();
    let json = serde_json::json!({ "auth-token": token });
    std::fs::write(data_dir.join("storage.json"), json.to_string()).unwrap();
}

/// Read the stored token, if any.
pub fn read_stored_token(data_dir: &Path) -> Option<String> {
    let content = std::fs::read_to_string(data_dir.join("storage.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&content).ok()?;
    value["auth-token"].as_str().map(str::to_string)
}
