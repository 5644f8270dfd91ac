//! Integration tests for the tally command-line front end

use std::path::{Path, PathBuf};
use std::process::Command;

const TEST_CONFIG: &str = "[display]\ncolumn_width = 6\nbar_width = 4\nrow_header_width = 4\n";

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("config.toml"), TEST_CONFIG).expect("write config");
        Workspace { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("write input");
        path
    }

    /// Run tally with the workspace config. Returns (stdout, stderr, exit code).
    fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = Command::new(env!("CARGO_BIN_EXE_tally"))
            .arg("--config")
            .arg(self.path("config.toml"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to execute tally");

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        (stdout, stderr, exit_code)
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

#[test]
fn test_print_is_the_default() {
    let ws = Workspace::new();
    let input = ws.write("sheet.csv", "1,2\n=A1+B1,=SUM(A1:B1)*10\n");

    let (stdout, stderr, code) = ws.run(&[arg(&input)]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        stdout.lines().collect::<Vec<_>>(),
        vec!["      A     B", "   1     1     2", "   2     3    30"]
    );
}

#[test]
fn test_eval_writes_values() {
    let ws = Workspace::new();
    let input = ws.write("sheet.csv", "1,2\n=A1+B1,=A2/2\n=bar(1),=A1/0\n");
    let output = ws.path("values.csv");

    let (stdout, _, code) = ws.run(&[arg(&input), "--eval", arg(&output)]);
    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "1,2\r\n3,1.5\r\n████,#DIV/0!\r\n"
    );
}

#[test]
fn test_fill_then_write_raw_tsv() {
    let ws = Workspace::new();
    let input = ws.write("sheet.tsv", "1\t=A1*$A$1\n2\n3\n");
    let output = ws.path("filled.tsv");

    let (_, stderr, code) = ws.run(&[arg(&input), "--fill", "B1:B3", "-w", arg(&output)]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "1\t=A1*$A$1\r\n2\t=A2*$A$1\r\n3\t=A3*$A$1\r\n"
    );
}

#[test]
fn test_cycle_is_reported_in_place() {
    let ws = Workspace::new();
    let input = ws.write("cycle.csv", "=A1\n");
    let output = ws.path("values.csv");

    let (_, _, code) = ws.run(&[arg(&input), "-e", arg(&output)]);
    assert_eq!(code, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "#CYCLE! A1\r\n");
}

#[test]
fn test_deep_reference_chain_reports_depth_error() {
    let ws = Workspace::new();
    let rows = 10_000;
    let mut content: String = (1..rows).map(|row| format!("=A{}+1\n", row + 1)).collect();
    content.push_str("0\n");
    let input = ws.write("chain.csv", &content);
    let output = ws.path("values.csv");

    let (_, stderr, code) = ws.run(&[arg(&input), "-e", arg(&output)]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let values = std::fs::read_to_string(&output).unwrap();
    assert_eq!(values.lines().count(), rows);
    assert!(values.starts_with("#DEPTH!"));
    assert!(values.ends_with("1\r\n0\r\n"));
}

#[test]
fn test_help_lists_functions() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&["--help"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("Formula functions:"));
    assert!(stderr.contains("SUM(A1:B5)"));
    assert!(stderr.contains("POWER(base, exponent)"));
    assert!(stderr.contains("Bar gauge filled to value"));
}

#[test]
fn test_missing_input_fails() {
    let ws = Workspace::new();
    let missing = ws.path("missing.csv");

    let (_, stderr, code) = ws.run(&[arg(&missing)]);
    assert_eq!(code, 1);
    assert!(stderr.contains("failed to load"));
}

#[test]
fn test_bad_fill_range_fails() {
    let ws = Workspace::new();
    let input = ws.write("sheet.csv", "1\n");

    let (_, stderr, code) = ws.run(&[arg(&input), "--fill", "B1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid fill range"));
}

#[test]
fn test_unknown_option_fails() {
    let ws = Workspace::new();
    let (_, stderr, code) = ws.run(&["--frobnicate"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown option"));
}
