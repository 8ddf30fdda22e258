//! Process-level harness for the `daisy` binary.
//!
//! # What this covers
//!
//! - **blog subcommand**: filters an export file and prints JSON on stdout.
//! - **Argument errors**: unknown catalogs and missing files exit non-zero.
//!
//! # What this does NOT cover
//!
//! - TUI rendering (that requires a real terminal)
//! - `search` against the real provider (see `controller_harness`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use common::*;

use std::process::Command;

use pretty_assertions::assert_eq;

fn daisy() -> Command {
    Command::new(env!("CARGO_BIN_EXE_daisy"))
}

#[test]
fn blog_prints_matching_entries_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.json");
    std::fs::write(&path, BLOG_EXPORT).unwrap();

    let output = daisy()
        .arg("blog")
        .arg(&path)
        .args(["--filter", "aloe menta"])
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = printed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["e2", "e3"]);
}

#[test]
fn blog_without_filter_prints_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blog.json");
    std::fs::write(&path, BLOG_EXPORT).unwrap();

    let output = daisy().arg("blog").arg(&path).output().unwrap();
    assert!(output.status.success());
    let printed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed.as_array().unwrap().len(), 3);
}

#[test]
fn blog_with_missing_file_fails() {
    let output = daisy().args(["blog", "/nonexistent/blog.json"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("blog.json"));
}

#[test]
fn unknown_catalog_is_rejected() {
    let output = daisy().args(["--catalog", "weeds", "search"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown catalog"));
}

#[test]
fn help_lists_subcommands() {
    let output = daisy().arg("--help").output().unwrap();
    assert!(output.status.success());
    let help = String::from_utf8_lossy(&output.stdout);
    assert!(help.contains("search"));
    assert!(help.contains("blog"));
}
