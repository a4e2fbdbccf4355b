mod support;

use std::process::Command;

use support::LnkBuilder;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_lnkread").to_string()
}

fn share_link() -> Vec<u8> {
    LnkBuilder::new()
        .unicode()
        .link_info_extended("C:\\data\\", "report.txt")
        .relative_path(".\\report.txt")
        .environment_block("\\\\127.0.0.1\\someshare\\foo.txt")
        .build()
}

#[test]
fn cli_parse_prints_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    std::fs::write(&path, share_link()).unwrap();

    let out = Command::new(bin()).arg("parse").arg(&path).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("target path: C:\\data\\report.txt"));
    assert!(stdout.contains("relative path: .\\report.txt"));
    assert!(stdout.contains("environment variable: \\\\127.0.0.1\\someshare\\foo.txt"));
}

#[test]
fn cli_parse_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    std::fs::write(&path, share_link()).unwrap();

    let out = Command::new(bin())
        .args(["--json", "parse"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["relative_path"], ".\\report.txt");
    assert_eq!(v["target_path"], "C:\\data\\report.txt");
    assert_eq!(v["extra_blocks"][0]["name"], "EnvironmentVariableDataBlock");
    assert!(v["arguments"].is_null());
}

#[test]
fn cli_quiet_prints_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    std::fs::write(&path, share_link()).unwrap();

    let out = Command::new(bin())
        .args(["-q", "parse"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn cli_header_reports_clsid() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    std::fs::write(&path, share_link()).unwrap();

    let out = Command::new(bin())
        .args(["header", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["header_size"], 76);
    assert_eq!(v["link_clsid"], "00021401-0000-0000-C000-000000000046");
    assert_eq!(v["link_info_extended"], true);
    assert_eq!(v["text_encoding"], "UTF-16LE");
}

#[test]
fn cli_header_text_names_legacy_encoding() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    std::fs::write(&path, LnkBuilder::new().relative_path("x").build()).unwrap();

    let out = Command::new(bin()).arg("header").arg(&path).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Text encoding:     Windows-1252"));
}

#[test]
fn cli_blocks_lists_signatures() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.lnk");
    let bytes = LnkBuilder::new()
        .environment_block("x")
        .block(0xA000_0003, &[0u8; 88])
        .build();
    std::fs::write(&path, bytes).unwrap();

    let out = Command::new(bin()).arg("blocks").arg(&path).output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("0xA0000001"));
    assert!(lines[1].contains("TrackerDataBlock"));
}

#[test]
fn cli_bad_file_fails() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.lnk");
    let bad = dir.path().join("bad.lnk");
    std::fs::write(&good, share_link()).unwrap();
    std::fs::write(&bad, b"not a shortcut").unwrap();

    let out = Command::new(bin())
        .arg("parse")
        .arg(&good)
        .arg(&bad)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Unable to read header"));
    assert!(String::from_utf8_lossy(&out.stdout).contains("good.lnk"));
}

#[test]
fn cli_missing_file_fails() {
    let dir = tempdir().unwrap();
    let st = Command::new(bin())
        .arg("header")
        .arg(dir.path().join("missing.lnk"))
        .status()
        .unwrap();
    assert!(!st.success());
}
