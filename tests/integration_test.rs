use std::fs;
use std::path::Path;
use std::process::Command;

use nametag_pdf::NameTagConfig;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nametag-pdf"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

/// The binary always renders with the platform font. Only the end-to-end
/// rendering test needs it; input errors are reported before the font loads.
fn default_font_available(test_name: &str) -> bool {
    let font_path = NameTagConfig::default().font_path;
    let available = Path::new(&font_path).exists();
    if !available {
        eprintln!(
            "SKIPPED 1 integration test ({}): default font {} is not installed",
            test_name, font_path
        );
    }
    available
}

#[test]
fn test_generates_multi_page_pdf() {
    if !default_font_available("test_generates_multi_page_pdf") {
        return;
    }
    setup();
    let output_file = "test-attendees.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "tests/fixtures/attendees.csv",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated: tests/output/test-attendees.pdf"), "{}", stdout);
    assert!(stdout.contains("Attendees: 9"), "{}", stdout);
    assert!(stdout.contains("Pages: 2"), "{}", stdout);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let doc = lopdf::Document::load(&path).expect("Output is not a readable PDF");
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_missing_input_file() {
    let output = cargo_bin()
        .args([
            "tests/fixtures/nonexistent.csv",
            "-o", "tests/output/should-not-exist.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing input");
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error:"));
    assert!(!output_dir().join("should-not-exist.pdf").exists());
}

#[test]
fn test_missing_column() {
    let output = cargo_bin()
        .args([
            "tests/fixtures/missing_handle_column.csv",
            "-o", "tests/output/missing-column.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for missing column");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("인스타그램ID"), "{}", stderr);
    assert!(!output_dir().join("missing-column.pdf").exists());
}

#[test]
fn test_blank_field_aborts_run() {
    let output = cargo_bin()
        .args([
            "tests/fixtures/blank_handle.csv",
            "-o", "tests/output/blank-field.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for blank field");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Row 3"), "{}", stderr);
    assert!(!output_dir().join("blank-field.pdf").exists());
}

#[test]
fn test_header_only_table() {
    let output = cargo_bin()
        .args([
            "tests/fixtures/header_only.csv",
            "-o", "tests/output/header-only.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Command should have failed for an empty table");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no attendee rows"), "{}", stderr);
    assert!(!output_dir().join("header-only.pdf").exists());
}

#[test]
fn test_input_is_required() {
    let output = cargo_bin().output().expect("Failed to execute command");
    assert!(!output.status.success(), "Command should have failed without input");
}
