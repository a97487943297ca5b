//! Integration tests for the channelscope CLI
//!
//! These tests exercise the full CLI workflow against temporary JSON
//! exports. They verify that commands work end-to-end without mocking.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn run_channelscope(args: &[&str], cwd: &Path) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_channelscope"))
        .args(args)
        .current_dir(cwd)
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute channelscope")
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write a small but complete analysis export into the directory.
fn write_analysis_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("analysis.json");
    fs::write(
        &path,
        r#"{
            "channel_name": "Fixture Channel",
            "channel_subscribers": "125000",
            "top_videos": [
                {"video_id": "vid1", "rank": 1, "title": "First Video", "views": 2300000},
                {"video_id": "vid2", "rank": 2, "title": "Second Video", "views": 800000}
            ],
            "video_analyses": {
                "vid1": {
                    "structured_analysis": {
                        "metrics": {"engagement_rate": "4.2%", "retention_rate": "35%"},
                        "title_analysis": {"full_text": "Strong title."},
                        "thumbnail_analysis": {"full_text": "Clear thumbnail."}
                    }
                },
                "vid2": {
                    "structured_analysis": {
                        "metrics": {"engagement_rate": "1.8%"}
                    }
                }
            },
            "patterns_report": {
                "sections": {
                    "common patterns and success factors":
                        "1. **Hooks**: open strong. 2. **Pacing**: cut fast. 3. **CTA**: ask once. 4. **Titles**: use numbers.",
                    "actionable recommendations":
                        "1. **Post Weekly**: keep cadence."
                }
            }
        }"#,
    )
    .expect("write analysis fixture");
    path
}

fn write_media_kit_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("media_kit.json");
    fs::write(
        &path,
        r#"{
            "channelInfo": {"title": "Fixture Channel", "subscriberCount": 125000},
            "audience": {
                "ageGender": {"male": {"age18-24": 20.0}, "female": {"age18-24": 15.0}},
                "countries": {"US": 40.0, "GB": 10.0},
                "devices": {"mobile": {"percentage": 60.0, "views": 100000}}
            },
            "performance": {"averages": {"dailyViews": 15000, "engagementRate": 3.1}},
            "topContent": {"topVideos": [
                {"id": "v1", "title": "Hit", "publishedAt": "2024-01-05T10:30:00Z",
                 "duration": "PT12M4S", "viewCount": 900000}
            ]}
        }"#,
    )
    .expect("write media kit fixture");
    path
}

// =============================================================================
// Basic Command Tests
// =============================================================================

#[test]
fn test_help_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_channelscope"))
        .arg("--help")
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("channelscope"));
    assert!(out.contains("render"));
    assert!(out.contains("serve"));
}

#[test]
fn test_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_channelscope"))
        .arg("--version")
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
    assert!(stdout(&output).contains("channelscope"));
}

// =============================================================================
// Shell Completion Tests
// =============================================================================

#[test]
fn test_completion_zsh() {
    let output = Command::new(env!("CARGO_BIN_EXE_channelscope"))
        .args(["completion", "zsh"])
        .output()
        .expect("Failed to execute");

    assert!(
        output.status.success(),
        "completion zsh failed: {}",
        stderr(&output)
    );
    assert!(
        stdout(&output).contains("#compdef channelscope"),
        "zsh completion should contain #compdef"
    );
}

#[test]
fn test_completion_bash() {
    let output = Command::new(env!("CARGO_BIN_EXE_channelscope"))
        .args(["completion", "bash"])
        .output()
        .expect("Failed to execute");

    assert!(output.status.success());
    assert!(stdout(&output).contains("channelscope"));
}

// =============================================================================
// Render Tests
// =============================================================================

#[test]
fn test_render_writes_both_dashboards() {
    let tmp = TempDir::new().unwrap();
    write_analysis_fixture(tmp.path());
    write_media_kit_fixture(tmp.path());

    let output = run_channelscope(
        &[
            "render",
            "--analysis",
            "analysis.json",
            "--media-kit",
            "media_kit.json",
            "--output-dir",
            "out",
        ],
        tmp.path(),
    );
    assert!(output.status.success(), "render failed: {}", stderr(&output));

    let analysis_html = fs::read_to_string(tmp.path().join("out/analysis.html")).unwrap();
    assert!(analysis_html.contains("Fixture Channel"));
    assert!(analysis_html.contains("const data = "));
    assert!(analysis_html.contains("First Video"));

    let kit_html = fs::read_to_string(tmp.path().join("out/media_kit.html")).unwrap();
    assert!(kit_html.contains("Media Kit"));
    assert!(kit_html.contains("age-gender-chart"));
}

#[test]
fn test_render_missing_analysis_still_renders_media_kit() {
    let tmp = TempDir::new().unwrap();
    write_media_kit_fixture(tmp.path());

    let output = run_channelscope(
        &[
            "render",
            "--analysis",
            "missing.json",
            "--media-kit",
            "media_kit.json",
            "--output-dir",
            "out",
        ],
        tmp.path(),
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.json"));
    // The media kit still rendered despite the analysis failure.
    assert!(tmp.path().join("out/media_kit.html").exists());
    assert!(!tmp.path().join("out/analysis.html").exists());
}

// =============================================================================
// Patterns Tests
// =============================================================================

#[test]
fn test_patterns_default_section() {
    let tmp = TempDir::new().unwrap();
    write_analysis_fixture(tmp.path());

    let output = run_channelscope(&["patterns", "--analysis", "analysis.json"], tmp.path());
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Common Patterns"));
    assert!(out.contains("Hooks"));
    assert!(out.contains("Titles"));
}

#[test]
fn test_patterns_factors_are_second_half() {
    let tmp = TempDir::new().unwrap();
    write_analysis_fixture(tmp.path());

    let output = run_channelscope(
        &["patterns", "--analysis", "analysis.json", "--factors"],
        tmp.path(),
    );
    assert!(output.status.success());
    let out = stdout(&output);
    // Four entries total, so factors are entries three and four.
    assert!(out.contains("CTA"));
    assert!(out.contains("Titles"));
    assert!(!out.contains("Hooks"));
    assert!(!out.contains("Pacing"));
}

#[test]
fn test_patterns_named_section() {
    let tmp = TempDir::new().unwrap();
    write_analysis_fixture(tmp.path());

    let output = run_channelscope(
        &[
            "patterns",
            "--analysis",
            "analysis.json",
            "--section",
            "actionable recommendations",
        ],
        tmp.path(),
    );
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Actionable Recommendations"));
    assert!(out.contains("Post Weekly"));
}

#[test]
fn test_patterns_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    let output = run_channelscope(&["patterns", "--analysis", "nope.json"], tmp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error"));
}

// =============================================================================
// Summary Tests
// =============================================================================

#[test]
fn test_summary_output() {
    let tmp = TempDir::new().unwrap();
    write_analysis_fixture(tmp.path());

    let output = run_channelscope(&["summary", "--analysis", "analysis.json"], tmp.path());
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Fixture Channel"));
    assert!(out.contains("125.0K"));
    // 2.3M + 800K of top-video views.
    assert!(out.contains("3.1M"));
    // Mean of 4.2 and 1.8.
    assert!(out.contains("3.0%"));
    assert!(out.contains("First Video"));
    assert!(out.contains("Second Video"));
}

#[test]
fn test_summary_invalid_json_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("analysis.json"), "{broken").unwrap();

    let output = run_channelscope(&["summary", "--analysis", "analysis.json"], tmp.path());
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid JSON"));
}
