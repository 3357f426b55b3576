//! Commands executed end to end against files on disk.

use ads_cli::{build_cli, execute, Invocation, RunStatus};
use ads_test_utils::{document_json_with_evidence, parse_csv, DEMO_JSON};
use pretty_assertions::assert_eq;
use std::path::Path;

fn invocation(args: &[&str]) -> Invocation {
    let matches = build_cli().try_get_matches_from(args).unwrap();
    Invocation::from_matches(&matches).unwrap()
}

async fn run(args: &[&str]) -> (RunStatus, String) {
    let invocation = invocation(args);
    let config = invocation.resolve_config().unwrap();
    let mut out = Vec::new();
    let status = execute(&invocation, &config, &mut out).await.unwrap();
    (status, String::from_utf8(out).unwrap())
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

#[tokio::test]
async fn render_prints_all_views() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "scorecard.json", DEMO_JSON);

    let (status, out) = run(&["ads-scorecard", "render", "--source", &source]).await;
    assert_eq!(status, RunStatus::Success);
    assert!(out.starts_with("Scorecard loaded."));
    assert!(out.contains("Jordan Rivera"));
    assert!(out.contains("85% overall"));
    assert!(out.contains("Problem Solving"));
    assert!(out.contains("4 items"));
}

#[tokio::test]
async fn render_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.json").display().to_string();

    let (status, out) = run(&["ads-scorecard", "render", "--source", &missing]).await;
    assert_eq!(status, RunStatus::Failure);
    assert_eq!(out.trim(), "Unable to load scorecard data.");
}

#[tokio::test]
async fn export_writes_sorted_csv() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "scorecard.json", &document_json_with_evidence(&["b2", "a1"]));
    let out_dir = dir.path().join("exports");
    let out_dir_arg = out_dir.display().to_string();

    let (status, out) = run(&[
        "ads-scorecard",
        "export",
        "--source",
        &source,
        "--out-dir",
        &out_dir_arg,
    ])
    .await;
    assert_eq!(status, RunStatus::Success);

    let csv = std::fs::read_to_string(out_dir.join("scorecard-demo.csv")).unwrap();
    let records = parse_csv(&csv);
    assert_eq!(records[1][0], "a1");
    assert_eq!(records[2][0], "b2");

    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("saved "));
    assert!(lines[0].ends_with("scorecard-demo.csv"));
    assert!(lines[1].starts_with("sha256 "));
    assert_eq!(lines[1].len(), "sha256 ".len() + 64);
}

#[tokio::test]
async fn export_without_evidence_is_a_notice() {
    let dir = tempfile::tempdir().unwrap();
    let source = write(dir.path(), "scorecard.json", &document_json_with_evidence(&[]));
    let out_dir = dir.path().join("exports");
    let out_dir_arg = out_dir.display().to_string();

    let (status, out) = run(&[
        "ads-scorecard",
        "export",
        "--source",
        &source,
        "--out-dir",
        &out_dir_arg,
    ])
    .await;
    assert_eq!(status, RunStatus::Success);
    assert_eq!(out.trim(), "No evidence to export.");
    assert!(!out_dir.exists());
}

#[tokio::test]
async fn config_prints_effective_toml() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(
        dir.path(),
        "ads.yaml",
        "source: https://example.org/scorecard.json\nfetch_timeout_secs: 7\n",
    );

    let (status, out) = run(&["ads-scorecard", "config", "--config", &config]).await;
    assert_eq!(status, RunStatus::Success);
    assert!(out.contains("source = \"https://example.org/scorecard.json\""));
    assert!(out.contains("fetch_timeout_secs = 7"));
    assert!(out.contains("[tiers]"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = write(dir.path(), "ads.toml", "fetch_timeout_secs = 0\n");

    let invocation = invocation(&["ads-scorecard", "config", "--config", &config]);
    assert!(invocation.resolve_config().is_err());
}
