//! Integration tests for batch admission and file processing.

use std::fs;
use std::path::PathBuf;

use slate_cli::batch::{
    MAX_BATCH_FILES, MAX_FILE_SIZE, Rejection, admit_files, check_file, process_file,
};
use slate_cli::config::{ConfigOverrides, load_config};
use slate_cli::types::{BatchResult, FileStatus, RejectedFile};
use slate_model::ProcessConfig;
use tempfile::tempdir;

const PROJECT: &str = concat!(
    "<xmeml><clip id=\"c1\"><name>A001C002</name>",
    "<logginginfo><scene>a1</scene><shottake>3-5</shottake></logginginfo>",
    "<filmdata><cameraroll>BCam002</cameraroll></filmdata>",
    "<labels><label>Keep</label></labels></clip></xmeml>",
);

#[test]
fn admission_filters_by_extension_and_size() {
    let dir = tempdir().expect("tempdir");
    let good = dir.path().join("day1.XML");
    fs::write(&good, PROJECT).expect("write");
    let text = dir.path().join("notes.txt");
    fs::write(&text, "hello").expect("write");
    let huge = dir.path().join("huge.xml");
    fs::File::create(&huge)
        .and_then(|file| file.set_len(MAX_FILE_SIZE + 1))
        .expect("sparse file");
    let missing = dir.path().join("missing.xml");

    let admission =
        admit_files(&[good.clone(), text.clone(), huge.clone(), missing.clone()]).expect("admit");
    assert_eq!(admission.accepted, vec![good]);
    assert_eq!(admission.rejected.len(), 3);
    assert_eq!(admission.rejected[0].reason, Rejection::NotXml);
    assert_eq!(
        admission.rejected[1].reason,
        Rejection::TooLarge {
            size: MAX_FILE_SIZE + 1
        }
    );
    assert!(matches!(
        admission.rejected[2].reason,
        Rejection::Unreadable { .. }
    ));
    assert!(check_file(&missing).is_err());
}

#[test]
fn oversized_batch_is_refused() {
    let paths: Vec<PathBuf> = (0..=MAX_BATCH_FILES)
        .map(|index| PathBuf::from(format!("take{index}.xml")))
        .collect();
    let error = admit_files(&paths).expect_err("too many files");
    assert!(error.to_string().contains("at most 99 files"));
}

#[test]
fn processed_file_written_next_to_input() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("day1.xml");
    fs::write(&input, PROJECT).expect("write");

    let mut seen = Vec::new();
    let summary = process_file(
        &input,
        &ProcessConfig::default(),
        None,
        false,
        &mut |percent| seen.push(percent),
    );
    assert_eq!(summary.status, FileStatus::Written);
    let output = dir.path().join("day1_Double_LOVE.xml");
    assert_eq!(summary.output.as_deref(), Some(output.as_path()));
    let written = fs::read_to_string(&output).expect("output");
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(written.contains("<name>A001_03_05bc_kp</name>"));
    assert_eq!(seen.last(), Some(&100));
    let report = summary.report.expect("report");
    assert_eq!(report.renamed_count(), 1);
}

#[test]
fn output_dir_is_created_and_dry_run_writes_nothing() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("day2.xml");
    fs::write(&input, PROJECT).expect("write");
    let out = dir.path().join("renamed");

    let dry = process_file(
        &input,
        &ProcessConfig::default(),
        Some(out.as_path()),
        true,
        &mut |_| {},
    );
    assert_eq!(dry.status, FileStatus::DryRun);
    assert!(!out.exists());

    let written = process_file(
        &input,
        &ProcessConfig::default(),
        Some(out.as_path()),
        false,
        &mut |_| {},
    );
    assert_eq!(written.status, FileStatus::Written);
    assert!(out.join("day2_Double_LOVE.xml").is_file());
}

#[test]
fn invalid_xml_is_reported_per_file() {
    let dir = tempdir().expect("tempdir");
    let input = dir.path().join("broken.xml");
    fs::write(&input, "<xmeml><clip>").expect("write");

    let summary = process_file(
        &input,
        &ProcessConfig::default(),
        None,
        false,
        &mut |_| {},
    );
    assert_eq!(summary.status, FileStatus::Failed);
    assert_eq!(summary.error_code, Some("INVALID_XML"));
    assert!(!dir.path().join("broken_Double_LOVE.xml").exists());

    let result = BatchResult::new(vec![summary], Vec::new(), false);
    assert!(result.has_errors);
}

#[test]
fn config_file_and_overrides_combine() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("slate.toml");
    fs::write(&path, "width = 3840\nheight = 2160\nprefix = \"D1_\"\n").expect("write");

    let overrides = ConfigOverrides {
        height: Some(1600),
        ..ConfigOverrides::default()
    };
    let config = load_config(Some(path.as_path()), &overrides).expect("config");
    assert_eq!(config.width, 3840);
    assert_eq!(config.height, 1600);
    assert_eq!(config.prefix, "D1_");

    fs::write(&path, "width = 9000\n").expect("write");
    assert!(load_config(Some(path.as_path()), &ConfigOverrides::default()).is_err());
}

#[test]
fn rejected_file_json_shape() {
    let rejected = RejectedFile {
        path: PathBuf::from("notes.txt"),
        reason: Rejection::NotXml,
    };
    let json = serde_json::to_string(&rejected).expect("json");
    insta::assert_snapshot!(json, @r#"{"path":"notes.txt","reason":"not_xml"}"#);
}
