//! Batch admission, output naming and per-file processing.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use slate_core::pipeline::{TransformOutput, transform_with_report};
use slate_model::{ProcessConfig, ProcessError, TransformReport};
use tracing::{info, info_span, warn};

use crate::types::{FileStatus, FileSummary, RejectedFile};

/// Largest accepted input file (50 MiB).
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Most files accepted in one batch.
pub const MAX_BATCH_FILES: usize = 99;

/// Appended to the input stem to name the rewritten file.
pub const OUTPUT_SUFFIX: &str = "_Double_LOVE";

const XML_EXTENSION: &str = ".xml";

/// Why an input file was not processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    NotXml,
    TooLarge { size: u64 },
    Unreadable { message: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotXml => write!(f, "not an .xml file"),
            Self::TooLarge { size } => {
                write!(f, "{size} bytes exceeds the {MAX_FILE_SIZE} byte limit")
            }
            Self::Unreadable { message } => write!(f, "unreadable: {message}"),
        }
    }
}

/// Result of screening a batch.
#[derive(Debug, Default)]
pub struct Admission {
    pub accepted: Vec<PathBuf>,
    pub rejected: Vec<RejectedFile>,
}

/// Whether the file name ends in `.xml`, ignoring case.
pub fn has_xml_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.to_ascii_lowercase().ends_with(XML_EXTENSION))
}

/// Check a single input against the extension and size limits.
pub fn check_file(path: &Path) -> std::result::Result<(), Rejection> {
    if !has_xml_extension(path) {
        return Err(Rejection::NotXml);
    }
    let metadata = fs::metadata(path).map_err(|error| Rejection::Unreadable {
        message: error.to_string(),
    })?;
    if !metadata.is_file() {
        return Err(Rejection::Unreadable {
            message: "not a regular file".to_string(),
        });
    }
    if metadata.len() > MAX_FILE_SIZE {
        return Err(Rejection::TooLarge {
            size: metadata.len(),
        });
    }
    Ok(())
}

/// Split `paths` into files to process and files rejected with a reason.
///
/// # Errors
///
/// Fails without checking any file when the batch holds more than
/// [`MAX_BATCH_FILES`] paths.
pub fn admit_files(paths: &[PathBuf]) -> Result<Admission> {
    if paths.len() > MAX_BATCH_FILES {
        bail!(
            "at most {MAX_BATCH_FILES} files can be processed at once, got {}",
            paths.len()
        );
    }
    let mut admission = Admission::default();
    for path in paths {
        match check_file(path) {
            Ok(()) => admission.accepted.push(path.clone()),
            Err(reason) => {
                warn!(path = %path.display(), %reason, "rejected input file");
                admission.rejected.push(RejectedFile {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }
    Ok(admission)
}

/// `take1.xml` becomes `take1_Double_LOVE.xml`.
pub fn output_file_name(file_name: &str) -> String {
    let split = file_name.len().saturating_sub(XML_EXTENSION.len());
    let stem = match file_name.get(split..) {
        Some(extension) if extension.eq_ignore_ascii_case(XML_EXTENSION) => &file_name[..split],
        _ => file_name,
    };
    format!("{stem}{OUTPUT_SUFFIX}{XML_EXTENSION}")
}

/// Where the rewritten copy of `input` goes: `output_dir`, or next to the input.
pub fn output_path(input: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("invalid file name: {}", input.display()))?;
    let directory = match output_dir {
        Some(directory) => directory,
        None => input.parent().unwrap_or_else(|| Path::new("")),
    };
    Ok(directory.join(output_file_name(file_name)))
}

/// Overall batch progress (0-100) while file `index` of `count` is at `file_percent`.
pub fn overall_progress(index: usize, count: usize, file_percent: u8) -> u64 {
    if count == 0 {
        return 100;
    }
    let done = index as u64 * 100 + u64::from(file_percent.min(100));
    done / count as u64
}

/// Transform one file and write the result unless `dry_run` is set.
///
/// Failures are captured in the returned summary instead of aborting the batch.
pub fn process_file(
    input: &Path,
    config: &ProcessConfig,
    output_dir: Option<&Path>,
    dry_run: bool,
    on_progress: &mut dyn FnMut(u8),
) -> FileSummary {
    let span = info_span!("file", path = %input.display());
    let _guard = span.enter();
    match transform_file(input, config, output_dir, dry_run, on_progress) {
        Ok((output, report)) => {
            info!(
                renamed = report.renamed_count(),
                skipped = report.skipped_count(),
                output = %output.display(),
                dry_run,
                "processed file"
            );
            FileSummary {
                input: input.to_path_buf(),
                output: Some(output),
                status: if dry_run {
                    FileStatus::DryRun
                } else {
                    FileStatus::Written
                },
                report: Some(report),
                error: None,
                error_code: None,
            }
        }
        Err(error) => {
            warn!(error = %format!("{error:#}"), "file failed");
            FileSummary {
                input: input.to_path_buf(),
                output: None,
                status: FileStatus::Failed,
                report: None,
                error_code: error.downcast_ref::<ProcessError>().map(ProcessError::code),
                error: Some(format!("{error:#}")),
            }
        }
    }
}

fn transform_file(
    input: &Path,
    config: &ProcessConfig,
    output_dir: Option<&Path>,
    dry_run: bool,
    on_progress: &mut dyn FnMut(u8),
) -> Result<(PathBuf, TransformReport)> {
    let output = output_path(input, output_dir)?;
    let content =
        fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let TransformOutput { xml, report } = transform_with_report(&content, config, on_progress)?;
    if !dry_run {
        if let Some(directory) = output_dir {
            fs::create_dir_all(directory)
                .with_context(|| format!("create {}", directory.display()))?;
        }
        fs::write(&output, xml).with_context(|| format!("write {}", output.display()))?;
    }
    Ok((output, report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names() {
        assert_eq!(output_file_name("take1.xml"), "take1_Double_LOVE.xml");
        assert_eq!(output_file_name("Day 2.XML"), "Day 2_Double_LOVE.xml");
        assert_eq!(output_file_name("a.xml.xml"), "a.xml_Double_LOVE.xml");
        assert_eq!(output_file_name("notes"), "notes_Double_LOVE.xml");
    }

    #[test]
    fn output_goes_next_to_input_by_default() {
        assert_eq!(
            output_path(Path::new("/shoot/day1.xml"), None).expect("path"),
            PathBuf::from("/shoot/day1_Double_LOVE.xml")
        );
        assert_eq!(
            output_path(Path::new("day1.xml"), Some(Path::new("out"))).expect("path"),
            PathBuf::from("out/day1_Double_LOVE.xml")
        );
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_xml_extension(Path::new("a.xml")));
        assert!(has_xml_extension(Path::new("dir/B.XmL")));
        assert!(!has_xml_extension(Path::new("a.xml.bak")));
        assert!(!has_xml_extension(Path::new("xml")));
    }

    #[test]
    fn progress_spans_files() {
        assert_eq!(overall_progress(0, 2, 0), 0);
        assert_eq!(overall_progress(0, 2, 100), 50);
        assert_eq!(overall_progress(1, 2, 50), 75);
        assert_eq!(overall_progress(1, 2, 100), 100);
        assert_eq!(overall_progress(0, 0, 0), 100);
    }
}
