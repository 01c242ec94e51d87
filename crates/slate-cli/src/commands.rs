use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, info_span};

use slate_cli::batch::{admit_files, overall_progress, process_file};
use slate_cli::config::load_config;
use slate_cli::types::BatchResult;
use slate_model::SchemaProfile;

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, print_summary};

pub fn run_profiles() {
    let mut table = Table::new();
    table.set_header(vec!["Profile", "Default template", "Description"]);
    apply_table_style(&mut table);
    for profile in SchemaProfile::ALL {
        table.add_row(vec![
            profile.name(),
            profile.default_template(),
            profile.description(),
        ]);
    }
    println!("{table}");
}

/// Process every admitted file in order and print the outcome.
pub fn run_batch(args: &RunArgs) -> Result<BatchResult> {
    let config = load_config(args.config.as_deref(), &args.overrides())?;
    let admission = admit_files(&args.files)?;
    let span = info_span!(
        "batch",
        files = admission.accepted.len(),
        profile = config.profile.name()
    );
    let _guard = span.enter();

    let progress = progress_bar(args.json);
    let count = admission.accepted.len();
    let mut files = Vec::with_capacity(count);
    for (index, input) in admission.accepted.iter().enumerate() {
        progress.set_message(
            input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        let summary = process_file(
            input,
            &config,
            args.output_dir.as_deref(),
            args.dry_run,
            &mut |percent| progress.set_position(overall_progress(index, count, percent)),
        );
        files.push(summary);
    }
    progress.finish_and_clear();

    let result = BatchResult::new(files, admission.rejected, args.dry_run);
    info!(
        files = result.files.len(),
        rejected = result.rejected.len(),
        has_errors = result.has_errors,
        "batch complete"
    );
    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serialize batch report")?;
        println!("{json}");
    } else {
        print_summary(&result);
    }
    Ok(result)
}

fn progress_bar(hidden: bool) -> ProgressBar {
    if hidden || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░");
    bar.set_style(style);
    bar
}
