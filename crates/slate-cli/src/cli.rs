//! Command line definitions for `slate`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use slate_cli::config::ConfigOverrides;
use slate_model::SchemaProfile;

#[derive(Parser)]
#[command(
    name = "slate",
    version,
    about = "Rename clips in editorial XML from their slate metadata",
    long_about = "Rename clips in editorial XML project files from their slate metadata.\n\n\
                  Scene, shot/take, camera roll and rating are formatted into a clip name \
                  that is written to the clip, its sequence and its clip items.\n\
                  Frame sizes, DIT log notes and image-sequence paths are normalized."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Rewrite one or more XML project files.
    Run(RunArgs),

    /// List the supported schema profiles and their default name templates.
    Profiles,
}

#[derive(Parser)]
pub struct RunArgs {
    /// XML files to process (at most 99).
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Directory for rewritten files (default: next to each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML file with processing options.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Frame width written to every `width` element.
    #[arg(long = "width")]
    pub width: Option<u32>,

    /// Frame height written to every `height` element.
    #[arg(long = "height")]
    pub height: Option<u32>,

    /// Clip name template, e.g. "{scene}_{shot}_{take}{camera}_{Rating}".
    #[arg(long = "format", value_name = "TEMPLATE")]
    pub format: Option<String>,

    /// Text prepended to every generated name.
    #[arg(long = "prefix")]
    pub prefix: Option<String>,

    /// Schema the project files were exported with.
    #[arg(long = "profile", value_enum)]
    pub profile: Option<ProfileArg>,

    /// Process and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the batch report as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            width: self.width,
            height: self.height,
            format: self.format.clone(),
            prefix: self.prefix.clone(),
            profile: self.profile.map(SchemaProfile::from),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Labels,
    CommentKeyword,
}

impl From<ProfileArg> for SchemaProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Labels => Self::Labels,
            ProfileArg::CommentKeyword => Self::CommentKeyword,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
