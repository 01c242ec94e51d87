//! Clip renaming pipeline.
//!
//! A run moves through fixed stages:
//!
//! 1. **Parsing** - the text becomes a [`Document`]; malformed input aborts the
//!    run with [`ProcessError::InvalidXml`]
//! 2. **PerClipProcessing** - label spellings are fixed, then every `clip` is
//!    extracted, formatted, named and propagated on its own; a clip that fails
//!    any step is skipped and left untouched
//! 3. **DocumentNormalizing** - the [`DocumentPass`]es run unconditionally
//! 4. **Serialized** - the root element is written after the XML declaration
//!
//! # Example
//!
//! ```
//! use slate_core::pipeline::transform;
//! use slate_model::ProcessConfig;
//!
//! let xml = transform("<xmeml><width>720</width></xmeml>", &ProcessConfig::default())?;
//! assert!(xml.ends_with("<xmeml><width>1920</width></xmeml>"));
//! # Ok::<(), slate_model::ProcessError>(())
//! ```

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use slate_model::{
    ProcessConfig, ProcessError, RenamedClip, Result, SchemaProfile, SkipReason, SkippedClip,
    TransformReport,
};
use slate_xml::{Document, NodeId};
use tracing::{debug, info, info_span, trace, warn};

use crate::clip_data::process_clip_data;
use crate::extract::extract_clip_elements;
use crate::naming::generate_name;
use crate::normalize::{DocumentPass, build_default_passes, normalize_document};
use crate::propagate::{SequenceIndex, fix_all_label_spellings, propagate};

/// Share of the progress range spent on per-clip work.
const CLIP_PROGRESS_SPAN: usize = 90;
const NORMALIZED_PROGRESS: u8 = 95;
const DONE_PROGRESS: u8 = 100;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Parsing,
    PerClipProcessing,
    DocumentNormalizing,
    Serialized,
    /// Parsing failed; nothing is returned.
    Failed,
}

impl PipelineStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Parsing => "parsing",
            Self::PerClipProcessing => "per_clip_processing",
            Self::DocumentNormalizing => "document_normalizing",
            Self::Serialized => "serialized",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rewritten document plus what happened to it.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub xml: String,
    pub report: TransformReport,
}

/// Ordered document passes applied after the clips.
pub struct ClipPipeline {
    passes: Vec<Box<dyn DocumentPass>>,
}

impl Default for ClipPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipPipeline {
    /// Pipeline with [`build_default_passes`].
    pub fn new() -> Self {
        Self {
            passes: build_default_passes(),
        }
    }

    pub fn with_passes(passes: Vec<Box<dyn DocumentPass>>) -> Self {
        Self { passes }
    }

    #[must_use]
    pub fn add_pass(mut self, pass: Box<dyn DocumentPass>) -> Self {
        self.passes.push(pass);
        self
    }

    pub fn pass_names(&self) -> Vec<&str> {
        self.passes.iter().map(|pass| pass.pass_name()).collect()
    }

    /// Transform `content`, reporting progress (0-100) to `on_progress`.
    ///
    /// A panicking callback is caught and logged; it never affects the result.
    ///
    /// # Errors
    ///
    /// [`ProcessError::InvalidXml`] when `content` is not well-formed.
    pub fn run(
        &self,
        content: &str,
        config: &ProcessConfig,
        on_progress: &mut dyn FnMut(u8),
    ) -> Result<TransformOutput> {
        let span = info_span!("transform", profile = config.profile.name());
        let _guard = span.enter();
        let mut stage = PipelineStage::Idle;
        trace!(%stage, "pipeline ready");

        stage = PipelineStage::Parsing;
        trace!(%stage, bytes = content.len());
        let mut doc = match Document::parse(content) {
            Ok(doc) => doc,
            Err(error) => {
                stage = PipelineStage::Failed;
                debug!(%stage, %error, "input is not well-formed");
                return Err(ProcessError::InvalidXml {
                    message: error.to_string(),
                });
            }
        };

        stage = PipelineStage::PerClipProcessing;
        let label_spellings = match config.profile {
            SchemaProfile::Labels => fix_all_label_spellings(&mut doc),
            SchemaProfile::CommentKeyword => 0,
        };
        let clips = doc.elements_by_tag_name("clip").to_vec();
        let sequences = SequenceIndex::build(&doc);
        trace!(%stage, clips = clips.len(), sequences = sequences.len());

        let mut report = TransformReport {
            clips_seen: clips.len(),
            ..TransformReport::default()
        };
        for (index, clip) in clips.iter().enumerate() {
            match process_clip(&mut doc, *clip, config, &sequences) {
                Ok(renamed) => {
                    debug!(clip_id = %renamed.clip_id, name = %renamed.name, "renamed clip");
                    report.renamed.push(renamed);
                }
                Err(reason) => {
                    let clip_id = doc.attribute(*clip, "id").map(str::to_string);
                    debug!(clip_id = ?clip_id, %reason, "skipped clip");
                    report.skipped.push(SkippedClip { clip_id, reason });
                }
            }
            let percent = (index + 1) * CLIP_PROGRESS_SPAN / clips.len();
            notify(on_progress, u8::try_from(percent).unwrap_or(DONE_PROGRESS));
        }

        stage = PipelineStage::DocumentNormalizing;
        trace!(%stage);
        let mut normalized = normalize_document(&mut doc, config, &self.passes);
        normalized.label_spellings = label_spellings;
        report.normalized = normalized;
        notify(on_progress, NORMALIZED_PROGRESS);

        let xml = doc.to_xml_string().map_err(|error| ProcessError::Serialize {
            message: error.to_string(),
        })?;
        stage = PipelineStage::Serialized;
        notify(on_progress, DONE_PROGRESS);

        info!(
            %stage,
            clips = report.clips_seen,
            renamed = report.renamed_count(),
            skipped = report.skipped_count(),
            "transform complete"
        );
        Ok(TransformOutput { xml, report })
    }
}

/// Extract, format, name and propagate a single clip.
///
/// Nothing is written to the document until the name is known, so a skipped
/// clip is left exactly as it was.
fn process_clip(
    doc: &mut Document,
    clip: NodeId,
    config: &ProcessConfig,
    sequences: &SequenceIndex,
) -> std::result::Result<RenamedClip, SkipReason> {
    let elements = extract_clip_elements(doc, clip, config.profile)?;
    let data = process_clip_data(doc, &elements)?;
    let clip_id = doc
        .attribute(clip, "id")
        .map(str::to_string)
        .ok_or(SkipReason::MissingId)?;
    let name = generate_name(&data, config.template(), &config.prefix);
    let sequence = propagate(doc, clip, &clip_id, &name, config.profile, sequences);
    let sequence_id = sequence
        .and_then(|node| doc.attribute(node, "id"))
        .map(str::to_string);
    Ok(RenamedClip {
        clip_id,
        name,
        sequence_id,
    })
}

fn notify(on_progress: &mut dyn FnMut(u8), percent: u8) {
    if panic::catch_unwind(AssertUnwindSafe(|| on_progress(percent))).is_err() {
        warn!(percent, "progress callback panicked");
    }
}

/// Rewrite a project file with the default passes.
///
/// # Errors
///
/// [`ProcessError::InvalidXml`] when `content` is not well-formed.
pub fn transform(content: &str, config: &ProcessConfig) -> Result<String> {
    ClipPipeline::new()
        .run(content, config, &mut |_| {})
        .map(|output| output.xml)
}

/// Like [`transform`], also returning the [`TransformReport`].
///
/// # Errors
///
/// [`ProcessError::InvalidXml`] when `content` is not well-formed.
pub fn transform_with_report(
    content: &str,
    config: &ProcessConfig,
    on_progress: &mut dyn FnMut(u8),
) -> Result<TransformOutput> {
    ClipPipeline::new().run(content, config, on_progress)
}
