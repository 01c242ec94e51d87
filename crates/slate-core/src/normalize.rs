//! Whole-document normalization passes.
//!
//! Each pass implements [`DocumentPass`] and runs once per document after the
//! per-clip work, whatever happened to individual clips. Passes only rewrite
//! elements that exist, so they cannot fail.
//!
//! # Standard Pass Order
//!
//! 1. **ResolutionPass** - overwrite every `width` / `height`
//! 2. **DitNotePass** - replace the placeholder DIT log note
//! 3. **PathUrlPass** - strip frame numbers from image-sequence media paths

use std::sync::LazyLock;

use regex::Regex;
use slate_model::{NormalizationCounts, ProcessConfig, SchemaProfile};
use slate_xml::Document;
use tracing::debug;

/// Log note written by DIT tools that leave the field unset.
pub const DIT_PLACEHOLDER: &str = "DIT: (null)";

/// Replacement for [`DIT_PLACEHOLDER`].
pub const DIT_REPLACEMENT: &str = "Generated by https://double-love.ahua.space";

static ARX_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[0-9]+\.arx").expect("Invalid arx frame regex"));
static ARI_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[0-9]+\.ari").expect("Invalid ari frame regex"));
static DNG_FRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_[0-9]+\.dng").expect("Invalid dng frame regex"));

/// A single rewrite applied to the whole document.
pub trait DocumentPass: Send + Sync {
    /// Apply the pass, recording how many elements changed in `counts`.
    fn apply(&self, doc: &mut Document, config: &ProcessConfig, counts: &mut NormalizationCounts);

    /// Human-readable name for logging.
    fn pass_name(&self) -> &str;

    /// Whether the pass applies to documents of `profile`.
    fn applies_to(&self, _profile: SchemaProfile) -> bool {
        true
    }
}

/// Writes the configured resolution into every `width` and `height`.
pub struct ResolutionPass;

impl DocumentPass for ResolutionPass {
    fn apply(&self, doc: &mut Document, config: &ProcessConfig, counts: &mut NormalizationCounts) {
        let width = config.width.to_string();
        let height = config.height.to_string();
        for node in doc.elements_by_tag_name("width").to_vec() {
            doc.set_text_content(node, &width);
            counts.widths += 1;
        }
        for node in doc.elements_by_tag_name("height").to_vec() {
            doc.set_text_content(node, &height);
            counts.heights += 1;
        }
    }

    fn pass_name(&self) -> &str {
        "resolution"
    }
}

/// Replaces log notes that are exactly [`DIT_PLACEHOLDER`].
pub struct DitNotePass;

impl DocumentPass for DitNotePass {
    fn apply(&self, doc: &mut Document, _config: &ProcessConfig, counts: &mut NormalizationCounts) {
        for node in doc.elements_by_tag_name("lognote").to_vec() {
            if doc.text_content(node) == DIT_PLACEHOLDER {
                doc.set_text_content(node, DIT_REPLACEMENT);
                counts.lognotes += 1;
            }
        }
    }

    fn pass_name(&self) -> &str {
        "dit_note"
    }
}

/// Points `pathurl`s at the sequence rather than one frame of it.
pub struct PathUrlPass;

impl DocumentPass for PathUrlPass {
    fn apply(&self, doc: &mut Document, _config: &ProcessConfig, counts: &mut NormalizationCounts) {
        for node in doc.elements_by_tag_name("pathurl").to_vec() {
            let text = doc.text_content(node);
            if text.is_empty() {
                continue;
            }
            let normalized = normalize_path_url(&text);
            if normalized != text {
                doc.set_text_content(node, &normalized);
                counts.pathurls += 1;
            }
        }
    }

    fn pass_name(&self) -> &str {
        "path_url"
    }

    fn applies_to(&self, profile: SchemaProfile) -> bool {
        profile == SchemaProfile::Labels
    }
}

/// Drop frame numbers from ARRIRAW (`.arx`, `.ari`) and DNG sequence paths.
pub fn normalize_path_url(path: &str) -> String {
    let path = ARX_FRAME.replace_all(path, ".arx");
    let path = ARI_FRAME.replace_all(&path, ".ari");
    DNG_FRAME.replace_all(&path, ".dng").into_owned()
}

/// The passes run after clip processing, in order.
pub fn build_default_passes() -> Vec<Box<dyn DocumentPass>> {
    vec![
        Box::new(ResolutionPass),
        Box::new(DitNotePass),
        Box::new(PathUrlPass),
    ]
}

/// Run every applicable pass in `passes`.
pub fn normalize_document(
    doc: &mut Document,
    config: &ProcessConfig,
    passes: &[Box<dyn DocumentPass>],
) -> NormalizationCounts {
    let mut counts = NormalizationCounts::default();
    for pass in passes {
        if !pass.applies_to(config.profile) {
            debug!(pass = pass.pass_name(), "pass skipped for profile");
            continue;
        }
        pass.apply(doc, config, &mut counts);
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_url_frames_removed() {
        assert_eq!(
            normalize_path_url("file:///A002C003.0000123.arx"),
            "file:///A002C003.arx"
        );
        assert_eq!(
            normalize_path_url("file:///a.001.ari|b.002.ari"),
            "file:///a.ari|b.ari"
        );
        assert_eq!(normalize_path_url("file:///clip_000042.dng"), "file:///clip.dng");
        assert_eq!(normalize_path_url("file:///clip.mov"), "file:///clip.mov");
        assert_eq!(normalize_path_url("file:///x.arx"), "file:///x.arx");
    }

    #[test]
    fn passes_rewrite_document() {
        let mut doc = Document::parse(
            "<r><width>3840</width><height>2160</height><lognote>DIT: (null)</lognote>\
             <lognote>DIT: someone</lognote><pathurl>a_01.dng</pathurl><pathurl/></r>",
        )
        .expect("parse");
        let config = ProcessConfig::default();
        let counts = normalize_document(&mut doc, &config, &build_default_passes());
        assert_eq!(
            counts,
            NormalizationCounts {
                widths: 1,
                heights: 1,
                lognotes: 1,
                pathurls: 1,
                label_spellings: 0,
            }
        );
        assert_eq!(
            doc.serialize_root().expect("serialize"),
            "<r><width>1920</width><height>1080</height>\
             <lognote>Generated by https://double-love.ahua.space</lognote>\
             <lognote>DIT: someone</lognote><pathurl>a.dng</pathurl><pathurl/></r>"
        );
    }

    #[test]
    fn legacy_profile_keeps_path_urls() {
        let mut doc = Document::parse("<r><pathurl>a.000001.ari</pathurl></r>").expect("parse");
        let config = ProcessConfig::default().with_profile(SchemaProfile::CommentKeyword);
        let counts = normalize_document(&mut doc, &config, &build_default_passes());
        assert_eq!(counts.pathurls, 0);
        assert_eq!(
            doc.serialize_root().expect("serialize"),
            "<r><pathurl>a.000001.ari</pathurl></r>"
        );
    }
}
