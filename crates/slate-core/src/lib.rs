//! Clip renaming engine for editorial XML project files.
//!
//! [`transform`] is the entry point: it parses a project, renames every clip
//! from its slate metadata, propagates the names to linked sequences and clip
//! items, normalizes resolution and media paths, and serializes the result.

pub mod clip_data;
pub mod extract;
pub mod naming;
pub mod normalize;
pub mod pipeline;
pub mod propagate;
pub mod rating;
pub mod tokens;
pub mod validate;

pub use clip_data::process_clip_data;
pub use extract::{ClipElements, RatingSource, extract_clip_elements};
pub use naming::generate_name;
pub use normalize::{
    DIT_PLACEHOLDER, DIT_REPLACEMENT, DitNotePass, DocumentPass, PathUrlPass, ResolutionPass,
    build_default_passes, normalize_document, normalize_path_url,
};
pub use pipeline::{ClipPipeline, PipelineStage, TransformOutput, transform, transform_with_report};
pub use propagate::{SequenceIndex, fix_all_label_spellings, fix_label_spelling, propagate};
pub use rating::{rating_from_comment, rating_from_label_text, rating_from_labels};
pub use tokens::{camera_identifier, cleanup_file_name, format_scene_number, format_shot_take};
pub use validate::is_valid_value;
