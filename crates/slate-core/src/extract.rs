//! Locate the metadata elements of a clip.

use slate_model::{SchemaProfile, SkipReason};
use slate_xml::{Document, NodeId};

/// Where a clip's rating comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingSource {
    /// A `comments/mastercomment2` element.
    Comment(NodeId),
    /// The clip's `labels` element; an unlabelled clip is unrated.
    Labels(Option<NodeId>),
}

/// Elements of one clip needed to build its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipElements {
    pub logginginfo: NodeId,
    pub scene: NodeId,
    pub shottake: NodeId,
    pub filmdata: NodeId,
    pub rating_source: RatingSource,
}

/// Find the required descendants of `clip` for `profile`.
///
/// # Errors
///
/// Returns [`SkipReason::MissingElement`] naming the first element not found.
pub fn extract_clip_elements(
    doc: &Document,
    clip: NodeId,
    profile: SchemaProfile,
) -> Result<ClipElements, SkipReason> {
    let required = |scope: NodeId, name: &str| {
        doc.find_descendant(scope, name)
            .ok_or_else(|| SkipReason::missing(name))
    };

    let logginginfo = required(clip, "logginginfo")?;
    let scene = required(logginginfo, "scene")?;
    let shottake = required(logginginfo, "shottake")?;
    let filmdata = required(clip, "filmdata")?;
    let rating_source = match profile {
        SchemaProfile::CommentKeyword => {
            let comments = required(clip, "comments")?;
            RatingSource::Comment(required(comments, "mastercomment2")?)
        }
        SchemaProfile::Labels => RatingSource::Labels(doc.child_element(clip, "labels")),
    };

    Ok(ClipElements {
        logginginfo,
        scene,
        shottake,
        filmdata,
        rating_source,
    })
}
