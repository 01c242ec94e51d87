//! Write a generated name (and label metadata) to a clip and its timeline.
//!
//! A clip is linked to a sequence only through the sequence id, which is
//! `sequence_id_{clip}` or `sequence_{clip}_ci` depending on the exporting tool.

use std::collections::HashMap;

use slate_model::SchemaProfile;
use slate_xml::{Document, NodeId};
use tracing::trace;

/// Known misspelling of the label colour written by some logging apps.
pub const LABEL_MISSPELLING: &str = "Celurean";
pub const LABEL_SPELLING: &str = "Cerulean";

/// Sequences keyed by id; the first sequence wins on duplicate ids.
#[derive(Debug, Default)]
pub struct SequenceIndex {
    by_id: HashMap<String, NodeId>,
}

impl SequenceIndex {
    pub fn build(doc: &Document) -> Self {
        let mut by_id = HashMap::new();
        for sequence in doc.elements_by_tag_name("sequence") {
            if let Some(id) = doc.attribute(*sequence, "id") {
                by_id.entry(id.to_string()).or_insert(*sequence);
            }
        }
        Self { by_id }
    }

    /// The sequence linked to `clip_id`.
    pub fn find(&self, clip_id: &str) -> Option<NodeId> {
        self.by_id
            .get(&format!("sequence_id_{clip_id}"))
            .or_else(|| self.by_id.get(&format!("sequence_{clip_id}_ci")))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Correct the first misspelled colour in the `label2` of `labels`.
pub fn fix_label_spelling(doc: &mut Document, labels: NodeId) -> bool {
    let Some(label2) = doc.find_descendant(labels, "label2") else {
        return false;
    };
    let text = doc.text_content(label2);
    if !text.contains(LABEL_MISSPELLING) {
        return false;
    }
    doc.set_text_content(label2, &text.replacen(LABEL_MISSPELLING, LABEL_SPELLING, 1));
    true
}

/// Apply [`fix_label_spelling`] to every `labels` element in the document.
pub fn fix_all_label_spellings(doc: &mut Document) -> usize {
    let all = doc.elements_by_tag_name("labels").to_vec();
    all.into_iter()
        .filter(|labels| fix_label_spelling(doc, *labels))
        .count()
}

/// The `name` element of `node`: a direct child if there is one, else the
/// first descendant.
pub fn name_element(doc: &Document, node: NodeId) -> Option<NodeId> {
    doc.child_element(node, "name")
        .or_else(|| doc.find_descendant(node, "name"))
}

fn set_name(doc: &mut Document, node: NodeId, new_name: &str) {
    if let Some(name) = name_element(doc, node) {
        doc.set_text_content(name, new_name);
    }
}

/// Rename `clip` and everything linked to it. Returns the linked sequence.
pub fn propagate(
    doc: &mut Document,
    clip: NodeId,
    clip_id: &str,
    new_name: &str,
    profile: SchemaProfile,
    sequences: &SequenceIndex,
) -> Option<NodeId> {
    set_name(doc, clip, new_name);

    let labels = match profile {
        SchemaProfile::Labels => doc.child_element(clip, "labels"),
        SchemaProfile::CommentKeyword => None,
    };
    if let Some(labels) = labels {
        fix_label_spelling(doc, labels);
    }

    let sequence = sequences.find(clip_id)?;
    set_name(doc, sequence, new_name);

    match profile {
        SchemaProfile::CommentKeyword => rename_third_name(doc, sequence, new_name),
        SchemaProfile::Labels => update_clip_items(doc, sequence, new_name, labels),
    }
    if let Some(labels) = labels {
        match doc.child_element(sequence, "labels") {
            Some(existing) => doc.replace_children_with_copies(existing, labels),
            None => {
                let copy = doc.clone_subtree(labels);
                doc.append_child(sequence, copy);
            }
        }
    }
    Some(sequence)
}

/// Exporters of the legacy schema write the clip name a third time in a fixed
/// slot inside the sequence.
fn rename_third_name(doc: &mut Document, sequence: NodeId, new_name: &str) {
    let names = doc.descendants_named(sequence, "name");
    if let Some(third) = names.get(2) {
        doc.set_text_content(*third, new_name);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackKind {
    Video,
    Audio,
}

/// `video > track > clipitem` or `audio > track > clipitem`.
fn track_kind(doc: &Document, clipitem: NodeId) -> Option<TrackKind> {
    let track = doc.parent(clipitem).filter(|node| doc.has_tag(*node, "track"))?;
    let media = doc.parent(track)?;
    match doc.tag_name(media)? {
        "video" => Some(TrackKind::Video),
        "audio" => Some(TrackKind::Audio),
        _ => None,
    }
}

fn update_clip_items(
    doc: &mut Document,
    sequence: NodeId,
    new_name: &str,
    labels: Option<NodeId>,
) {
    let clipitems = doc.descendants_named(sequence, "clipitem");
    for clipitem in clipitems {
        let Some(kind) = track_kind(doc, clipitem) else {
            continue;
        };
        if kind == TrackKind::Video {
            set_name(doc, clipitem, new_name);
        }
        if let Some(labels) = labels {
            copy_labels(doc, clipitem, labels);
        }
        trace!(?kind, "updated clip item");
    }
}

/// Overwrite the first `labels` inside `target` with the clip's, or append a copy.
fn copy_labels(doc: &mut Document, target: NodeId, labels: NodeId) {
    match doc.find_descendant(target, "labels") {
        Some(existing) => doc.replace_children_with_copies(existing, labels),
        None => {
            let copy = doc.clone_subtree(labels);
            doc.append_child(target, copy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spelling_fix_only_touches_label2() {
        let mut doc = Document::parse(
            "<r><labels><label>Celurean</label><label2>Celurean Celurean</label2></labels></r>",
        )
        .expect("parse");
        assert_eq!(fix_all_label_spellings(&mut doc), 1);
        assert_eq!(
            doc.serialize_root().expect("serialize"),
            "<r><labels><label>Celurean</label><label2>Cerulean Celurean</label2></labels></r>"
        );
        assert_eq!(fix_all_label_spellings(&mut doc), 1);
        assert_eq!(fix_all_label_spellings(&mut doc), 0);
    }

    #[test]
    fn sequence_lookup_prefers_id_form() {
        let doc = Document::parse(
            "<r><sequence id=\"sequence_c1_ci\"/><sequence id=\"sequence_id_c1\"/>\
             <sequence id=\"sequence_c2_ci\"/></r>",
        )
        .expect("parse");
        let index = SequenceIndex::build(&doc);
        assert_eq!(index.len(), 3);
        let first = index.find("c1").expect("c1");
        assert_eq!(doc.attribute(first, "id"), Some("sequence_id_c1"));
        let second = index.find("c2").expect("c2");
        assert_eq!(doc.attribute(second, "id"), Some("sequence_c2_ci"));
        assert!(index.find("c3").is_none());
    }

    #[test]
    fn legacy_profile_renames_third_name() {
        let mut doc = Document::parse(
            "<r><clip id=\"c\"><name>old</name></clip><sequence id=\"sequence_id_c\">\
             <name>old</name><rate><name>keep</name></rate><media><name>old</name></media>\
             <name>fourth</name></sequence></r>",
        )
        .expect("parse");
        let clip = doc.elements_by_tag_name("clip")[0];
        let index = SequenceIndex::build(&doc);
        propagate(&mut doc, clip, "c", "NEW", SchemaProfile::CommentKeyword, &index)
            .expect("sequence");
        assert_eq!(
            doc.serialize_root().expect("serialize"),
            "<r><clip id=\"c\"><name>NEW</name></clip><sequence id=\"sequence_id_c\">\
             <name>NEW</name><rate><name>keep</name></rate><media><name>NEW</name></media>\
             <name>fourth</name></sequence></r>"
        );
    }
}
