//! Rating extraction.
//!
//! Two mutually exclusive policies, one per [`SchemaProfile`]:
//!
//! - **comment keyword**: `Circle`, `KEEP` or `NG` inside `mastercomment2`
//!   (checked in that order, case-sensitive) map to `ok`, `kp`, `ng`.
//! - **label text**: the `label` inside `labels`, lower-cased. `No Label` means
//!   unrated, anything mentioning keep/kp is `kp`, every other label passes
//!   through as its own token.
//!
//! [`SchemaProfile`]: slate_model::SchemaProfile

use slate_xml::{Document, NodeId};

/// Rating from a `mastercomment2` keyword list.
pub fn rating_from_comment(comment: &str) -> &'static str {
    let trimmed = comment.trim();
    let text = trimmed.strip_suffix(',').unwrap_or(trimmed);
    if text.contains("Circle") {
        "ok"
    } else if text.contains("KEEP") {
        "kp"
    } else if text.contains("NG") {
        "ng"
    } else {
        ""
    }
}

/// Rating from the text of a `label` element.
pub fn rating_from_label_text(label: &str) -> String {
    let lower = label.trim().to_lowercase();
    if lower.contains("no label") {
        String::new()
    } else if lower.contains("keep") || lower.contains("kp") {
        "kp".to_string()
    } else {
        lower
    }
}

/// Rating from a `labels` element, `""` when it is absent.
pub fn rating_from_labels(doc: &Document, labels: Option<NodeId>) -> String {
    let Some(labels) = labels else {
        return String::new();
    };
    let text = doc
        .find_descendant(labels, "label")
        .map(|label| doc.text_content(label))
        .unwrap_or_default();
    rating_from_label_text(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_keywords_in_priority_order() {
        assert_eq!(rating_from_comment("Circle"), "ok");
        assert_eq!(rating_from_comment("KEEP, NG"), "kp");
        assert_eq!(rating_from_comment("Circle, KEEP,"), "ok");
        assert_eq!(rating_from_comment("NG,"), "ng");
        assert_eq!(rating_from_comment("keep"), "");
        assert_eq!(rating_from_comment("  "), "");
    }

    #[test]
    fn label_text_policy() {
        assert_eq!(rating_from_label_text("Keep"), "kp");
        assert_eq!(rating_from_label_text(" KP "), "kp");
        assert_eq!(rating_from_label_text("No Label"), "");
        assert_eq!(rating_from_label_text("Good Take"), "good take");
        assert_eq!(rating_from_label_text(""), "");
    }

    #[test]
    fn labels_element_lookup() {
        let doc = Document::parse("<labels><label2>Iris</label2><label>Keep</label></labels>")
            .expect("parse");
        assert_eq!(rating_from_labels(&doc, Some(doc.root())), "kp");
        assert_eq!(rating_from_labels(&doc, None), "");

        let empty = Document::parse("<labels/>").expect("parse");
        assert_eq!(rating_from_labels(&empty, Some(empty.root())), "");
    }
}
