//! Turn extracted clip elements into naming tokens.

use slate_model::{ProcessedClipData, SkipReason};
use slate_xml::Document;

use crate::extract::{ClipElements, RatingSource};
use crate::rating::{rating_from_comment, rating_from_labels};
use crate::tokens::{camera_identifier, format_scene_number, format_shot_take};
use crate::validate::is_valid_value;

/// Validate and format the slate fields of one clip.
///
/// # Errors
///
/// Returns the [`SkipReason`] for the first check that fails; the document is
/// never modified here.
pub fn process_clip_data(
    doc: &Document,
    elements: &ClipElements,
) -> Result<ProcessedClipData, SkipReason> {
    let scene = doc.text_content(elements.scene);
    let shottake = doc.text_content(elements.shottake);

    if !is_valid_value(&scene) {
        return Err(SkipReason::InvalidScene { value: scene });
    }
    if !is_valid_value(&shottake) {
        return Err(SkipReason::InvalidShotTake { value: shottake });
    }

    let parts: Vec<&str> = shottake.split('-').collect();
    if parts.len() != 2 || parts.iter().any(|part| part.trim().is_empty()) {
        return Err(SkipReason::MalformedShotTake { value: shottake });
    }

    let scene_formatted = format_scene_number(&scene);
    let (shot_formatted, take_formatted) = format_shot_take(&shottake);

    let camera_roll = doc
        .find_descendant(elements.filmdata, "cameraroll")
        .map(|node| doc.text_content(node))
        .unwrap_or_default();
    if camera_roll.is_empty() {
        return Err(SkipReason::MissingCameraRoll);
    }
    let camera_id = camera_identifier(&camera_roll);

    let rating = match elements.rating_source {
        RatingSource::Comment(node) => rating_from_comment(&doc.text_content(node)).to_string(),
        RatingSource::Labels(labels) => rating_from_labels(doc, labels),
    };

    Ok(ProcessedClipData {
        scene_formatted,
        shot_formatted,
        take_formatted,
        camera_id,
        rating,
    })
}

#[cfg(test)]
mod tests {
    use slate_model::SchemaProfile;

    use super::*;
    use crate::extract::extract_clip_elements;

    fn clip(scene: &str, shottake: &str, roll: &str) -> Document {
        Document::parse(&format!(
            "<clip id=\"c1\"><logginginfo><scene>{scene}</scene><shottake>{shottake}</shottake>\
             </logginginfo><filmdata><cameraroll>{roll}</cameraroll></filmdata>\
             <labels><label>Keep</label></labels></clip>"
        ))
        .expect("parse")
    }

    fn run(doc: &Document) -> Result<ProcessedClipData, SkipReason> {
        let elements =
            extract_clip_elements(doc, doc.root(), SchemaProfile::Labels).expect("extract");
        process_clip_data(doc, &elements)
    }

    #[test]
    fn formats_all_tokens() {
        let data = run(&clip("a1", "3-5", "BCam002")).expect("process");
        assert_eq!(
            data,
            ProcessedClipData {
                scene_formatted: "A001".to_string(),
                shot_formatted: "03".to_string(),
                take_formatted: "05".to_string(),
                camera_id: "bc".to_string(),
                rating: "kp".to_string(),
            }
        );
    }

    #[test]
    fn skips_invalid_fields() {
        assert!(matches!(
            run(&clip(" - ", "3-5", "A")),
            Err(SkipReason::InvalidScene { .. })
        ));
        assert!(matches!(
            run(&clip("1", "--", "A")),
            Err(SkipReason::InvalidShotTake { .. })
        ));
        assert!(matches!(
            run(&clip("1", "bad", "A")),
            Err(SkipReason::MalformedShotTake { .. })
        ));
        assert!(matches!(
            run(&clip("1", "1-2-3", "A")),
            Err(SkipReason::MalformedShotTake { .. })
        ));
        assert!(matches!(
            run(&clip("1", "3- ", "A")),
            Err(SkipReason::MalformedShotTake { .. })
        ));
        assert_eq!(run(&clip("1", "3-5", "")), Err(SkipReason::MissingCameraRoll));
    }

    #[test]
    fn numeric_roll_gives_empty_camera() {
        let data = run(&clip("12", "1-1", "002")).expect("process");
        assert_eq!(data.camera_id, "");
    }
}
