//! Clip name generation from a template.

use slate_model::ProcessedClipData;

use crate::tokens::cleanup_file_name;

pub const SCENE_PLACEHOLDER: &str = "{scene}";
pub const SHOT_PLACEHOLDER: &str = "{shot}";
pub const TAKE_PLACEHOLDER: &str = "{take}";
pub const CAMERA_PLACEHOLDER: &str = "{camera}";
pub const RATING_PLACEHOLDER: &str = "{Rating}";

/// Fill `template` with the clip tokens and prepend `prefix`.
///
/// Each placeholder is substituted once, in the order scene, shot, take,
/// camera, rating. `{Rating}` becomes `_<rating>`, or nothing for an unrated
/// clip. The name is passed through [`cleanup_file_name`] before the prefix is
/// prepended, so the prefix is kept verbatim.
pub fn generate_name(data: &ProcessedClipData, template: &str, prefix: &str) -> String {
    let rating = if data.rating.is_empty() {
        String::new()
    } else {
        format!("_{}", data.rating)
    };
    let name = template
        .replacen(SCENE_PLACEHOLDER, &data.scene_formatted, 1)
        .replacen(SHOT_PLACEHOLDER, &data.shot_formatted, 1)
        .replacen(TAKE_PLACEHOLDER, &data.take_formatted, 1)
        .replacen(CAMERA_PLACEHOLDER, &data.camera_id, 1)
        .replacen(RATING_PLACEHOLDER, &rating, 1);
    format!("{prefix}{}", cleanup_file_name(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(rating: &str) -> ProcessedClipData {
        ProcessedClipData {
            scene_formatted: "A001".to_string(),
            shot_formatted: "03".to_string(),
            take_formatted: "05".to_string(),
            camera_id: "bc".to_string(),
            rating: rating.to_string(),
        }
    }

    #[test]
    fn underscore_template_collapses_separator() {
        let template = "{scene}_{shot}_{take}{camera}_{Rating}";
        assert_eq!(generate_name(&data("kp"), template, ""), "A001_03_05bc_kp");
        assert_eq!(generate_name(&data(""), template, ""), "A001_03_05bc");
    }

    #[test]
    fn bare_template_appends_rating() {
        let template = "{scene}_{shot}_{take}{camera}{Rating}";
        assert_eq!(generate_name(&data("ok"), template, ""), "A001_03_05bc_ok");
    }

    #[test]
    fn prefix_is_prepended() {
        let template = "{scene}_{shot}_{take}{camera}_{Rating}";
        assert_eq!(
            generate_name(&data("kp"), template, "DAY1_"),
            "DAY1_A001_03_05bc_kp"
        );
        assert_eq!(
            generate_name(&data("kp"), template, "DAY1__"),
            "DAY1__A001_03_05bc_kp"
        );
    }

    #[test]
    fn placeholders_replaced_once() {
        assert_eq!(
            generate_name(&data(""), "{scene}-{scene}", ""),
            "A001-{scene}"
        );
    }
}
