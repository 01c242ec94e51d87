//! Property tests for the naming token formatters.

use proptest::prelude::*;
use slate_core::tokens::{
    CAMERA_ID_LEN, camera_identifier, cleanup_file_name, format_scene_number, format_shot_take,
};

fn digit_runs(value: &str) -> Vec<&str> {
    value
        .split(|ch: char| !ch.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .collect()
}

proptest! {
    #[test]
    fn scene_formatting_is_idempotent(scene in "[a-zA-Z0-9]{0,8}") {
        let once = format_scene_number(&scene);
        prop_assert_eq!(format_scene_number(&once), once.clone());
        prop_assert_eq!(once.to_uppercase(), once);
    }

    #[test]
    fn scene_digit_runs_are_padded(scene in "[a-z]{0,2}[0-9]{1,5}[a-z]{0,2}") {
        let formatted = format_scene_number(&scene);
        for run in digit_runs(&formatted) {
            prop_assert!(run.len() >= 3, "short run {run} in {formatted}");
        }
    }

    #[test]
    fn shot_and_take_are_padded(shot in 0u32..1000, take in 0u32..1000) {
        let (formatted_shot, formatted_take) = format_shot_take(&format!("{shot} - {take}"));
        prop_assert_eq!(formatted_shot, format!("{shot:02}"));
        prop_assert_eq!(formatted_take, format!("{take:02}"));
    }

    #[test]
    fn camera_identifier_is_short_lowercase_prefix(roll in "[A-Za-z0-9]{0,10}") {
        let camera = camera_identifier(&roll);
        prop_assert!(camera.len() <= CAMERA_ID_LEN);
        prop_assert!(camera.chars().all(|ch| ch.is_ascii_lowercase()));
        prop_assert!(roll.to_ascii_lowercase().starts_with(&camera));
    }

    #[test]
    fn cleaned_names_have_no_double_or_trailing_underscores(name in "[a-z_]{0,16}") {
        let cleaned = cleanup_file_name(&name);
        prop_assert!(!cleaned.contains("__"));
        prop_assert!(!cleaned.ends_with('_'));
    }
}
