//! Naming token formatters.
//!
//! Slate fields arrive as free text typed on set ("a12", "3 - 5", "BCam002").
//! These helpers turn them into the fixed-width tokens used in clip names.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Minimum width of each digit run in a scene number.
pub const SCENE_DIGITS: usize = 3;

/// Minimum width of each digit run in a shot or take number.
pub const SHOT_TAKE_DIGITS: usize = 2;

/// Maximum number of letters kept from a camera roll.
pub const CAMERA_ID_LEN: usize = 2;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("Invalid digit run regex"));

static REPEATED_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_{2,}").expect("Invalid underscore regex"));

/// Zero-pad every maximal digit run in `value` to at least `width` digits.
pub fn pad_digit_runs(value: &str, width: usize) -> Cow<'_, str> {
    DIGIT_RUN.replace_all(value, |caps: &Captures<'_>| format!("{:0>width$}", &caps[0]))
}

/// Pad digit runs to three places and upper-case the scene.
///
/// # Example
/// ```
/// use slate_core::tokens::format_scene_number;
///
/// assert_eq!(format_scene_number("a12"), "A012");
/// ```
pub fn format_scene_number(scene: &str) -> String {
    pad_digit_runs(scene, SCENE_DIGITS).to_uppercase()
}

/// Split a `shot-take` value into padded, lower-cased shot and take tokens.
///
/// Whitespace is removed first and the value is split at the first hyphen; a
/// value without a hyphen yields an empty take.
pub fn format_shot_take(value: &str) -> (String, String) {
    let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
    let (shot, take) = compact.split_once('-').unwrap_or((compact.as_str(), ""));
    (
        pad_digit_runs(shot, SHOT_TAKE_DIGITS).to_lowercase(),
        pad_digit_runs(take, SHOT_TAKE_DIGITS).to_lowercase(),
    )
}

/// Leading letters of a camera roll, at most two, lower-cased.
///
/// `"BCam002"` gives `"bc"`; a roll that starts with a digit gives `""`.
pub fn camera_identifier(camera_roll: &str) -> String {
    camera_roll
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .take(CAMERA_ID_LEN)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Collapse repeated underscores and drop trailing ones.
pub fn cleanup_file_name(name: &str) -> String {
    REPEATED_UNDERSCORES
        .replace_all(name, "_")
        .trim_end_matches('_')
        .to_string()
}
