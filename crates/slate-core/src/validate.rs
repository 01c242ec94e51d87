//! Placeholder detection for slate fields.

/// Whether a scene or shot-take field holds a real value.
///
/// Loggers leave blanks or a lone `-` when a field does not apply; those (and
/// any run of hyphens) are rejected after trimming.
pub fn is_valid_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !trimmed.chars().all(|ch| ch == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_placeholders() {
        assert!(!is_valid_value(""));
        assert!(!is_valid_value("   "));
        assert!(!is_valid_value("-"));
        assert!(!is_valid_value(" - "));
        assert!(!is_valid_value("---"));
        assert!(!is_valid_value("\t--\n"));
    }

    #[test]
    fn accepts_values() {
        assert!(is_valid_value("A1"));
        assert!(is_valid_value("3-5"));
        assert!(is_valid_value(" 12 "));
        assert!(is_valid_value("-1"));
    }
}
