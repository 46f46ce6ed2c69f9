//! Text normalization applied before classification and deduplication.

use std::sync::LazyLock;

use regex::Regex;

static TIMESTAMP_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}(?:\.\d+)? →").expect("valid regex")
});

static BRACKETED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]").expect("valid regex"));

/// Normalize a captured text unit for classification.
///
/// Strips embedded timestamp prefixes (as written by the log files) and
/// bracketed event markers such as `[ENTER]`, drops control characters,
/// trims surrounding whitespace, and lower-cases the rest. The empty
/// string means "nothing to classify".
pub fn normalize(text: &str) -> String {
    let text = TIMESTAMP_PREFIX.replace_all(text, "");
    let text = BRACKETED_MARKER.replace_all(&text, "");
    text.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  My Password is Admin123  "), "my password is admin123");
    }

    #[test]
    fn test_normalize_strips_timestamp_prefix() {
        assert_eq!(
            normalize("2024-05-01 09:30:00 → send the credentials"),
            "send the credentials"
        );
    }

    #[test]
    fn test_normalize_strips_bracketed_markers() {
        assert_eq!(normalize("hello [ENTER] world"), "hello  world");
        assert_eq!(normalize("[ENTER]"), "");
    }

    #[test]
    fn test_normalize_drops_control_characters() {
        assert_eq!(normalize("pass\u{0}word\u{7}"), "password");
    }

    #[test]
    fn test_normalize_empty_input() {
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize(""), "");
    }
}
