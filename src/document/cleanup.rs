//! Post-processing and cleanup utilities
//!
//! Text-level helpers shared by the field extractor and the loader's
//! diagnostics.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

static BLANK_LINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Collapse runs of blank lines into a single line break and trim the result
pub(crate) fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINES.replace_all(text, "\n").trim().to_string()
}

/// First `limit` grapheme clusters of `text`, for log previews
pub(crate) fn preview(text: &str, limit: usize) -> String {
    text.graphemes(true).take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_blank_lines() {
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\nb"), "a\nb");
        assert_eq!(collapse_blank_lines("\n\n  a\nb  \n\n"), "a\nb");
        assert_eq!(collapse_blank_lines("single line"), "single line");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let inputs = [
            "a\n\n\nb",
            "a \n\n x \n\n\n y",
            "\n \n\n",
            "Вопрос\n\n[Изображение: x.png]\n\n\nконец",
        ];
        for input in inputs {
            let once = collapse_blank_lines(input);
            assert_eq!(collapse_blank_lines(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_preview_respects_graphemes() {
        assert_eq!(preview("Тип 5", 3), "Тип");
        assert_eq!(preview("abc", 10), "abc");
    }
}
