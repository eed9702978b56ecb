//! Per-question field extraction
//!
//! Turns one question span into a `QuestionRecord`. The steps run in a
//! fixed order on a working copy of the span: header removal, answer
//! clause, options, image references, option removal, whitespace cleanup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::super::cleanup::collapse_blank_lines;
use super::super::models::*;

// Headers are only stripped from the start of the span
static STRUCTURED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A[^\S\n]*\d+\.\s+Тип\s+\d+\s+№\s+\[\[\d+\]\]?[^\S\n]*").unwrap()
});

static LOOSE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[^\S\n]*\d+\.\s+Тип[^\n]*(?:\n|$)").unwrap());

// Value stops at the first period or the end of its line
static ANSWER_CLAUSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)Ответ:[^\S\n]*(.+?)(?:\.|$)").unwrap());

// Marker and option text share a line
static OPTION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\)[^\S\n]+").unwrap());

// Next option marker, a blank line, or an answer clause
static OPTION_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\d+\)|\n\s*\n|\n*Ответ:").unwrap());

static IMAGE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[IMAGE_\d+\]").unwrap());

/// An option as it appears in the source, before numbering is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawOption<'a> {
    marker: &'a str,
    text: &'a str,
}

/// Build the record for one question span
pub(crate) fn extract_question_data(
    question_text: &str,
    question_number: u32,
    assets: &AssetMap,
) -> QuestionRecord {
    let mut record = QuestionRecord::new(question_number);

    let mut working = strip_header(question_text);

    if let Some(answer) = find_answer(&working) {
        record.correct_answer = Some(answer);
        working = ANSWER_CLAUSE.replace_all(&working, "").into_owned();
    }

    let raw_options = find_options(&working);
    let options: Vec<(&str, AnswerOption)> = raw_options
        .iter()
        .filter_map(|raw| {
            let number = raw.marker.parse().ok()?;
            let text = substitute_images(raw.text, assets, &mut Vec::new());
            Some((raw.marker, AnswerOption { number, text }))
        })
        .collect();

    let mut images = Vec::new();
    let mut working = substitute_images(&working, assets, &mut images);

    for (marker, option) in &options {
        let pattern = format!(
            r"\b{}\)[^\S\n]+{}",
            regex::escape(marker),
            regex::escape(&option.text)
        );
        match Regex::new(&pattern) {
            Ok(re) => working = re.replace_all(&working, "").into_owned(),
            Err(e) => log::debug!("Skipping removal of option {marker}: {e}"),
        }
    }

    record.text = collapse_blank_lines(&working);
    record.has_image = !images.is_empty();
    record.images = images;
    record.options = options.into_iter().map(|(_, option)| option).collect();
    record
}

/// Remove the question header, preferring the structured form
pub(crate) fn strip_header(text: &str) -> String {
    if STRUCTURED_HEADER.is_match(text) {
        return STRUCTURED_HEADER.replacen(text, 1, "").into_owned();
    }
    LOOSE_HEADER.replacen(text, 1, "").into_owned()
}

/// Value of the first `Ответ:` clause, trimmed
pub(crate) fn find_answer(text: &str) -> Option<String> {
    ANSWER_CLAUSE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Enumerated `<n>) text` options in source order
fn find_options(text: &str) -> Vec<RawOption<'_>> {
    let mut options = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPTION_MARKER.captures_at(text, pos) {
        let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let body_start = whole.end();
        let body_end = OPTION_END
            .find_at(text, body_start)
            .map(|m| m.start())
            .unwrap_or(text.len());

        options.push(RawOption {
            marker: marker.as_str(),
            text: text[body_start..body_end].trim(),
        });
        pos = body_end;
    }

    options
}

/// Replace resolved placeholders with readable references, collecting their
/// paths left to right; unresolved placeholders stay as they are
fn substitute_images(text: &str, assets: &AssetMap, images: &mut Vec<String>) -> String {
    IMAGE_TOKEN
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            match assets.resolve_token(token) {
                Some(path) => {
                    let path_text = path.display().to_string();
                    if !images.contains(&path_text) {
                        images.push(path_text);
                    }
                    image_reference(path)
                }
                None => token.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_structured_header_is_removed_once() {
        assert_eq!(
            strip_header("1. Тип 5 № [[100]] What is 2+2?\nsee 2. Тип 5 № [[7]]"),
            "What is 2+2?\nsee 2. Тип 5 № [[7]]"
        );
    }

    #[test]
    fn test_header_is_only_stripped_at_span_start() {
        assert_eq!(
            strip_header("1. Тип 3 Q one\nsee 2. Тип 5 № [[7]] ref"),
            "see 2. Тип 5 № [[7]] ref"
        );

        let record =
            extract_question_data("1. Тип 3 Q one\nsee 2. Тип 5 № [[7]] ref", 1, &AssetMap::new());
        assert_eq!(record.text, "see 2. Тип 5 № [[7]] ref");
    }

    #[test]
    fn test_loose_header_removes_its_line() {
        assert_eq!(strip_header("3. Тип 4 № 55\nBody text"), "Body text");
        assert_eq!(strip_header("3. Тип\nBody text"), "Body text");
        assert_eq!(strip_header("no header here"), "no header here");
    }

    #[test]
    fn test_answer_stops_at_period_or_line_end() {
        assert_eq!(find_answer("Ответ: 2."), Some("2".to_string()));
        assert_eq!(find_answer("Ответ: 135\nmore"), Some("135".to_string()));
        assert_eq!(find_answer("Ответ:  -4,5 ."), Some("-4,5".to_string()));
        assert_eq!(find_answer("no answer"), None);
        assert_eq!(find_answer("Ответ:\nnext line"), None);
    }

    #[test]
    fn test_options_stop_at_markers_blank_lines_and_answers() {
        let text = "Stem\n1) first\n2) second\nline two\n\nTail\n3) third\nОтвет: 3";
        let options = find_options(text);
        let collected: Vec<(&str, &str)> = options.iter().map(|o| (o.marker, o.text)).collect();
        assert_eq!(
            collected,
            vec![("1", "first"), ("2", "second\nline two"), ("3", "third")]
        );
    }

    #[test]
    fn test_empty_option_does_not_swallow_the_next_line() {
        let options = find_options("Stem\n1)\n2) b\n3) c");
        let collected: Vec<(&str, &str)> = options.iter().map(|o| (o.marker, o.text)).collect();
        assert_eq!(collected, vec![("2", "b"), ("3", "c")]);
    }

    #[test]
    fn test_option_removal_does_not_touch_longer_markers() {
        let record = extract_question_data(
            "4. Тип 2 № [[8]] Pick\n1) 3\n11) 35",
            4,
            &AssetMap::new(),
        );
        assert_eq!(
            record.options,
            vec![
                AnswerOption { number: 1, text: "3".to_string() },
                AnswerOption { number: 11, text: "35".to_string() },
            ]
        );
        assert_eq!(record.text, "Pick");
    }

    #[test]
    fn test_option_numbering_is_preserved() {
        let record = extract_question_data(
            "4. Тип 2 № [[8]] Pick\n3) c\n5) e\n9) i",
            4,
            &AssetMap::new(),
        );
        let numbers: Vec<u32> = record.options.iter().map(|o| o.number).collect();
        assert_eq!(numbers, vec![3, 5, 9]);
        assert_eq!(record.text, "Pick");
    }

    #[test]
    fn test_end_to_end_single_question() {
        let record = extract_question_data(
            "1. Тип 5 № [[100]] What is 2+2?\n1) 3\n2) 4\nОтвет: 2.",
            1,
            &AssetMap::new(),
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.correct_answer.as_deref(), Some("2"));
        assert_eq!(
            record.options,
            vec![
                AnswerOption { number: 1, text: "3".to_string() },
                AnswerOption { number: 2, text: "4".to_string() },
            ]
        );
        assert_eq!(record.text, "What is 2+2?");
        assert!(!record.has_image);
    }

    #[test]
    fn test_short_answer_question_has_no_options() {
        let record = extract_question_data(
            "2. Тип 1 № [[5]]\nНайдите значение выражения.\nОтвет: 0,25.",
            2,
            &AssetMap::new(),
        );
        assert!(record.options.is_empty());
        assert_eq!(record.correct_answer.as_deref(), Some("0,25"));
        assert_eq!(record.text, "Найдите значение выражения.");
    }

    #[test]
    fn test_images_are_referenced_left_to_right() {
        let mut assets = AssetMap::new();
        assets.insert(1, PathBuf::from("temp_images/q_image_1.png"));
        assets.insert(2, PathBuf::from("temp_images/q_image_2.png"));

        let record = extract_question_data(
            "1. Тип 3 № [[9]]\nLook at [IMAGE_2] then [IMAGE_1] and [IMAGE_3]",
            1,
            &assets,
        );

        assert!(record.has_image);
        assert_eq!(
            record.images,
            vec!["temp_images/q_image_2.png", "temp_images/q_image_1.png"]
        );
        assert_eq!(
            record.text,
            "Look at [Изображение: temp_images/q_image_2.png] then \
             [Изображение: temp_images/q_image_1.png] and [IMAGE_3]"
        );
    }

    #[test]
    fn test_image_inside_option_is_resolved_and_removed() {
        let mut assets = AssetMap::new();
        assets.insert(1, PathBuf::from("img/a.png"));

        let record = extract_question_data(
            "1. Тип 3 № [[9]]\nWhich graph?\n1) [IMAGE_1]\n2) none",
            1,
            &assets,
        );

        assert_eq!(record.options[0].text, "[Изображение: img/a.png]");
        assert_eq!(record.images, vec!["img/a.png"]);
        assert_eq!(record.text, "Which graph?");
    }
}
