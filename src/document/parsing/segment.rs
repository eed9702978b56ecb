//! Question segmentation
//!
//! Splits the document text stream into one span per question. Question
//! headers are located with a cascade of patterns of decreasing
//! specificity; a tier is only consulted when every earlier tier found
//! nothing, and the first tier with any match decides all boundaries.

use once_cell::sync::Lazy;
use regex::Regex;

/// Header pattern tiers, in the order they are tried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTier {
    /// `<n>. Тип <n> № [[<n>]`
    Structured,
    /// `<n>. Тип`
    Loose,
    /// `<n>. Тип <n>`
    Numbered,
}

impl SegmentTier {
    pub const ALL: [SegmentTier; 3] = [
        SegmentTier::Structured,
        SegmentTier::Loose,
        SegmentTier::Numbered,
    ];

    fn pattern(self) -> &'static Regex {
        &SEGMENT_PATTERNS[self as usize]
    }
}

// Header must open a line; group 1 is the question number
static SEGMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?m)^[^\S\n]*(\d+)\.\s+Тип\s+\d+\s+№\s+\[\[\d+\]").unwrap(),
        Regex::new(r"(?m)^[^\S\n]*(\d+)\.\s+Тип").unwrap(),
        Regex::new(r"(?m)^[^\S\n]*(\d+)\.\s+Тип\s+\d+").unwrap(),
    ]
});

static SPAN_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)\.\s+Тип").unwrap());

/// Detected start of one question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionStart {
    /// Byte offset into the text stream
    pub offset: usize,
    /// Number parsed from the span header, or the 1-based position
    pub number: u32,
}

/// Raw material of one question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSpan<'a> {
    pub start: QuestionStart,
    /// Trimmed slice from this start up to the next one
    pub text: &'a str,
}

/// Result of running the tier cascade over a text stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Tier that produced the matches, `None` when nothing matched
    pub tier: Option<SegmentTier>,
    pub starts: Vec<QuestionStart>,
}

/// Header offsets found by a single tier
pub fn find_header_offsets(text: &str, tier: SegmentTier) -> Vec<usize> {
    tier.pattern()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.start()))
        .collect()
}

/// Locate question starts with the first tier that matches anything
pub fn segment_questions(text: &str) -> Segmentation {
    let Some((tier, offsets)) = SegmentTier::ALL
        .iter()
        .map(|&tier| (tier, find_header_offsets(text, tier)))
        .find(|(_, offsets)| !offsets.is_empty())
    else {
        return Segmentation::default();
    };

    let starts = offsets
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let end = offsets.get(i + 1).copied().unwrap_or(text.len());
            QuestionStart {
                offset,
                number: span_number(&text[offset..end]).unwrap_or((i + 1) as u32),
            }
        })
        .collect();

    Segmentation {
        tier: Some(tier),
        starts,
    }
}

/// Cut the text stream into per-question spans
pub fn split_spans<'a>(text: &'a str, starts: &[QuestionStart]) -> Vec<QuestionSpan<'a>> {
    starts
        .iter()
        .enumerate()
        .map(|(i, start)| {
            let end = starts.get(i + 1).map(|s| s.offset).unwrap_or(text.len());
            QuestionSpan {
                start: *start,
                text: text[start.offset..end].trim(),
            }
        })
        .collect()
}

/// Parse the question number from a span's own header
fn span_number(span: &str) -> Option<u32> {
    SPAN_NUMBER
        .captures(span)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
