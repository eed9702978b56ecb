//! Text extraction with image placeholders
//!
//! Walks the paragraphs of a parsed document and produces one linear text
//! stream in which every run carrying a drawing is replaced by an
//! `[IMAGE_<n>]` token, so later stages know where each image sat relative
//! to the surrounding text.

use super::models::{ExtractedText, Placeholder};

/// Concatenate all top-level paragraphs, one line each, with image runs
/// replaced by placeholder tokens
pub(crate) fn extract_text_with_placeholders(document: &docx_rs::Document) -> ExtractedText {
    let mut extracted = ExtractedText::default();

    for child in &document.children {
        if let docx_rs::DocumentChild::Paragraph(para) = child {
            for child in &para.children {
                match child {
                    docx_rs::ParagraphChild::Run(run) => append_run(run, &mut extracted),
                    docx_rs::ParagraphChild::Insert(insert) => {
                        for child in &insert.children {
                            if let docx_rs::InsertChild::Run(run) = child {
                                append_run(run, &mut extracted);
                            }
                        }
                    }
                    docx_rs::ParagraphChild::Delete(_) => {
                        // Skip deletions (track changes)
                    }
                    _ => {}
                }
            }
            extracted.text.push('\n');
        }
    }

    extracted
}

fn append_run(run: &docx_rs::Run, extracted: &mut ExtractedText) {
    let mut has_drawing = false;
    let mut relationship_id = None;

    for child in &run.children {
        if let docx_rs::RunChild::Drawing(drawing) = child {
            has_drawing = true;
            if relationship_id.is_none() {
                relationship_id = drawing_relationship_id(drawing);
            }
        }
    }

    // One placeholder per image run; the run's own text is dropped
    if has_drawing {
        let placeholder = Placeholder {
            index: extracted.placeholders.len() + 1,
            relationship_id,
        };
        extracted.text.push_str(&placeholder.token());
        extracted.placeholders.push(placeholder);
        return;
    }

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => extracted.text.push_str(&text_elem.text),
            docx_rs::RunChild::Tab(_) => extracted.text.push('\t'),
            docx_rs::RunChild::Break(_) => extracted.text.push('\n'),
            _ => {}
        }
    }
}

fn drawing_relationship_id(drawing: &docx_rs::Drawing) -> Option<String> {
    match &drawing.data {
        Some(docx_rs::DrawingData::Pic(pic)) if !pic.id.is_empty() => Some(pic.id.clone()),
        _ => None,
    }
}
