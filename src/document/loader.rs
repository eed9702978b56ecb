//! Document loading and orchestration
//!
//! This module contains `extract_test_data()`, which runs the whole
//! import pipeline for one .docx file:
//! 1. Validates the container
//! 2. Extracts the text stream with image placeholders
//! 3. Writes embedded images and correlates them with the placeholders
//! 4. Segments the text into questions
//! 5. Extracts the fields of every question into a `ResultSet`

use std::path::{Path, PathBuf};

use super::cleanup::preview;
use super::io::validate_docx_file;
use super::models::*;
use super::parsing::fields::extract_question_data;
use super::parsing::segment::{segment_questions, split_spans};
use super::text::extract_text_with_placeholders;
use crate::config::ImportConfig;
use crate::error::{Error, Result};
use crate::image_extractor::ImageExtractor;

/// Run the full import pipeline for one document
///
/// Fails before any image is written when the file is missing or is not a
/// valid .docx container. A document without recognizable question headers
/// yields an empty result set.
pub fn extract_test_data(docx_path: &Path, config: &ImportConfig) -> Result<ResultSet> {
    validate_docx_file(docx_path)?;

    let file_data = std::fs::read(docx_path)?;
    let docx = docx_rs::read_docx(&file_data)
        .map_err(|e| Error::InvalidDocx(format!("unable to read document ({e})")))?;

    let extracted = extract_text_with_placeholders(&docx.document);
    log::debug!(
        "Extracted {} characters with {} image placeholders",
        extracted.text.chars().count(),
        extracted.placeholders.len()
    );

    let mut extractor = ImageExtractor::new(config.image_dir.clone())?;
    extractor.extract_images_from_docx(docx_path)?;
    if !extractor.failures().is_empty() {
        log::warn!(
            "{} of {} images could not be written to {}; their placeholders stay unresolved",
            extractor.failures().len(),
            extractor.failures().len() + extractor.images().len(),
            extractor.output_dir().display()
        );
    }

    let assets = AssetMap::correlate(
        config.correlation,
        &extracted.placeholders,
        extractor.images(),
    );

    let result = process_questions(&extracted.text, &assets);
    log::info!(
        "Processed {} questions from {}",
        result.total_questions,
        docx_path.display()
    );

    Ok(result)
}

/// Segment a text stream and extract every question it contains
pub fn process_questions(text: &str, assets: &AssetMap) -> ResultSet {
    log::debug!("First 200 characters of text: {}", preview(text, 200));

    let segmentation = segment_questions(text);
    let Some(tier) = segmentation.tier else {
        log::info!("No questions found in document; check the document format");
        return ResultSet::default();
    };
    log::info!(
        "Found {} questions using {:?} headers",
        segmentation.starts.len(),
        tier
    );

    let questions = split_spans(text, &segmentation.starts)
        .into_iter()
        .map(|span| {
            log::debug!(
                "Question {} starts with: {}...",
                span.start.number,
                preview(span.text, 50)
            );
            extract_question_data(span.text, span.start.number, assets)
        })
        .collect();

    ResultSet::new(questions)
}

/// Run `extract_test_data` on Tokio's blocking pool
pub async fn import_document(docx_path: PathBuf, config: ImportConfig) -> Result<ResultSet> {
    tokio::task::spawn_blocking(move || extract_test_data(&docx_path, &config))
        .await
        .map_err(|e| Error::Task(e.to_string()))?
}
