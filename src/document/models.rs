//! Core data structures for quiz extraction
//!
//! This module defines the intermediate values passed between pipeline
//! stages (placeholders, extracted images, asset references) and the
//! public output types (question records and the result set).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::ImageCorrelation;

/// Label used when a placeholder is replaced by a readable image reference
pub const IMAGE_REFERENCE_LABEL: &str = "Изображение";

/// Format the placeholder token for the given 1-based image index
pub fn placeholder_token(index: usize) -> String {
    format!("[IMAGE_{index}]")
}

/// Marker inserted into the text stream where an inline image occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// 1-based index in document reading order
    pub index: usize,
    /// Relationship id of the picture inside the run, when the reader exposes one
    pub relationship_id: Option<String>,
}

impl Placeholder {
    pub fn token(&self) -> String {
        placeholder_token(self.index)
    }
}

/// Linear text stream of a document plus the placeholders it contains
#[derive(Debug, Clone, Default)]
pub struct ExtractedText {
    pub text: String,
    pub placeholders: Vec<Placeholder>,
}

/// An image relationship written to disk by the image extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    /// 1-based index over image relationships in container order
    pub index: usize,
    pub relationship_id: String,
    pub path: PathBuf,
}

/// Mapping from placeholder index to stored image path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetMap {
    assets: BTreeMap<usize, PathBuf>,
}

impl AssetMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping between placeholders and stored images
    pub fn correlate(
        mode: ImageCorrelation,
        placeholders: &[Placeholder],
        images: &[ExtractedImage],
    ) -> Self {
        let mut map = AssetMap::new();

        match mode {
            ImageCorrelation::Position => {
                for image in images {
                    map.insert(image.index, image.path.clone());
                }
            }
            ImageCorrelation::Relationship => {
                for placeholder in placeholders {
                    let resolved = match placeholder.relationship_id.as_deref() {
                        Some(id) if !id.is_empty() => {
                            images.iter().find(|image| image.relationship_id == id)
                        }
                        _ => images.iter().find(|image| image.index == placeholder.index),
                    };

                    if let Some(image) = resolved {
                        map.insert(placeholder.index, image.path.clone());
                    }
                }
            }
        }

        map
    }

    pub fn insert(&mut self, index: usize, path: PathBuf) {
        self.assets.insert(index, path);
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.assets.get(&index).map(PathBuf::as_path)
    }

    /// Look up a placeholder token such as `[IMAGE_3]`
    pub fn resolve_token(&self, token: &str) -> Option<&Path> {
        let index = token
            .strip_prefix("[IMAGE_")?
            .strip_suffix(']')?
            .parse::<usize>()
            .ok()?;
        self.get(index)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Format the inline reference that replaces a resolved placeholder
pub fn image_reference(path: &Path) -> String {
    format!("[{IMAGE_REFERENCE_LABEL}: {}]", path.display())
}

/// One enumerated option, numbered as in the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question number parsed from the header, or the 1-based position
    pub id: u32,
    pub text: String,
    pub has_image: bool,
    pub images: Vec<String>,
    pub options: Vec<AnswerOption>,
    pub correct_answer: Option<String>,
}

impl QuestionRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            text: String::new(),
            has_image: false,
            images: Vec::new(),
            options: Vec::new(),
            correct_answer: None,
        }
    }
}

/// All questions found in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    pub total_questions: usize,
    pub questions: Vec<QuestionRecord>,
}

impl ResultSet {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self {
            total_questions: questions.len(),
            questions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
