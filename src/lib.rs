//! docquiz: quiz importer for .docx files
//!
//! This library extracts numbered quiz questions, their enumerated options,
//! stated answers and embedded images from Microsoft Word documents into a
//! normalized result set ready for storage or JSON export.

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod image_extractor;
pub mod persist;

// Re-export commonly used types
pub use config::{ImageCorrelation, ImportConfig};
pub use document::{
    extract_test_data, import_document, process_questions, AnswerOption, AssetMap,
    QuestionRecord, ResultSet,
};
pub use error::{Error, Result};
pub use image_extractor::ImageExtractor;
