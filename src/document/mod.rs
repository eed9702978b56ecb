//! Quiz document parsing and data structures module
//!
//! This module turns a Microsoft Word (.docx) quiz into a structured
//! result set of questions, options, answers and image references.

pub(crate) mod cleanup;
pub(crate) mod io;
pub(crate) mod loader;
pub mod models;
pub mod parsing;
pub(crate) mod text;

pub use loader::{extract_test_data, import_document, process_questions};
pub use models::*;
pub use parsing::segment::{
    segment_questions, split_spans, QuestionSpan, QuestionStart, SegmentTier, Segmentation,
};
