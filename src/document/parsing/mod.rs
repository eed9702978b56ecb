//! Question parsing
//!
//! This module contains the text-level stages of the pipeline: splitting
//! the document stream into question spans and extracting the fields of
//! each span.

pub(crate) mod fields;
pub mod segment;
