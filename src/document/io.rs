//! File I/O operations and validation
//!
//! This module checks that an input path is a readable Word container
//! and reads raw parts out of the package.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    if !file_path.exists() {
        return Err(Error::NotFound(file_path.to_path_buf()));
    }

    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if !extension.eq_ignore_ascii_case("docx") {
        return Err(Error::InvalidFormat(format!(
            "expected .docx file, got .{extension}\n\
            Note: only Word .docx files are supported (not .doc, .xlsx, .zip, etc.)"
        )));
    }

    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::InvalidDocx(format!("not a ZIP container ({e})")))?;

    if archive.by_name("word/document.xml").is_err() {
        if archive.by_name("xl/workbook.xml").is_ok() {
            return Err(Error::InvalidFormat(
                "this appears to be an Excel file (.xlsx)".to_string(),
            ));
        }

        return Err(Error::InvalidDocx(
            "missing word/document.xml; the file may be corrupted".to_string(),
        ));
    }

    Ok(())
}

/// Read a package part as UTF-8 text, `None` when the part is absent
pub(crate) fn read_part_to_string<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<String>> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut content = String::new();
    part.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Read a package part as raw bytes
pub(crate) fn read_part_bytes<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Vec<u8>> {
    let mut part = archive.by_name(name)?;
    let mut bytes = Vec::with_capacity(part.size() as usize);
    part.read_to_end(&mut bytes)?;
    Ok(bytes)
}
