use std::fs;
use std::path::{Path, PathBuf};

use crate::document::ResultSet;
use crate::error::Result;

/// Serialize a result set as pretty JSON (two-space indent, UTF-8 kept as-is)
pub fn to_json_string(result: &ResultSet) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write a result set to `output_path`
///
/// The JSON is written to a sibling temporary file first and renamed into
/// place, so a failed write never leaves a truncated file behind.
pub fn save_to_json(result: &ResultSet, output_path: &Path) -> Result<()> {
    let json = to_json_string(result)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temporary_sibling(output_path);
    if let Err(e) = fs::write(&tmp_path, json).and_then(|_| fs::rename(&tmp_path, output_path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    log::info!("Data saved to {}", output_path.display());
    Ok(())
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "output.json".into());
    name.push(".tmp");
    path.with_file_name(name)
}
