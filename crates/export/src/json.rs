use crate::error::ExportError;
use engine::ResultBundle;
use std::fs;
use std::path::Path;

/// Renders the bundle as indented JSON.
pub fn to_json_pretty(bundle: &ResultBundle) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(bundle)?)
}

/// Writes the bundle to `path`, replacing any existing file.
pub fn write_json(path: &Path, bundle: &ResultBundle) -> Result<(), ExportError> {
    let json = to_json_pretty(bundle)?;
    fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Result bundle written.");
    Ok(())
}
