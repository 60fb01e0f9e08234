//! Read model artifact JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AppError;
use crate::models::ModelArtifact;

/// Read and parse the artifact at `path`.
///
/// A file that cannot be opened is reported as `ArtifactNotFound`; a file that
/// opens but does not parse is `InvalidArtifact`.
pub fn read_artifact_json(path: &Path) -> Result<ModelArtifact, AppError> {
    let file = File::open(path).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "artifact open failed");
        AppError::artifact_not_found(not_found_message(path))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::invalid_artifact(format!(
            "Model file '{}' is not a valid model artifact: {e}",
            path.display()
        ))
    })
}

/// User-facing message for a missing artifact.
pub fn not_found_message(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let folder = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ".".to_string());
    format!("Model file not found! Please ensure '{file_name}' is in the '{folder}' folder.")
}
