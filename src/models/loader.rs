//! Load-once access to the session's predictor.
//!
//! The artifact is read the first time a predictor is requested and the
//! resulting handle is kept for the rest of the process. There is no
//! invalidation: the handle is immutable once published. A failed load leaves
//! the slot empty, so a later call may try again.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use crate::error::AppError;
use crate::io::read_artifact_json;
use crate::models::Predictor;

#[derive(Debug)]
pub struct PredictorLoader {
    path: PathBuf,
    slot: OnceLock<Arc<Predictor>>,
}

impl PredictorLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Return the cached predictor, loading it on first use.
    pub fn get(&self) -> Result<Arc<Predictor>, AppError> {
        if let Some(predictor) = self.slot.get() {
            debug!("predictor cache hit");
            return Ok(Arc::clone(predictor));
        }

        let artifact = read_artifact_json(&self.path)?;
        let predictor = Arc::new(Predictor::from_artifact(artifact)?);
        info!(
            path = %self.path.display(),
            model = predictor.name(),
            estimator = %predictor.estimator_summary(),
            "model artifact loaded"
        );

        // Single-threaded callers never race here; if one did, the first value wins.
        let _ = self.slot.set(predictor);
        self.slot
            .get()
            .cloned()
            .ok_or_else(|| AppError::invalid_artifact("Model cache was not populated."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const STUMP: &str = r#"{
        "format_version": 1,
        "name": "Stump",
        "columns": [{"name": "Sex", "encoding": {"kind": "one_hot", "categories": ["female", "male"]}}],
        "estimator": {"kind": "random_forest", "trees": [{"nodes": [
            {"feature": 0, "threshold": 0.5, "left": 1, "right": 2},
            {"value": [8.0, 2.0]},
            {"value": [2.0, 8.0]}
        ]}]}
    }"#;

    #[test]
    fn loads_once_and_serves_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, STUMP).unwrap();

        let loader = PredictorLoader::new(&path);
        assert!(!loader.is_loaded());
        let first = loader.get().unwrap();
        assert!(loader.is_loaded());

        // The file is never read again.
        std::fs::remove_file(&path).unwrap();
        let second = loader.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.name(), "Stump");
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let loader = PredictorLoader::new(&path);

        let err = loader.get().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArtifactNotFound);
        assert!(!loader.is_loaded());

        std::fs::write(&path, STUMP).unwrap();
        assert!(loader.get().is_ok());
    }

    #[test]
    fn structurally_invalid_artifact_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, STUMP.replace("\"left\": 1", "\"left\": 9")).unwrap();

        let err = PredictorLoader::new(&path).get().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArtifact);
    }
}
