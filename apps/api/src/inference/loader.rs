//! Model loading from the artifact directory.
//!
//! Layout: `<models_dir>/<model_id>/model.json`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::inference::model::{DenseArtifact, DenseModel, Model, ModelError};

/// File inside each artifact directory holding the serialized network.
pub const ARTIFACT_FILE: &str = "model.json";

/// Resolves model identifiers to loaded models. Calls block on disk I/O.
pub trait ModelLoader: Send + Sync {
    /// Returns `Ok(None)` when no artifact exists for `model_id`.
    fn load(&self, model_id: &str) -> Result<Option<Arc<dyn Model>>, ModelError>;

    /// Identifiers of every artifact that can be loaded, sorted.
    fn available(&self) -> Result<Vec<String>, ModelError>;
}

/// Identifiers are single path segments of ASCII letters, digits, `-` and `_`.
pub fn is_valid_model_id(model_id: &str) -> bool {
    !model_id.is_empty()
        && model_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Loads `dense-v1` artifacts from a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsModelLoader {
    root: PathBuf,
}

impl FsModelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the artifact for `model_id`, if the identifier is valid and it exists.
    fn artifact_dir(&self, model_id: &str) -> Option<PathBuf> {
        if !is_valid_model_id(model_id) {
            return None;
        }
        let dir = self.root.join(model_id);
        dir.is_dir().then_some(dir)
    }
}

impl ModelLoader for FsModelLoader {
    fn load(&self, model_id: &str) -> Result<Option<Arc<dyn Model>>, ModelError> {
        let Some(dir) = self.artifact_dir(model_id) else {
            debug!("No artifact directory for model {model_id}");
            return Ok(None);
        };

        let path = dir.join(ARTIFACT_FILE);
        let bytes = std::fs::read(&path).map_err(|source| ModelError::Io {
            path: path.clone(),
            source,
        })?;
        let artifact: DenseArtifact =
            serde_json::from_slice(&bytes).map_err(|source| ModelError::Parse {
                path: path.clone(),
                source,
            })?;

        let model = DenseModel::from_artifact(artifact)?;
        info!(
            "Loaded model {model_id} from {} ({} inputs, {} outputs)",
            path.display(),
            model.input_length(),
            model.output_width()
        );

        Ok(Some(Arc::new(model)))
    }

    fn available(&self) -> Result<Vec<String>, ModelError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ModelError::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };

        let mut ids: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().join(ARTIFACT_FILE).is_file())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|id| is_valid_model_id(id))
            .collect();
        ids.sort();

        Ok(ids)
    }
}
