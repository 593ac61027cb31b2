use std::sync::Arc;

use crate::config::Config;
use crate::inference::cache::ModelCache;
use crate::inference::decoder::TextDecoder;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded models, filled lazily and kept for the life of the process.
    pub models: Arc<ModelCache>,
    /// Pluggable output decoder. Default: PlaceholderDecoder.
    pub decoder: Arc<dyn TextDecoder>,
}

#[cfg(test)]
pub(crate) fn test_state(models_dir: &std::path::Path) -> AppState {
    use crate::inference::decoder::PlaceholderDecoder;
    use crate::inference::loader::FsModelLoader;
    use crate::models::predict::COVER_LETTER_MODEL;

    AppState {
        config: Config {
            port: 0,
            rust_log: "debug".to_string(),
            models_dir: models_dir.to_path_buf(),
            default_model_type: COVER_LETTER_MODEL.to_string(),
        },
        models: Arc::new(ModelCache::new(Arc::new(FsModelLoader::new(models_dir)))),
        decoder: Arc::new(PlaceholderDecoder),
    }
}
