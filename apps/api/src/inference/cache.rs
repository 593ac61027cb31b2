//! Process-wide cache of loaded models.
//!
//! Each identifier owns a once-cell slot. Concurrent first requests for the same
//! identifier wait on the same slot, so an artifact is read from disk once.
//! Loaded models are never evicted.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

use crate::inference::loader::ModelLoader;
use crate::inference::model::{Model, ModelError};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Model {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("model load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

type Slot = Arc<OnceCell<Arc<dyn Model>>>;

pub struct ModelCache {
    loader: Arc<dyn ModelLoader>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl ModelCache {
    pub fn new(loader: Arc<dyn ModelLoader>) -> Self {
        Self {
            loader,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached model for `model_id`, loading it on first use.
    /// A failed load leaves nothing cached so the next call retries.
    pub async fn get_or_load(&self, model_id: &str) -> Result<Arc<dyn Model>, CacheError> {
        let slot = {
            let mut slots = self.slots.lock().await;
            Arc::clone(slots.entry(model_id.to_string()).or_default())
        };

        if let Some(model) = slot.get() {
            debug!("Model cache hit: {model_id}");
            return Ok(Arc::clone(model));
        }

        let result = slot
            .get_or_try_init(|| async {
                let loader = Arc::clone(&self.loader);
                let id = model_id.to_string();
                tokio::task::spawn_blocking(move || loader.load(&id))
                    .await??
                    .ok_or_else(|| CacheError::NotFound(model_id.to_string()))
            })
            .await
            .map(Arc::clone);

        if result.is_err() {
            self.discard_empty_slot(model_id, &slot).await;
        }

        result
    }

    /// Drops the slot for `model_id` if it is still the uninitialized `slot` and
    /// no other caller holds it. Keeps unknown identifiers from accumulating in the map.
    ///
    /// Slots are only cloned under the map lock, so with the lock held a strong
    /// count of two (map + `slot`) means no other caller is waiting on or
    /// initializing this slot.
    async fn discard_empty_slot(&self, model_id: &str, slot: &Slot) {
        let mut slots = self.slots.lock().await;
        if let Some(current) = slots.get(model_id) {
            if Arc::ptr_eq(current, slot)
                && !current.initialized()
                && Arc::strong_count(current) == 2
            {
                slots.remove(model_id);
            }
        }
    }

    /// Identifiers of every model currently held in memory, sorted.
    pub async fn loaded_ids(&self) -> Vec<String> {
        let slots = self.slots.lock().await;
        let mut ids: Vec<String> = slots
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Identifiers of every artifact the loader can see, sorted.
    pub async fn available(&self) -> Result<Vec<String>, CacheError> {
        let loader = Arc::clone(&self.loader);
        Ok(tokio::task::spawn_blocking(move || loader.available()).await??)
    }
}
