//! One-time load of the shared dataset.
//!
//! The store is published only once it is complete, so a query racing the
//! load either sees the whole store or fails with [`SpongeError::NotLoaded`].

use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing::info;

use spongeworld_bio::AbundanceStore;
use spongeworld_core::{SpongeError, SpongeResult};

#[derive(Debug, Default)]
pub struct StoreGate {
    store: OnceLock<Arc<AbundanceStore>>,
}

impl StoreGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gate that is open from the start
    pub fn with_store(store: AbundanceStore) -> Self {
        let gate = Self::new();
        let _ = gate.store.set(Arc::new(store));
        gate
    }

    /// Publishes a built store. A second call is an error and leaves the
    /// first store in place.
    pub fn install(&self, store: AbundanceStore) -> SpongeResult<Arc<AbundanceStore>> {
        let store = Arc::new(store);
        self.store
            .set(Arc::clone(&store))
            .map_err(|_| SpongeError::load("dataset is already loaded"))?;
        Ok(store)
    }

    /// Loads both files and publishes the result.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        abundance: P,
        metadata: Q,
    ) -> SpongeResult<Arc<AbundanceStore>> {
        if self.is_loaded() {
            return Err(SpongeError::load("dataset is already loaded"));
        }
        let store = AbundanceStore::load(abundance, metadata)?;
        let store = self.install(store)?;
        info!("Dataset ready: {} samples", store.total_samples());
        Ok(store)
    }

    pub fn is_loaded(&self) -> bool {
        self.store.get().is_some()
    }

    pub fn get(&self) -> SpongeResult<Arc<AbundanceStore>> {
        self.store.get().cloned().ok_or(SpongeError::NotLoaded)
    }
}
