//! Quiz store backends.
//!
//! The rest of the system depends only on the [`QuizStore`] trait; which
//! backend is active is a configuration detail. Column/field name mapping
//! for the wire formats lives in [`row`] so it never spreads across call
//! sites.

mod document;
mod memory;
mod rest_table;
pub mod row;
mod traits;

use std::sync::Arc;

use crate::config::{StoreBackendType, StoreConfig};
use crate::error::Result;

pub use document::DocumentStore;
pub use memory::MemoryStore;
pub use rest_table::RestTableStore;
pub use traits::QuizStore;

/// Build the configured store backend.
pub fn from_config(config: &StoreConfig) -> Result<Arc<dyn QuizStore>> {
    match config.backend {
        StoreBackendType::Memory => Ok(Arc::new(MemoryStore::with_sample_data())),
        StoreBackendType::RestTable => {
            Ok(Arc::new(RestTableStore::from_config(&config.rest_table)?))
        }
        StoreBackendType::Document => Ok(Arc::new(DocumentStore::from_config(&config.document)?)),
    }
}
