//! Configuration loading, validation and persistence.

mod settings;

pub use settings::{
    Config, DocumentConfig, HolidayConfig, RestTableConfig, ServerConfig, StoreBackendType,
    StoreConfig, SuggestionConfig,
};
