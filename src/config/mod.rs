//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse, deserialize, PROJECT_ID override)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → wallet::connection builds the ConnectionConfig from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::{
    AppConfig, ChainConfig, ConnectorsConfig, MetadataConfig, ModalConfig, ObservabilityConfig,
    ProbeConfig, ReaderConfig,
};
