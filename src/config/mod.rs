//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//!     → ApiClient / DashboardServer / PostureMonitor
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → overrides.rs re-applies command-line values
//!     → dashboard swaps its runtime state atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - The API base URL lives here, never in a global

pub mod loader;
pub mod overrides;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_or_default, ConfigError};
pub use overrides::Overrides;
pub use schema::{ApiConfig, DashboardConfig, ObservabilityConfig, ServerConfig, WatchConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
