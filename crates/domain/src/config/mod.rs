//! Configuration module for Delver
//!
//! Configuration structures organized by concern:
//! - `root`: main configuration, file loading and CLI overrides
//! - `resolver`: resolution mode, timeouts and walk bounds
//! - `cache`: answer cache sizing
//! - `logging`: logging settings
//! - `errors`: configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod resolver;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{ResolveMode, ResolverConfig};
pub use root::{CliOverrides, Config};
