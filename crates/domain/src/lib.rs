//! Delver Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, ResolveMode};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use errors::DomainError;
