//! Delver Application Layer
//!
//! Ports the infrastructure implements and the use cases that drive them.
pub mod ports;
pub mod use_cases;

pub use ports::dns_resolver::{DnsResolver, Resolution};
pub use use_cases::resolve_query::{QueryOutcome, ResolveQueryUseCase};
