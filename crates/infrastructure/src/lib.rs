//! Delver Infrastructure Layer
//!
//! Concrete resolution machinery: the TTL cache, the hickory-proto wire
//! codec wrappers, the one-shot UDP transport, the root server anchors,
//! the public resolver pool loader and the two resolver implementations.
pub mod dns;

pub use dns::cache::DnsCache;
pub use dns::resolver::{FanoutResolver, IterativeConfig, IterativeResolver};
