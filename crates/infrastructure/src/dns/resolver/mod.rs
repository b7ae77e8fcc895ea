//! The two resolution engines behind the `DnsResolver` port: the
//! sequential delegation walker and the concurrent fan-out racer. Both
//! share the same TTL cache instance.

pub mod fanout;
pub mod iterative;

pub use fanout::FanoutResolver;
pub use iterative::{IterativeConfig, IterativeResolver};
