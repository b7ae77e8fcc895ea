use async_trait::async_trait;
use delver_domain::{DnsQuery, DnsRecord, DomainError};
use std::net::IpAddr;
use std::sync::Arc;

/// Outcome of a single resolver call.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Answer section of the winning response. Never empty on success.
    pub records: Arc<Vec<DnsRecord>>,
    /// Whether the answer was served from the cache without any network
    /// transport call.
    pub cache_hit: bool,
    /// Servers that answered on the delegation walk, in visitation order.
    /// Empty for fan-out resolution and for cache hits.
    pub path: Vec<IpAddr>,
}

impl Resolution {
    pub fn fresh(records: Arc<Vec<DnsRecord>>, path: Vec<IpAddr>) -> Self {
        Self {
            records,
            cache_hit: false,
            path,
        }
    }

    pub fn cached(records: Arc<Vec<DnsRecord>>) -> Self {
        Self {
            records,
            cache_hit: true,
            path: Vec::new(),
        }
    }
}

/// Resolution engine port. Implemented by the iterative delegation walker
/// and the fan-out racer; the orchestrator only sees this trait.
///
/// `NotFound` is the exhaustion outcome (all roots dead-ended, or the race
/// produced no winner) and is never an internal failure.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError>;
}
