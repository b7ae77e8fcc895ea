use super::RecordType;
use std::sync::Arc;

/// DNS query (domain + record type).
/// Uses `Arc<str>` for zero-cost cloning across orchestrator → resolver →
/// cache layers.
///
/// The domain name is canonicalized on construction: ASCII-lowercased and
/// stripped of one trailing dot. The canonical form is what goes on the
/// wire and what keys the cache, so `Example.COM.` and `example.com` can
/// never occupy separate cache slots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsQuery {
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: canonicalize(domain),
            record_type,
        }
    }

    /// Same name, different record type. Used when expanding ANY.
    pub fn with_record_type(&self, record_type: RecordType) -> Self {
        Self {
            domain: Arc::clone(&self.domain),
            record_type,
        }
    }
}

fn canonicalize(domain: &str) -> Arc<str> {
    let trimmed = domain.strip_suffix('.').unwrap_or(domain);
    Arc::from(trimmed.to_ascii_lowercase())
}
