use delver_domain::{DnsQuery, RecordType};
use std::sync::Arc;

/// Cache key: canonical domain name + record type.
///
/// `DnsQuery` canonicalizes the name at construction, so two spellings of
/// the same domain always hash to the same slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: Arc<str>, record_type: RecordType) -> Self {
        Self {
            domain,
            record_type,
        }
    }
}

impl From<&DnsQuery> for CacheKey {
    #[inline]
    fn from(query: &DnsQuery) -> Self {
        Self {
            domain: Arc::clone(&query.domain),
            record_type: query.record_type,
        }
    }
}
