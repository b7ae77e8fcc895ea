use crate::ports::dns_resolver::DnsResolver;
use delver_domain::{DnsQuery, DnsRecord, DomainError, RecordType};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// One resolved sub-query, with the diagnostics the verbose prompt prints.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub record_type: RecordType,
    pub records: Arc<Vec<DnsRecord>>,
    pub cache_hit: bool,
    pub elapsed: Duration,
    pub path: Vec<IpAddr>,
}

/// Resolves a single user request: canonicalizes the name, expands ANY
/// into its concrete types, runs the configured resolver once per type and
/// aggregates the outcomes.
pub struct ResolveQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// For ANY, per-type misses are suppressed; the whole request is
    /// NotFound only when every expansion failed.
    pub async fn execute(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<Vec<QueryOutcome>, DomainError> {
        let query = DnsQuery::new(domain, record_type);
        let mut outcomes = Vec::new();
        let mut last_error: Option<DomainError> = None;

        for &sub_type in record_type.expand() {
            let sub_query = query.with_record_type(sub_type);
            let start = Instant::now();

            match self.resolver.resolve(&sub_query).await {
                Ok(resolution) => {
                    outcomes.push(QueryOutcome {
                        record_type: sub_type,
                        records: resolution.records,
                        cache_hit: resolution.cache_hit,
                        elapsed: start.elapsed(),
                        path: resolution.path,
                    });
                }
                Err(e) => {
                    debug!(domain = %query.domain, record_type = %sub_type, error = %e, "Sub-query failed");
                    if !e.is_not_found() {
                        last_error = Some(e);
                    }
                }
            }
        }

        if outcomes.is_empty() {
            return Err(last_error.unwrap_or_else(|| DomainError::NotFound(query.domain.to_string())));
        }
        Ok(outcomes)
    }
}
