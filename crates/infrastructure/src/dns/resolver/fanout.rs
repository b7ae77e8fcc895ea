use crate::dns::cache::DnsCache;
use crate::dns::message::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::UdpExchange;
use async_trait::async_trait;
use delver_application::{DnsResolver, Resolution};
use delver_domain::config::ResolverConfig;
use delver_domain::{DnsQuery, DomainError};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Races one query attempt per pool candidate toward a single completion
/// funnel: the first attempt to produce a valid answer wins, the caller
/// performs the one cache insert, and the losers are aborted or run out
/// their own timeout and are discarded.
pub struct FanoutResolver {
    cache: Arc<DnsCache>,
    pool: Arc<Vec<String>>,
    attempt_timeout: Duration,
    wait_timeout: Duration,
    server_port: u16,
}

impl FanoutResolver {
    pub fn new(cache: Arc<DnsCache>, pool: Vec<String>, config: &ResolverConfig) -> Self {
        Self {
            cache,
            pool: Arc::new(pool),
            attempt_timeout: Duration::from_millis(config.query_timeout_ms),
            wait_timeout: Duration::from_millis(config.fanout_wait_ms),
            server_port: 53,
        }
    }

    /// Destination port override for tests that script responders on
    /// loopback addresses.
    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    async fn race(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        let packet = Arc::new(MessageBuilder::build_query(query, true)?);

        let mut abort_handles = Vec::with_capacity(self.pool.len());
        let mut attempts = FuturesUnordered::new();

        for candidate in self.pool.iter() {
            // skip candidates that are not well-formed IPv4 addresses
            let Ok(addr) = candidate.parse::<Ipv4Addr>() else {
                debug!(candidate, "Skipping malformed candidate address");
                continue;
            };
            let server = SocketAddr::from((addr, self.server_port));
            let packet = Arc::clone(&packet);
            let attempt_timeout = self.attempt_timeout;

            let handle = tokio::spawn(async move {
                let bytes = UdpExchange::send(&packet, server, attempt_timeout).await?;
                let response = ResponseParser::parse(bytes)?;
                if !response.has_answer() {
                    return Err(DomainError::NotFound(server.to_string()));
                }
                Ok::<(DnsResponse, SocketAddr), DomainError>((response, server))
            });
            abort_handles.push(handle.abort_handle());
            attempts.push(handle);
        }

        if attempts.is_empty() {
            warn!(domain = %query.domain, "No usable candidates in the resolver pool");
            return Err(DomainError::NotFound(query.domain.to_string()));
        }

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            attempts = attempts.len(),
            "Racing resolver pool"
        );

        // The caller waits on the funnel with its own ceiling, independent
        // of how many attempts were launched.
        let winner = timeout(self.wait_timeout, async {
            while let Some(joined) = attempts.next().await {
                match joined {
                    Ok(Ok(win)) => return Some(win),
                    Ok(Err(e)) => debug!(error = %e, "Attempt lost the race"),
                    Err(e) => warn!(error = %e, "Attempt task failed"),
                }
            }
            None
        })
        .await;

        // losers are not kept alive past the decision
        for handle in &abort_handles {
            handle.abort();
        }

        match winner {
            Ok(Some((response, server))) => {
                let ttl = response.cache_ttl();
                let records = Arc::new(response.records);
                // single insert on the winning path; no other attempt
                // reaches the cache
                self.cache.insert(query, Arc::clone(&records), ttl);
                debug!(server = %server, "First answer won the race");
                Ok(Resolution::fresh(records, Vec::new()))
            }
            Ok(None) | Err(_) => Err(DomainError::NotFound(query.domain.to_string())),
        }
    }
}

#[async_trait]
impl DnsResolver for FanoutResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        if let Some(records) = self.cache.get(query) {
            debug!(domain = %query.domain, record_type = %query.record_type, "Cache hit");
            return Ok(Resolution::cached(records));
        }
        self.race(query).await
    }
}
