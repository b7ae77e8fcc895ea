use crate::dns::cache::DnsCache;
use crate::dns::message::{MessageBuilder, ResponseParser};
use crate::dns::roots::ROOT_SERVERS;
use crate::dns::transport::UdpExchange;
use async_trait::async_trait;
use delver_application::{DnsResolver, Resolution};
use delver_domain::config::ResolverConfig;
use delver_domain::{DnsQuery, DomainError, RecordData, RecordType};
use futures::future::{BoxFuture, FutureExt};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Walk parameters. Roots, port and timings are injectable so tests can
/// point the walker at scripted servers with short timeouts.
#[derive(Debug, Clone)]
pub struct IterativeConfig {
    pub roots: Vec<Ipv4Addr>,
    pub server_port: u16,
    pub attempt_timeout: Duration,
    pub max_depth: u8,
}

impl Default for IterativeConfig {
    fn default() -> Self {
        Self {
            roots: ROOT_SERVERS.to_vec(),
            server_port: 53,
            attempt_timeout: Duration::from_secs(3),
            max_depth: 8,
        }
    }
}

impl From<&ResolverConfig> for IterativeConfig {
    fn from(config: &ResolverConfig) -> Self {
        Self {
            attempt_timeout: Duration::from_millis(config.query_timeout_ms),
            max_depth: config.max_depth,
            ..Self::default()
        }
    }
}

/// Walks the delegation chain from the root anchors down, one outstanding
/// request at a time. Referrals are followed through IPv4 glue when
/// present, otherwise through a separate bounded sub-resolution of the
/// authority's name-server host.
pub struct IterativeResolver {
    cache: Arc<DnsCache>,
    config: IterativeConfig,
}

/// What a hop decided: where to go next, that this branch is done, or
/// that the walk restarts at the next root.
enum Step {
    Next(SocketAddr),
    DeadEnd,
}

impl IterativeResolver {
    pub fn new(cache: Arc<DnsCache>, config: IterativeConfig) -> Self {
        Self { cache, config }
    }

    fn server_addr(&self, ip: Ipv4Addr) -> SocketAddr {
        SocketAddr::from((ip, self.config.server_port))
    }

    /// One full walk for one query. `nesting` bounds how deep authority
    /// name-server lookups may recurse; each nested call starts a fresh
    /// walk and never touches the caller's depth or path.
    fn walk<'a>(
        &'a self,
        query: &'a DnsQuery,
        nesting: u8,
    ) -> BoxFuture<'a, Result<Resolution, DomainError>> {
        async move {
            if let Some(records) = self.cache.get(query) {
                debug!(domain = %query.domain, record_type = %query.record_type, "Cache hit");
                return Ok(Resolution::cached(records));
            }

            let packet = MessageBuilder::build_query(query, false)?;

            let Some(&first_root) = self.config.roots.first() else {
                debug!(domain = %query.domain, "No root servers configured");
                return Err(DomainError::NotFound(query.domain.to_string()));
            };

            let mut root_idx = 0usize;
            let mut server = self.server_addr(first_root);
            let mut depth = 0u8;
            let mut path: Vec<IpAddr> = Vec::new();

            loop {
                if depth >= self.config.max_depth {
                    // depth exhausted on this branch, restart from next root
                    match self.advance_root(&mut root_idx, &mut depth, &mut path) {
                        Some(next) => {
                            server = next;
                            continue;
                        }
                        None => return Err(DomainError::NotFound(query.domain.to_string())),
                    }
                }

                let step = match UdpExchange::send(&packet, server, self.config.attempt_timeout)
                    .await
                {
                    Ok(bytes) => {
                        path.push(server.ip());
                        match ResponseParser::parse(bytes) {
                            Ok(response) if response.has_answer() => {
                                let ttl = response.cache_ttl();
                                let records = Arc::new(response.records);
                                self.cache.insert(query, Arc::clone(&records), ttl);
                                debug!(
                                    domain = %query.domain,
                                    server = %server,
                                    hops = path.len(),
                                    "Authoritative answer"
                                );
                                return Ok(Resolution::fresh(records, path));
                            }
                            Ok(response) => self.follow_referral(&response, nesting).await,
                            Err(e) => {
                                // decode failures are handled like a timeout
                                debug!(server = %server, error = %e, "Undecodable response");
                                Step::DeadEnd
                            }
                        }
                    }
                    Err(DomainError::QueryTimeout) => {
                        debug!(server = %server, "Hop timed out");
                        Step::DeadEnd
                    }
                    Err(e) => {
                        // any other transport error aborts the walk
                        debug!(server = %server, error = %e, "Transport error, aborting walk");
                        return Err(DomainError::NotFound(query.domain.to_string()));
                    }
                };

                match step {
                    Step::Next(next) => {
                        server = next;
                        depth += 1;
                    }
                    Step::DeadEnd => match self.advance_root(&mut root_idx, &mut depth, &mut path)
                    {
                        Some(next) => server = next,
                        None => return Err(DomainError::NotFound(query.domain.to_string())),
                    },
                }
            }
        }
        .boxed()
    }

    /// Referral handling for an answer-less response: IPv4 glue first,
    /// else a nested sub-resolution of the first authority name server's
    /// own address.
    async fn follow_referral(
        &self,
        response: &crate::dns::message::DnsResponse,
        nesting: u8,
    ) -> Step {
        if let Some(&glue) = response.glue.first() {
            debug!(glue = %glue, "Following glue referral");
            return Step::Next(self.server_addr(glue));
        }

        let Some(host) = response.authority_hosts.first() else {
            return Step::DeadEnd;
        };

        if nesting >= self.config.max_depth {
            debug!(ns = %host, "Nested resolution budget exhausted");
            return Step::DeadEnd;
        }

        debug!(ns = %host, "Referral without glue, resolving authority name server");
        let ns_query = DnsQuery::new(host, RecordType::A);
        match self.walk(&ns_query, nesting + 1).await {
            Ok(resolution) => match first_ipv4(&resolution.records) {
                Some(addr) => Step::Next(self.server_addr(addr)),
                None => Step::DeadEnd,
            },
            Err(_) => Step::DeadEnd,
        }
    }

    /// Restarting at a new root resets depth and path. `None` means the
    /// root set is exhausted.
    fn advance_root(
        &self,
        root_idx: &mut usize,
        depth: &mut u8,
        path: &mut Vec<IpAddr>,
    ) -> Option<SocketAddr> {
        *root_idx += 1;
        if *root_idx >= self.config.roots.len() {
            return None;
        }
        *depth = 0;
        path.clear();
        debug!(root = %self.config.roots[*root_idx], "Restarting walk at next root");
        Some(self.server_addr(self.config.roots[*root_idx]))
    }
}

fn first_ipv4(records: &[delver_domain::DnsRecord]) -> Option<Ipv4Addr> {
    records.iter().find_map(|record| match record.data {
        RecordData::A(addr) => Some(addr),
        _ => None,
    })
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.walk(query, 0).await
    }
}
