//! Dependency wiring: one cache instance, the resolver the configured
//! mode calls for, and the orchestrating use case on top.

use delver_application::{DnsResolver, ResolveQueryUseCase};
use delver_domain::config::ResolveMode;
use delver_domain::Config;
use delver_infrastructure::dns::pool::load_resolver_pool;
use delver_infrastructure::{DnsCache, FanoutResolver, IterativeConfig, IterativeResolver};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub fn build(config: &Config, servers_file: &Path) -> anyhow::Result<ResolveQueryUseCase> {
    let cache = Arc::new(DnsCache::new(config.cache.max_entries));

    let resolver: Arc<dyn DnsResolver> = match config.resolver.mode {
        ResolveMode::Recursive => {
            // the pool is loaded once, before the first query
            let pool = load_resolver_pool(servers_file, config.resolver.max_candidates)?;
            Arc::new(FanoutResolver::new(cache, pool, &config.resolver))
        }
        ResolveMode::Iterative => Arc::new(IterativeResolver::new(
            cache,
            IterativeConfig::from(&config.resolver),
        )),
    };

    info!(
        mode = %config.resolver.mode,
        cache_entries = config.cache.max_entries,
        query_timeout_ms = config.resolver.query_timeout_ms,
        "Resolver ready"
    );

    Ok(ResolveQueryUseCase::new(resolver))
}
