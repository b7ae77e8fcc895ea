//! Public resolver pool loader.
//!
//! The pool file is a comma-delimited text resource: the first line is a
//! header, each data line's first field (up to the comma) is a resolver
//! address. Loaded once before the first query; immutable afterwards.

use delver_domain::DomainError;
use std::path::Path;
use tracing::{debug, info};

pub fn load_resolver_pool(path: &Path, max_candidates: usize) -> Result<Vec<String>, DomainError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        DomainError::Io(format!(
            "Failed to read resolver pool file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let mut pool = Vec::with_capacity(max_candidates);
    // first line is a header
    for line in raw.lines().skip(1) {
        if pool.len() == max_candidates {
            break;
        }
        let Some(field) = line.split_whitespace().next() else {
            continue;
        };
        let Some((addr, _)) = field.split_once(',') else {
            debug!(line, "Skipping pool line without a comma-delimited address");
            continue;
        };
        if addr.is_empty() {
            continue;
        }
        pool.push(addr.to_string());
    }

    info!(
        candidates = pool.len(),
        file = %path.display(),
        "Resolver pool loaded"
    );
    Ok(pool)
}
