#![allow(dead_code)]
use async_trait::async_trait;
use delver_application::{DnsResolver, Resolution};
use delver_domain::{DnsQuery, DnsRecord, DomainError, RecordData, RecordType};
use std::collections::HashMap;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted resolver: answers only for the record types it was seeded
/// with, everything else is NotFound. Counts calls per type.
pub struct MockResolver {
    answers: Mutex<HashMap<RecordType, Arc<Vec<DnsRecord>>>>,
    pub calls: AtomicUsize,
}

impl MockResolver {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_answer(self, record_type: RecordType, records: Vec<DnsRecord>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .insert(record_type, Arc::new(records));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<Resolution, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answers = self.answers.lock().unwrap();
        match answers.get(&query.record_type) {
            Some(records) => Ok(Resolution::fresh(Arc::clone(records), Vec::new())),
            None => Err(DomainError::NotFound(query.domain.to_string())),
        }
    }
}

pub fn a_record(domain: &str, addr: [u8; 4], ttl: u32) -> DnsRecord {
    DnsRecord::new(
        domain.to_string(),
        RecordType::A,
        RecordData::A(Ipv4Addr::from(addr)),
        ttl,
    )
}

pub fn aaaa_record(domain: &str, ttl: u32) -> DnsRecord {
    DnsRecord::new(
        domain.to_string(),
        RecordType::AAAA,
        RecordData::Aaaa(Ipv6Addr::LOCALHOST),
        ttl,
    )
}
