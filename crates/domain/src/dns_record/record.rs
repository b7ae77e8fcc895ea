use super::RecordType;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decoded rdata for the record types this resolver understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Txt(Vec<String>),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{}", addr),
            RecordData::Aaaa(addr) => write!(f, "{}", addr),
            RecordData::Txt(parts) => {
                let mut first = true;
                for part in parts {
                    if !first {
                        write!(f, " ")?;
                    }
                    write!(f, "\"{}\"", part)?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}

/// One resolved resource record: the Answer the cache and the prompt
/// loop both operate on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub domain: String,
    pub record_type: RecordType,
    pub data: RecordData,
    /// Seconds the record may be treated as valid.
    pub ttl: u32,
}

impl DnsRecord {
    pub fn new(domain: String, record_type: RecordType, data: RecordData, ttl: u32) -> Self {
        Self {
            domain,
            record_type,
            data,
            ttl,
        }
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} IN {} {}",
            self.domain, self.ttl, self.record_type, self.data
        )
    }
}
