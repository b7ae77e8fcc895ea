use super::record_type_map::RecordTypeMapper;
use bytes::Bytes;
use delver_domain::{DnsRecord, DomainError, RecordData};
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::{RData, Record};
use std::net::Ipv4Addr;
use tracing::debug;

/// A decoded response, reduced to what the walkers act on: the answer
/// section in domain terms, IPv4 glue from the additional section, and
/// the authority section's name-server host names.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub records: Vec<DnsRecord>,

    /// Minimum TTL across the answer section; drives the cache expiry.
    pub min_ttl: Option<u32>,

    /// IPv4 addresses from the additional section, in wire order.
    pub glue: Vec<Ipv4Addr>,

    /// NS host names from the authority section, in wire order.
    pub authority_hosts: Vec<String>,

    pub rcode: ResponseCode,
}

impl DnsResponse {
    pub fn has_answer(&self) -> bool {
        !self.records.is_empty()
    }

    /// TTL for the cache fill. Defensive default only; a response with an
    /// answer always carries `min_ttl`.
    pub fn cache_ttl(&self) -> u32 {
        self.min_ttl.unwrap_or(0)
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: Bytes) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();

        let mut records = Vec::with_capacity(message.answers().len().min(8));
        let mut min_ttl: Option<u32> = None;

        for record in message.answers() {
            if let Some(decoded) = Self::decode_answer(record) {
                min_ttl = Some(min_ttl.map_or(decoded.ttl, |current| current.min(decoded.ttl)));
                records.push(decoded);
            }
        }

        let mut glue = Vec::new();
        for record in message.additionals() {
            if let RData::A(a) = record.data() {
                glue.push(a.0);
            }
        }

        let mut authority_hosts = Vec::new();
        for record in message.name_servers() {
            if let RData::NS(ns) = record.data() {
                let host = ns.0.to_utf8();
                debug!(ns = %host, "Authority name server");
                authority_hosts.push(host);
            }
        }

        Ok(DnsResponse {
            records,
            min_ttl,
            glue,
            authority_hosts,
            rcode,
        })
    }

    fn decode_answer(record: &Record) -> Option<DnsRecord> {
        let record_type = RecordTypeMapper::from_hickory(record.record_type())?;
        let data = match record.data() {
            RData::A(a) => RecordData::A(a.0),
            RData::AAAA(aaaa) => RecordData::Aaaa(aaaa.0),
            RData::TXT(txt) => RecordData::Txt(
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part).into_owned())
                    .collect(),
            ),
            _ => return None,
        };
        Some(DnsRecord::new(
            record.name().to_utf8(),
            record_type,
            data,
            record.ttl(),
        ))
    }
}
