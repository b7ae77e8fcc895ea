//! DNS query construction in wire format via `hickory-proto`.

use super::record_type_map::RecordTypeMapper;
use delver_domain::{DnsQuery, DomainError};
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::Name;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

pub struct MessageBuilder;

impl MessageBuilder {
    /// Build a single-question query and serialize it to wire bytes.
    ///
    /// The iterative walker sends with RD clear (it chases referrals
    /// itself); the fan-out racer sets RD so the public resolvers do the
    /// work.
    pub fn build_query(query: &DnsQuery, recursion_desired: bool) -> Result<Vec<u8>, DomainError> {
        let name = Name::from_str(&query.domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", query.domain, e))
        })?;

        let hickory_type = RecordTypeMapper::to_hickory(query.record_type).ok_or_else(|| {
            DomainError::InvalidRecordType(format!(
                "{} cannot be sent on the wire",
                query.record_type
            ))
        })?;

        let mut question = Query::new();
        question.set_name(name);
        question.set_query_type(hickory_type);
        question.set_query_class(hickory_proto::rr::DNSClass::IN);

        let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
        message.set_recursion_desired(recursion_desired);
        message.add_query(question);

        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);
        message.emit(&mut encoder).map_err(|e| {
            DomainError::InvalidDomainName(format!("Failed to serialize DNS query: {}", e))
        })?;

        Ok(buf)
    }
}
