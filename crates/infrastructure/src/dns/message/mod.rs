//! Wire-format boundary. Encoding and decoding is delegated to
//! `hickory-proto`; these wrappers keep the rest of the crate working in
//! domain terms.

pub mod builder;
pub mod parser;
pub mod record_type_map;

pub use builder::MessageBuilder;
pub use parser::{DnsResponse, ResponseParser};
pub use record_type_map::RecordTypeMapper;
