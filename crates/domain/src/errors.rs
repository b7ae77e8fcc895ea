use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("Invalid record type: {0}")]
    InvalidRecordType(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Unable to find domain: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl DomainError {
    /// Exhaustion and race-loss outcomes are reported as NotFound, never
    /// escalated. Everything else aborts the current attempt only.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}
