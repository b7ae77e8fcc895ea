use crate::errors::DomainError;
use std::fmt;
use std::str::FromStr;

/// Record types accepted at the prompt. `Any` is synthetic: it is never
/// sent on the wire and expands to the concrete set before resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    TXT,
    Any,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::TXT => "TXT",
            RecordType::Any => "ANY",
        }
    }

    /// Concrete types a query for this type resolves to.
    pub fn expand(&self) -> &'static [RecordType] {
        match self {
            RecordType::Any => &[RecordType::A, RecordType::AAAA, RecordType::TXT],
            RecordType::A => &[RecordType::A],
            RecordType::AAAA => &[RecordType::AAAA],
            RecordType::TXT => &[RecordType::TXT],
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, RecordType::Any)
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::AAAA),
            "TXT" => Ok(RecordType::TXT),
            "ANY" => Ok(RecordType::Any),
            other => Err(DomainError::InvalidRecordType(other.to_string())),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
