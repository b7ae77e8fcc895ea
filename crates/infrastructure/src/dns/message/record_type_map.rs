use delver_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Convert domain RecordType → hickory RecordType (for building queries).
    ///
    /// `ANY` has no wire form here; it is expanded by the orchestrator
    /// before a query is ever built.
    pub fn to_hickory(record_type: RecordType) -> Option<HickoryRecordType> {
        match record_type {
            RecordType::A => Some(HickoryRecordType::A),
            RecordType::AAAA => Some(HickoryRecordType::AAAA),
            RecordType::TXT => Some(HickoryRecordType::TXT),
            RecordType::Any => None,
        }
    }

    /// Convert hickory RecordType → domain RecordType (for decoding answers).
    ///
    /// Returns `None` for record types outside the supported set.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> Option<RecordType> {
        match hickory_type {
            HickoryRecordType::A => Some(RecordType::A),
            HickoryRecordType::AAAA => Some(RecordType::AAAA),
            HickoryRecordType::TXT => Some(RecordType::TXT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_types_round_trip() {
        for rt in [RecordType::A, RecordType::AAAA, RecordType::TXT] {
            let hickory = RecordTypeMapper::to_hickory(rt).unwrap();
            assert_eq!(RecordTypeMapper::from_hickory(hickory), Some(rt));
        }
    }

    #[test]
    fn any_has_no_wire_form() {
        assert!(RecordTypeMapper::to_hickory(RecordType::Any).is_none());
    }

    #[test]
    fn unsupported_types_are_skipped() {
        assert_eq!(RecordTypeMapper::from_hickory(HickoryRecordType::MX), None);
    }
}
