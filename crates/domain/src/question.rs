use std::str::FromStr;
use std::sync::Arc;

use crate::errors::DomainError;
use crate::record_class::RecordClass;
use crate::record_type::RecordType;

/// The query key: `(qname, qclass, qtype)`.
///
/// Every lookup sharing an equal `Question` is coalesced onto one engine
/// resolution. `Arc<str>` keeps cloning cheap across coalescer → engine →
/// answer layers. The qname is compared exactly as given; class and type
/// are normalized to their symbols before comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Question {
    pub qname: Arc<str>,
    pub qclass: RecordClass,
    pub qtype: RecordType,
}

impl Question {
    /// Build a validated question from caller-supplied strings.
    ///
    /// The qname must be non-empty, longer than one character, and must not
    /// contain an empty label (`..`). Type and class names must resolve in
    /// the symbol tables.
    pub fn new(qname: &str, qtype: &str, qclass: &str) -> Result<Self, DomainError> {
        validate_qname(qname)?;
        let qtype = RecordType::from_str(qtype)?;
        let qclass = RecordClass::from_str(qclass)?;
        Ok(Self {
            qname: Arc::from(qname),
            qclass,
            qtype,
        })
    }

    /// Build a question from already-normalized parts. Used when re-deriving
    /// the key from a raw engine answer, which reports numeric codes.
    pub fn from_parts(qname: Arc<str>, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            qname,
            qclass,
            qtype,
        }
    }
}

fn validate_qname(qname: &str) -> Result<(), DomainError> {
    if qname.len() <= 1 {
        return Err(DomainError::InvalidQueryName(qname.to_string()));
    }
    if qname.contains("..") {
        return Err(DomainError::InvalidQueryName(qname.to_string()));
    }
    Ok(())
}
