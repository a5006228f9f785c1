use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// DNS class symbol. `IN` in practice; the rest exist so numeric codes
/// round-trip cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    In,
    Ch,
    Hs,
    None,
    Any,
    Other(u16),
}

impl RecordClass {
    pub fn code(&self) -> u16 {
        match self {
            RecordClass::In => 1,
            RecordClass::Ch => 3,
            RecordClass::Hs => 4,
            RecordClass::None => 254,
            RecordClass::Any => 255,
            RecordClass::Other(code) => *code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            1 => RecordClass::In,
            3 => RecordClass::Ch,
            4 => RecordClass::Hs,
            254 => RecordClass::None,
            255 => RecordClass::Any,
            other => RecordClass::Other(other),
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordClass::In => write!(f, "IN"),
            RecordClass::Ch => write!(f, "CH"),
            RecordClass::Hs => write!(f, "HS"),
            RecordClass::None => write!(f, "NONE"),
            RecordClass::Any => write!(f, "ANY"),
            RecordClass::Other(code) => write!(f, "CLASS{code}"),
        }
    }
}

impl FromStr for RecordClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match s.to_ascii_uppercase().as_str() {
            "IN" => RecordClass::In,
            "CH" => RecordClass::Ch,
            "HS" => RecordClass::Hs,
            "NONE" => RecordClass::None,
            "ANY" => RecordClass::Any,
            _ => return Err(DomainError::UnknownRecordClass(s.to_string())),
        };
        Ok(class)
    }
}
