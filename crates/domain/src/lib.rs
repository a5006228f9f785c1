//! Funnel DNS Domain Layer
pub mod answer;
pub mod config;
pub mod errors;
pub mod question;
pub mod raw;
pub mod rdata;
pub mod record_class;
pub mod record_type;
pub mod response_code;

pub use answer::{Answer, Record};
pub use config::EngineConfig;
pub use errors::DomainError;
pub use question::Question;
pub use raw::{RawAnswer, RawRecord};
pub use rdata::RecordData;
pub use record_class::RecordClass;
pub use record_type::RecordType;
pub use response_code::ResponseCode;
