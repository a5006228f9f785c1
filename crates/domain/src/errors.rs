use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid query name: {0}")]
    InvalidQueryName(String),

    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    #[error("Unknown record class: {0}")]
    UnknownRecordClass(String),
}
