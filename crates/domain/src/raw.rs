use std::sync::Arc;

/// One raw resource record as reported by the engine: the rdata wire bytes,
/// untyped. The owning [`RawAnswer`] carries the shared type/class codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub rdata: Vec<u8>,
}

impl RawRecord {
    pub fn new(rdata: impl Into<Vec<u8>>) -> Self {
        Self {
            rdata: rdata.into(),
        }
    }
}

/// A completed resolution exactly as the validating engine reports it:
/// numeric codes, security verdict, raw rdata. Opaque to callers — the
/// decorator turns this into an [`Answer`](crate::Answer).
#[derive(Debug, Clone)]
pub struct RawAnswer {
    /// Query name as originally submitted.
    pub qname: Arc<str>,
    /// Numeric wire code of the query type.
    pub qtype: u16,
    /// Numeric wire code of the query class.
    pub qclass: u16,
    /// Numeric response code (rcode).
    pub rcode: u16,
    /// Engine verdict: DNSSEC validation succeeded.
    pub secure: bool,
    /// Engine verdict: validation failed, with the engine's reason string.
    pub bogus: Option<String>,
    /// Answer-section rdata, in wire order.
    pub records: Vec<RawRecord>,
}

impl RawAnswer {
    pub fn new(qname: impl Into<Arc<str>>, qtype: u16, qclass: u16, rcode: u16) -> Self {
        Self {
            qname: qname.into(),
            qtype,
            qclass,
            rcode,
            secure: false,
            bogus: None,
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, rdata: impl Into<Vec<u8>>) -> Self {
        self.records.push(RawRecord::new(rdata));
        self
    }

    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    pub fn bogus(mut self, why: impl Into<String>) -> Self {
        self.bogus = Some(why.into());
        self
    }
}
