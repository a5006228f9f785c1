use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::{Arc, OnceLock};

use crate::raw::RawAnswer;
use crate::rdata::{parser_for, RecordData};
use crate::record_class::RecordClass;
use crate::record_type::RecordType;
use crate::response_code::ResponseCode;

/// One decorated resource record.
///
/// Carries the parsed value plus the owning answer's shared fields
/// (qname, class, status), so a record remains self-describing when handed
/// around independently of its [`Answer`].
#[derive(Debug, Clone)]
pub struct Record {
    qname: Arc<str>,
    qclass: RecordClass,
    status: ResponseCode,
    rtype: RecordType,
    data: RecordData,
}

impl Record {
    pub fn qname(&self) -> &str {
        &self.qname
    }

    pub fn qclass(&self) -> RecordClass {
        self.qclass
    }

    pub fn status(&self) -> ResponseCode {
        self.status
    }

    pub fn rtype(&self) -> RecordType {
        self.rtype
    }

    pub fn data(&self) -> &RecordData {
        &self.data
    }

    /// Typed accessor for A records.
    pub fn a(&self) -> Option<Ipv4Addr> {
        match self.data {
            RecordData::A(addr) => Some(addr),
            _ => None,
        }
    }

    /// Typed accessor for AAAA records.
    pub fn aaaa(&self) -> Option<Ipv6Addr> {
        match self.data {
            RecordData::Aaaa(addr) => Some(addr),
            _ => None,
        }
    }

    /// Typed accessor for TXT records.
    pub fn txt(&self) -> Option<&str> {
        match &self.data {
            RecordData::Txt(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.qname, self.qclass, self.rtype, self.data
        )
    }
}

/// A decorated resolution result, shared by every coalesced caller.
///
/// Invariants: `bogus` set implies an empty record list (failed validation
/// never exposes data), and `secure` and `bogus` are mutually exclusive.
#[derive(Debug)]
pub struct Answer {
    pub qname: Arc<str>,
    pub qclass: RecordClass,
    pub qtype: RecordType,
    pub status: ResponseCode,
    pub secure: bool,
    pub bogus: Option<String>,
    records: Vec<Record>,
    rendered: OnceLock<String>,
}

impl Answer {
    /// Decorate a raw engine answer. Pure: no engine or coalescer state is
    /// touched.
    pub fn decorate(raw: RawAnswer) -> Self {
        let qtype = RecordType::from_code(raw.qtype);
        let qclass = RecordClass::from_code(raw.qclass);
        let status = ResponseCode::from_code(raw.rcode);
        let qname = raw.qname;

        // A bogus verdict discards the payload wholesale.
        if let Some(why) = raw.bogus {
            return Self {
                qname,
                qclass,
                qtype,
                status,
                secure: false,
                bogus: Some(why),
                records: Vec::new(),
                rendered: OnceLock::new(),
            };
        }

        let parse = parser_for(qtype);
        let records = raw
            .records
            .iter()
            .map(|rr| Record {
                qname: Arc::clone(&qname),
                qclass,
                status,
                rtype: qtype,
                data: parse(&rr.rdata),
            })
            .collect();

        Self {
            qname,
            qclass,
            qtype,
            status,
            secure: raw.secure,
            bogus: None,
            records,
            rendered: OnceLock::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deterministic textual rendering, computed once and cached. Repeated
    /// calls return the identical string.
    pub fn text(&self) -> &str {
        self.rendered.get_or_init(|| {
            let mut lines = Vec::with_capacity(1 + self.records.len());
            let mut head = format!("Status: {}", self.status);
            if self.secure {
                head.push_str(", Secure");
            } else if let Some(why) = &self.bogus {
                head.push_str(", Bogus: ");
                head.push_str(why);
            }
            lines.push(head);
            for record in &self.records {
                lines.push(record.to_string());
            }
            lines.join("\n")
        })
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
