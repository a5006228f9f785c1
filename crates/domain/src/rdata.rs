use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::record_type::RecordType;

/// Parsed rdata, tagged by what the parser understood.
///
/// Fixed-layout types are decoded; everything else (notably types whose
/// rdata embeds compressed domain names) stays an opaque blob rendered in
/// RFC 3597 generic form. The engine owns full wire parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Txt(String),
    Opaque(Vec<u8>),
}

type Parser = fn(&[u8]) -> RecordData;

/// Parser table keyed by record type, resolved once at decoration time.
pub fn parser_for(rtype: RecordType) -> Parser {
    match rtype {
        RecordType::A => parse_a,
        RecordType::Aaaa => parse_aaaa,
        RecordType::Txt => parse_txt,
        _ => parse_opaque,
    }
}

fn parse_a(rdata: &[u8]) -> RecordData {
    match <[u8; 4]>::try_from(rdata) {
        Ok(octets) => RecordData::A(Ipv4Addr::from(octets)),
        Err(_) => RecordData::Opaque(rdata.to_vec()),
    }
}

fn parse_aaaa(rdata: &[u8]) -> RecordData {
    match <[u8; 16]>::try_from(rdata) {
        Ok(octets) => RecordData::Aaaa(Ipv6Addr::from(octets)),
        Err(_) => RecordData::Opaque(rdata.to_vec()),
    }
}

/// TXT rdata is a sequence of length-prefixed character-strings; they are
/// joined with a single space for rendering.
fn parse_txt(rdata: &[u8]) -> RecordData {
    let mut parts = Vec::new();
    let mut rest = rdata;
    while let Some((&len, tail)) = rest.split_first() {
        let len = len as usize;
        if tail.len() < len {
            return RecordData::Opaque(rdata.to_vec());
        }
        let (chunk, tail) = tail.split_at(len);
        parts.push(String::from_utf8_lossy(chunk).into_owned());
        rest = tail;
    }
    RecordData::Txt(parts.join(" "))
}

fn parse_opaque(rdata: &[u8]) -> RecordData {
    RecordData::Opaque(rdata.to_vec())
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(addr) => write!(f, "{addr}"),
            RecordData::Aaaa(addr) => write!(f, "{addr}"),
            RecordData::Txt(text) => write!(f, "{text}"),
            RecordData::Opaque(bytes) => {
                write!(f, "\\# {}", bytes.len())?;
                if !bytes.is_empty() {
                    write!(f, " ")?;
                    for byte in bytes {
                        write!(f, "{byte:02x}")?;
                    }
                }
                Ok(())
            }
        }
    }
}
