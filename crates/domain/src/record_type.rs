use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// DNS record type symbol.
///
/// Covers the types the decorator knows how to name; any other numeric
/// code round-trips through `Other` and renders as `TYPE<n>` (RFC 3597).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Ns,
    Cname,
    Soa,
    Ptr,
    Mx,
    Txt,
    Aaaa,
    Srv,
    Naptr,
    Ds,
    Sshfp,
    Rrsig,
    Nsec,
    Dnskey,
    Nsec3,
    Tlsa,
    Svcb,
    Https,
    Caa,
    Any,
    Other(u16),
}

impl RecordType {
    /// Numeric wire code for this type.
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Soa => 6,
            RecordType::Ptr => 12,
            RecordType::Mx => 15,
            RecordType::Txt => 16,
            RecordType::Aaaa => 28,
            RecordType::Srv => 33,
            RecordType::Naptr => 35,
            RecordType::Ds => 43,
            RecordType::Sshfp => 44,
            RecordType::Rrsig => 46,
            RecordType::Nsec => 47,
            RecordType::Dnskey => 48,
            RecordType::Nsec3 => 50,
            RecordType::Tlsa => 52,
            RecordType::Svcb => 64,
            RecordType::Https => 65,
            RecordType::Caa => 257,
            RecordType::Any => 255,
            RecordType::Other(code) => *code,
        }
    }

    /// Symbol for a numeric wire code. Never fails; unknown codes map to
    /// `Other`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            12 => RecordType::Ptr,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            33 => RecordType::Srv,
            35 => RecordType::Naptr,
            43 => RecordType::Ds,
            44 => RecordType::Sshfp,
            46 => RecordType::Rrsig,
            47 => RecordType::Nsec,
            48 => RecordType::Dnskey,
            50 => RecordType::Nsec3,
            52 => RecordType::Tlsa,
            64 => RecordType::Svcb,
            65 => RecordType::Https,
            255 => RecordType::Any,
            257 => RecordType::Caa,
            other => RecordType::Other(other),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::Ns => write!(f, "NS"),
            RecordType::Cname => write!(f, "CNAME"),
            RecordType::Soa => write!(f, "SOA"),
            RecordType::Ptr => write!(f, "PTR"),
            RecordType::Mx => write!(f, "MX"),
            RecordType::Txt => write!(f, "TXT"),
            RecordType::Aaaa => write!(f, "AAAA"),
            RecordType::Srv => write!(f, "SRV"),
            RecordType::Naptr => write!(f, "NAPTR"),
            RecordType::Ds => write!(f, "DS"),
            RecordType::Sshfp => write!(f, "SSHFP"),
            RecordType::Rrsig => write!(f, "RRSIG"),
            RecordType::Nsec => write!(f, "NSEC"),
            RecordType::Dnskey => write!(f, "DNSKEY"),
            RecordType::Nsec3 => write!(f, "NSEC3"),
            RecordType::Tlsa => write!(f, "TLSA"),
            RecordType::Svcb => write!(f, "SVCB"),
            RecordType::Https => write!(f, "HTTPS"),
            RecordType::Caa => write!(f, "CAA"),
            RecordType::Any => write!(f, "ANY"),
            RecordType::Other(code) => write!(f, "TYPE{code}"),
        }
    }
}

impl FromStr for RecordType {
    type Err = DomainError;

    /// Known symbolic names only. Unknown names fail lookup validation
    /// rather than silently turning into an unresolvable query.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rtype = match s.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "NS" => RecordType::Ns,
            "CNAME" => RecordType::Cname,
            "SOA" => RecordType::Soa,
            "PTR" => RecordType::Ptr,
            "MX" => RecordType::Mx,
            "TXT" => RecordType::Txt,
            "AAAA" => RecordType::Aaaa,
            "SRV" => RecordType::Srv,
            "NAPTR" => RecordType::Naptr,
            "DS" => RecordType::Ds,
            "SSHFP" => RecordType::Sshfp,
            "RRSIG" => RecordType::Rrsig,
            "NSEC" => RecordType::Nsec,
            "DNSKEY" => RecordType::Dnskey,
            "NSEC3" => RecordType::Nsec3,
            "TLSA" => RecordType::Tlsa,
            "SVCB" => RecordType::Svcb,
            "HTTPS" => RecordType::Https,
            "CAA" => RecordType::Caa,
            "ANY" => RecordType::Any,
            _ => return Err(DomainError::UnknownRecordType(s.to_string())),
        };
        Ok(rtype)
    }
}
