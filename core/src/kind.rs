//! Variable kinds.
//!
//! The declaration order of [`CvType`] is the widening order used by the
//! arithmetic operators: when two numeric operands meet, the result takes
//! the larger of the two kinds.

use core::fmt;
use core::str::FromStr;

use hashbrown::HashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use static_assertions::assert_eq_size;

use crate::error::{Error, Result};

/// The kind of value a [`CgVar`](crate::CgVar) holds.
///
/// Discriminants match the numeric type codes of the CLIgen engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
#[repr(u8)]
pub enum CvType {
    Int8 = 1,
    Int16 = 2,
    Int32 = 3,
    Int64 = 4,
    Uint8 = 5,
    Uint16 = 6,
    Uint32 = 7,
    Uint64 = 8,
    /// Fixed-point decimal with 1 to 18 fractional digits.
    Dec64 = 9,
    Bool = 10,
    /// Rest of the command line.
    Rest = 11,
    String = 12,
    /// Interface name.
    Interface = 13,
    Ipv4Addr = 14,
    Ipv4Pfx = 15,
    Ipv6Addr = 16,
    Ipv6Pfx = 17,
    MacAddr = 18,
    Url = 19,
    Uuid = 20,
    /// Seconds since the epoch with microsecond precision.
    Time = 21,
}

assert_eq_size!(CvType, u8);

lazy_static! {
    static ref BY_NAME: HashMap<&'static str, CvType> = {
        let mut map: HashMap<&'static str, CvType> =
            CvType::ALL.iter().map(|kind| (kind.as_str(), *kind)).collect();
        // Compatibility names.
        map.insert("int", CvType::Int32);
        map.insert("long", CvType::Int64);
        map.insert("dec64", CvType::Dec64);
        map
    };
}

impl CvType {
    /// Every kind, in widening order.
    pub const ALL: [CvType; 21] = [
        CvType::Int8,
        CvType::Int16,
        CvType::Int32,
        CvType::Int64,
        CvType::Uint8,
        CvType::Uint16,
        CvType::Uint32,
        CvType::Uint64,
        CvType::Dec64,
        CvType::Bool,
        CvType::Rest,
        CvType::String,
        CvType::Interface,
        CvType::Ipv4Addr,
        CvType::Ipv4Pfx,
        CvType::Ipv6Addr,
        CvType::Ipv6Pfx,
        CvType::MacAddr,
        CvType::Url,
        CvType::Uuid,
        CvType::Time,
    ];

    /// The numeric type code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look a kind up by its numeric type code.
    pub fn from_code(code: u8) -> Result<CvType> {
        CvType::ALL
            .iter()
            .copied()
            .find(|kind| kind.code() == code)
            .ok_or_else(|| Error::InvalidArgument(format!("unknown type code {code}")))
    }

    /// Canonical type name, as printed by `type2str`.
    pub fn as_str(self) -> &'static str {
        match self {
            CvType::Int8 => "int8",
            CvType::Int16 => "int16",
            CvType::Int32 => "int32",
            CvType::Int64 => "int64",
            CvType::Uint8 => "uint8",
            CvType::Uint16 => "uint16",
            CvType::Uint32 => "uint32",
            CvType::Uint64 => "uint64",
            CvType::Dec64 => "decimal64",
            CvType::Bool => "bool",
            CvType::Rest => "rest",
            CvType::String => "string",
            CvType::Interface => "interface",
            CvType::Ipv4Addr => "ipv4addr",
            CvType::Ipv4Pfx => "ipv4prefix",
            CvType::Ipv6Addr => "ipv6addr",
            CvType::Ipv6Pfx => "ipv6prefix",
            CvType::MacAddr => "macaddr",
            CvType::Url => "url",
            CvType::Uuid => "uuid",
            CvType::Time => "time",
        }
    }

    /// Short description of the accepted text, used in parse errors.
    pub fn grammar(self) -> &'static str {
        match self {
            CvType::Int8 => "integer in -128..=127",
            CvType::Int16 => "integer in -32768..=32767",
            CvType::Int32 => "integer in -2147483648..=2147483647",
            CvType::Int64 => "64-bit signed integer",
            CvType::Uint8 => "integer in 0..=255",
            CvType::Uint16 => "integer in 0..=65535",
            CvType::Uint32 => "integer in 0..=4294967295",
            CvType::Uint64 => "64-bit unsigned integer",
            CvType::Dec64 => "decimal number with 1 to 18 fractional digits, e.g. 3.14",
            CvType::Bool => "true, false, on or off",
            CvType::Rest | CvType::String => "any text",
            CvType::Interface => "interface name",
            CvType::Ipv4Addr => "dotted-quad address, e.g. 192.0.2.1",
            CvType::Ipv4Pfx => "address and mask length, e.g. 192.0.2.0/24",
            CvType::Ipv6Addr => "IPv6 address, e.g. 2001:db8::1",
            CvType::Ipv6Pfx => "IPv6 address and mask length, e.g. 2001:db8::/32",
            CvType::MacAddr => "six colon-separated hex octets, e.g. 00:1b:21:3a:4f:9c",
            CvType::Url => "URL, e.g. https://example.com/path",
            CvType::Uuid => "8-4-4-4-12 hex digits",
            CvType::Time => "epoch seconds or a date, e.g. 2014-06-01T12:00:00Z",
        }
    }

    /// True for integer kinds.
    pub fn is_integer(self) -> bool {
        self <= CvType::Uint64
    }

    /// True for integer kinds and decimal64.
    pub fn is_numeric(self) -> bool {
        self <= CvType::Dec64
    }

    /// True for kinds whose value is plain text.
    pub fn is_string(self) -> bool {
        matches!(
            self,
            CvType::String | CvType::Rest | CvType::Interface | CvType::Url
        )
    }

    /// The larger of two kinds in widening order.
    pub fn widen(self, other: CvType) -> CvType {
        self.max(other)
    }
}

impl fmt::Display for CvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CvType {
    type Err = Error;

    fn from_str(s: &str) -> Result<CvType> {
        BY_NAME
            .get(s.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| Error::InvalidArgument(format!("unknown type name '{s}'")))
    }
}

impl TryFrom<&str> for CvType {
    type Error = Error;

    fn try_from(s: &str) -> Result<CvType> {
        s.parse()
    }
}

impl TryFrom<String> for CvType {
    type Error = Error;

    fn try_from(s: String) -> Result<CvType> {
        s.parse()
    }
}

impl TryFrom<u8> for CvType {
    type Error = Error;

    fn try_from(code: u8) -> Result<CvType> {
        CvType::from_code(code)
    }
}

impl From<CvType> for &'static str {
    fn from(kind: CvType) -> &'static str {
        kind.as_str()
    }
}
