use core::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use uuid::Uuid;

use super::number::Number;
use super::scalar::{Dec64, Ipv4Prefix, Ipv6Prefix, MacAddr, Timestamp};
use crate::error::{Error, Result};
use crate::kind::CvType;

/// The payload of a variable. The variant determines the kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Dec64(Dec64),
    Bool(bool),
    Rest(String),
    String(String),
    Interface(String),
    Ipv4Addr(Ipv4Addr),
    Ipv4Pfx(Ipv4Prefix),
    Ipv6Addr(Ipv6Addr),
    Ipv6Pfx(Ipv6Prefix),
    MacAddr(MacAddr),
    /// Normalized URL text; decomposed on read. Empty when unset.
    Url(String),
    Uuid(Uuid),
    Time(Timestamp),
}

impl Value {
    /// The zero value of `kind`.
    pub fn zero(kind: CvType) -> Value {
        match kind {
            CvType::Int8 => Value::Int8(0),
            CvType::Int16 => Value::Int16(0),
            CvType::Int32 => Value::Int32(0),
            CvType::Int64 => Value::Int64(0),
            CvType::Uint8 => Value::Uint8(0),
            CvType::Uint16 => Value::Uint16(0),
            CvType::Uint32 => Value::Uint32(0),
            CvType::Uint64 => Value::Uint64(0),
            CvType::Dec64 => Value::Dec64(Dec64::ZERO),
            CvType::Bool => Value::Bool(false),
            CvType::Rest => Value::Rest(String::new()),
            CvType::String => Value::String(String::new()),
            CvType::Interface => Value::Interface(String::new()),
            CvType::Ipv4Addr => Value::Ipv4Addr(Ipv4Addr::UNSPECIFIED),
            CvType::Ipv4Pfx => Value::Ipv4Pfx(Ipv4Prefix::default()),
            CvType::Ipv6Addr => Value::Ipv6Addr(Ipv6Addr::UNSPECIFIED),
            CvType::Ipv6Pfx => Value::Ipv6Pfx(Ipv6Prefix::default()),
            CvType::MacAddr => Value::MacAddr(MacAddr::default()),
            CvType::Url => Value::Url(String::new()),
            CvType::Uuid => Value::Uuid(Uuid::nil()),
            CvType::Time => Value::Time(Timestamp::default()),
        }
    }

    pub fn kind(&self) -> CvType {
        match self {
            Value::Int8(_) => CvType::Int8,
            Value::Int16(_) => CvType::Int16,
            Value::Int32(_) => CvType::Int32,
            Value::Int64(_) => CvType::Int64,
            Value::Uint8(_) => CvType::Uint8,
            Value::Uint16(_) => CvType::Uint16,
            Value::Uint32(_) => CvType::Uint32,
            Value::Uint64(_) => CvType::Uint64,
            Value::Dec64(_) => CvType::Dec64,
            Value::Bool(_) => CvType::Bool,
            Value::Rest(_) => CvType::Rest,
            Value::String(_) => CvType::String,
            Value::Interface(_) => CvType::Interface,
            Value::Ipv4Addr(_) => CvType::Ipv4Addr,
            Value::Ipv4Pfx(_) => CvType::Ipv4Pfx,
            Value::Ipv6Addr(_) => CvType::Ipv6Addr,
            Value::Ipv6Pfx(_) => CvType::Ipv6Pfx,
            Value::MacAddr(_) => CvType::MacAddr,
            Value::Url(_) => CvType::Url,
            Value::Uuid(_) => CvType::Uuid,
            Value::Time(_) => CvType::Time,
        }
    }

    /// Parse `text` with the grammar of `kind`.
    pub fn parse(kind: CvType, text: &str) -> Result<Value> {
        let value = match kind {
            CvType::Int8 => Value::Int8(parse_int(kind, text)?),
            CvType::Int16 => Value::Int16(parse_int(kind, text)?),
            CvType::Int32 => Value::Int32(parse_int(kind, text)?),
            CvType::Int64 => Value::Int64(parse_int(kind, text)?),
            CvType::Uint8 => Value::Uint8(parse_int(kind, text)?),
            CvType::Uint16 => Value::Uint16(parse_int(kind, text)?),
            CvType::Uint32 => Value::Uint32(parse_int(kind, text)?),
            CvType::Uint64 => Value::Uint64(parse_int(kind, text)?),
            CvType::Dec64 => Value::Dec64(text.parse()?),
            CvType::Bool => Value::Bool(parse_bool(text)?),
            CvType::Rest => Value::Rest(text.to_string()),
            CvType::String => Value::String(text.to_string()),
            CvType::Interface => Value::Interface(text.to_string()),
            CvType::Ipv4Addr => {
                Value::Ipv4Addr(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
            CvType::Ipv4Pfx => Value::Ipv4Pfx(text.parse()?),
            CvType::Ipv6Addr => {
                Value::Ipv6Addr(text.parse().map_err(|_| Error::parse(kind, text))?)
            }
            CvType::Ipv6Pfx => Value::Ipv6Pfx(text.parse()?),
            CvType::MacAddr => Value::MacAddr(text.parse()?),
            CvType::Url => Value::Url(normalize_url(text)?),
            CvType::Uuid => Value::Uuid(parse_uuid(text)?),
            CvType::Time => Value::Time(text.parse()?),
        };
        Ok(value)
    }

    /// The exact numeric value, for integer and decimal kinds.
    pub fn number(&self) -> Option<Number> {
        let number = match *self {
            Value::Int8(v) => Number::from(i64::from(v)),
            Value::Int16(v) => Number::from(i64::from(v)),
            Value::Int32(v) => Number::from(i64::from(v)),
            Value::Int64(v) => Number::from(v),
            Value::Uint8(v) => Number::from(u64::from(v)),
            Value::Uint16(v) => Number::from(u64::from(v)),
            Value::Uint32(v) => Number::from(u64::from(v)),
            Value::Uint64(v) => Number::from(v),
            Value::Dec64(v) => Number::from(v),
            _ => return None,
        };
        Some(number)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int8(v) => v.fmt(f),
            Value::Int16(v) => v.fmt(f),
            Value::Int32(v) => v.fmt(f),
            Value::Int64(v) => v.fmt(f),
            Value::Uint8(v) => v.fmt(f),
            Value::Uint16(v) => v.fmt(f),
            Value::Uint32(v) => v.fmt(f),
            Value::Uint64(v) => v.fmt(f),
            Value::Dec64(v) => v.fmt(f),
            Value::Bool(v) => v.fmt(f),
            Value::Rest(v) | Value::String(v) | Value::Interface(v) | Value::Url(v) => {
                f.write_str(v)
            }
            Value::Ipv4Addr(v) => v.fmt(f),
            Value::Ipv4Pfx(v) => v.fmt(f),
            Value::Ipv6Addr(v) => v.fmt(f),
            Value::Ipv6Pfx(v) => v.fmt(f),
            Value::MacAddr(v) => v.fmt(f),
            Value::Uuid(v) => v.hyphenated().fmt(f),
            Value::Time(v) => v.fmt(f),
        }
    }
}

/// Decimal or `0x` hexadecimal integer with an optional sign, range checked
/// against the target width.
fn parse_int<T: TryFrom<i128>>(kind: CvType, text: &str) -> Result<T> {
    let err = || Error::parse(kind, text);
    let (negative, body) = super::scalar::split_sign(text);
    let magnitude = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
            u128::from_str_radix(hex, 16).map_err(|_| err())?
        }
        Some(_) => return Err(err()),
        None if !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()) => {
            body.parse::<u128>().map_err(|_| err())?
        }
        None => return Err(err()),
    };
    let magnitude = i128::try_from(magnitude).map_err(|_| err())?;
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).map_err(|_| err())
}

fn parse_bool(text: &str) -> Result<bool> {
    const TRUE: [&str; 2] = ["true", "on"];
    const FALSE: [&str; 2] = ["false", "off"];
    if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Ok(true)
    } else if FALSE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
        Ok(false)
    } else {
        Err(Error::parse(CvType::Bool, text))
    }
}

/// The empty text stands for an unset URL and is kept as is.
pub(crate) fn normalize_url(text: &str) -> Result<String> {
    if text.is_empty() {
        return Ok(String::new());
    }
    Ok(parse_url(text)?.into())
}

pub(crate) fn parse_url(text: &str) -> Result<url::Url> {
    url::Url::parse(text).map_err(|e| {
        tracing::debug!(error = %e, "url parse failed");
        Error::parse(CvType::Url, text)
    })
}

/// Only the hyphenated form is accepted.
fn parse_uuid(text: &str) -> Result<uuid::Uuid> {
    if text.len() != 36 {
        return Err(Error::parse(CvType::Uuid, text));
    }
    Uuid::try_parse(text).map_err(|_| Error::parse(CvType::Uuid, text))
}
