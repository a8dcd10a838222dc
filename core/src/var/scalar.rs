//! Scalar payloads that have no direct standard library counterpart.
//!
//! Each type parses from and formats to the canonical text of its kind, so
//! `text.parse::<T>()?.to_string()` is stable after the first round.

use core::fmt;
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::number::Number;
use crate::error::{Error, Result};
use crate::kind::CvType;

// ============================================================================
// Decimal64
// ============================================================================

/// Fixed-point decimal: `mantissa / 10^digits`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dec64 {
    mantissa: i64,
    digits: u8,
}

impl Dec64 {
    pub const MIN_DIGITS: u8 = 1;
    pub const MAX_DIGITS: u8 = 18;

    pub const ZERO: Dec64 = Dec64 {
        mantissa: 0,
        digits: 1,
    };

    pub fn new(mantissa: i64, digits: u8) -> Result<Dec64> {
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits) {
            return Err(Error::InvalidArgument(format!(
                "decimal64 fraction digits must be in {}..={}, got {digits}",
                Self::MIN_DIGITS,
                Self::MAX_DIGITS
            )));
        }
        Ok(Dec64 { mantissa, digits })
    }

    pub fn mantissa(self) -> i64 {
        self.mantissa
    }

    /// Number of fractional digits.
    pub fn digits(self) -> u8 {
        self.digits
    }

    /// Round (half to even) or pad to `digits` fractional digits.
    pub fn rescale(self, digits: u8) -> Result<Dec64> {
        let rounded = Number::from(self)
            .round_to(digits)
            .ok_or_else(|| {
                Error::InvalidArgument(format!("cannot rescale {self} to {digits} digits"))
            })?;
        let mantissa = i64::try_from(rounded.mantissa())
            .map_err(|_| Error::parse(CvType::Dec64, &rounded.to_string()))?;
        Dec64::new(mantissa, digits)
    }

    pub fn to_f64(self) -> f64 {
        Number::from(self).to_f64()
    }
}

impl Default for Dec64 {
    fn default() -> Self {
        Dec64::ZERO
    }
}

impl FromStr for Dec64 {
    type Err = Error;

    /// The fraction digit count comes from the text; `"5"` has one digit.
    fn from_str(s: &str) -> Result<Dec64> {
        let err = || Error::parse(CvType::Dec64, s);
        let (negative, body) = split_sign(s);
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        if body.contains('.') && frac_part.is_empty() {
            return Err(err());
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::parse_at(CvType::Dec64, s, frac_part));
        }
        if frac_part.len() > Self::MAX_DIGITS as usize {
            return Err(Error::parse_at(CvType::Dec64, s, frac_part));
        }
        let digits = frac_part.len().max(1) as u8;
        let padded = format!("{int_part}{frac_part:0<width$}", width = digits as usize);
        let magnitude: i128 = padded.parse().map_err(|_| err())?;
        let signed = if negative { -magnitude } else { magnitude };
        let mantissa = i64::try_from(signed).map_err(|_| err())?;
        Ok(Dec64 { mantissa, digits })
    }
}

impl fmt::Display for Dec64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Number::from(*self).fmt(f)
    }
}

// ============================================================================
// IP prefixes
// ============================================================================

macro_rules! ip_prefix {
    ($(#[$doc:meta])* $name:ident, $addr:ty, $unspecified:expr, $max:expr, $kind:expr) => {
        $(#[$doc])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            addr: $addr,
            len: u8,
        }

        impl $name {
            pub const MAX_LEN: u8 = $max;

            pub fn new(addr: $addr, len: u8) -> Result<Self> {
                if len > Self::MAX_LEN {
                    return Err(Error::InvalidArgument(format!(
                        "mask length {len} exceeds {}",
                        Self::MAX_LEN
                    )));
                }
                Ok(Self { addr, len })
            }

            /// A host prefix covering exactly `addr`.
            pub fn host(addr: $addr) -> Self {
                Self {
                    addr,
                    len: Self::MAX_LEN,
                }
            }

            pub fn addr(self) -> $addr {
                self.addr
            }

            pub fn masklen(self) -> u8 {
                self.len
            }
        }

        /// The unspecified address with mask length 0.
        impl Default for $name {
            fn default() -> Self {
                Self {
                    addr: $unspecified,
                    len: 0,
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                let Some((addr, len)) = s.split_once('/') else {
                    return Err(Error::parse(($kind), s));
                };
                let addr = addr
                    .parse::<$addr>()
                    .map_err(|_| Error::parse_at(($kind), s, addr))?;
                let len = match len.parse::<u8>() {
                    Ok(n) if n <= Self::MAX_LEN && !len.starts_with('+') => n,
                    _ => return Err(Error::parse_at(($kind), s, len)),
                };
                Ok(Self { addr, len })
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}/{}", self.addr, self.len)
            }
        }
    };
}

ip_prefix!(
    /// IPv4 address with a mask length.
    Ipv4Prefix,
    Ipv4Addr,
    Ipv4Addr::UNSPECIFIED,
    32,
    CvType::Ipv4Pfx
);

ip_prefix!(
    /// IPv6 address with a mask length.
    Ipv6Prefix,
    Ipv6Addr,
    Ipv6Addr::UNSPECIFIED,
    128,
    CvType::Ipv6Pfx
);

// ============================================================================
// MAC address
// ============================================================================

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub fn new(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    pub fn octets(self) -> [u8; 6] {
        self.0
    }

    /// The address as a 48-bit integer, first octet most significant.
    pub fn to_u64(self) -> u64 {
        self.0.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    }
}

impl FromStr for MacAddr {
    type Err = Error;

    fn from_str(s: &str) -> Result<MacAddr> {
        let mut octets = [0u8; 6];
        let mut parts = s.split(':');
        for octet in octets.iter_mut() {
            let part = parts
                .next()
                .ok_or_else(|| Error::parse(CvType::MacAddr, s))?;
            let valid = (1..=2).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_hexdigit());
            if !valid {
                return Err(Error::parse_at(CvType::MacAddr, s, part));
            }
            *octet = u8::from_str_radix(part, 16)
                .map_err(|_| Error::parse_at(CvType::MacAddr, s, part))?;
        }
        if let Some(extra) = parts.next() {
            return Err(Error::parse_at(CvType::MacAddr, s, extra));
        }
        Ok(MacAddr(octets))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

// ============================================================================
// Time
// ============================================================================

const MICROS_PER_SEC: i128 = 1_000_000;

/// Seconds and microseconds since the Unix epoch (UTC).
///
/// `usecs` is always in `0..1_000_000`; negative times borrow from `secs`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    secs: i64,
    usecs: u32,
}

impl Timestamp {
    pub fn new(secs: i64, usecs: u32) -> Result<Timestamp> {
        if i128::from(usecs) >= MICROS_PER_SEC {
            return Err(Error::InvalidArgument(format!(
                "microseconds must be below 1000000, got {usecs}"
            )));
        }
        Ok(Timestamp { secs, usecs })
    }

    pub fn secs(self) -> i64 {
        self.secs
    }

    pub fn usecs(self) -> u32 {
        self.usecs
    }

    /// Seconds since the epoch as a float.
    pub fn as_f64(self) -> f64 {
        self.secs as f64 + f64::from(self.usecs) / 1e6
    }

    /// Convert float seconds, rounding to the nearest microsecond.
    pub fn from_f64(secs: f64) -> Result<Timestamp> {
        if !secs.is_finite() {
            return Err(Error::InvalidArgument(format!("invalid time {secs}")));
        }
        let micros = (secs * 1e6).round();
        if micros.abs() >= i64::MAX as f64 {
            return Err(Error::InvalidArgument(format!("time {secs} out of range")));
        }
        Timestamp::from_micros(micros as i128)
            .ok_or_else(|| Error::InvalidArgument(format!("time {secs} out of range")))
    }

    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.secs, self.usecs * 1000)
    }

    fn from_micros(total: i128) -> Option<Timestamp> {
        let secs = i64::try_from(total.div_euclid(MICROS_PER_SEC)).ok()?;
        let usecs = total.rem_euclid(MICROS_PER_SEC) as u32;
        Some(Timestamp { secs, usecs })
    }

    fn total_micros(self) -> i128 {
        i128::from(self.secs) * MICROS_PER_SEC + i128::from(self.usecs)
    }

    fn from_epoch_text(s: &str) -> Option<Timestamp> {
        let (negative, body) = split_sign(s);
        let (secs, frac) = body.split_once('.').unwrap_or((body, ""));
        let digits_only = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if secs.is_empty() || !digits_only(secs) || !digits_only(frac) || frac.len() > 6 {
            return None;
        }
        if body.contains('.') && frac.is_empty() {
            return None;
        }
        let secs: i128 = secs.parse().ok()?;
        let frac: i128 = format!("{frac:0<6}").parse().ok()?;
        let total = secs.checked_mul(MICROS_PER_SEC)?.checked_add(frac)?;
        Timestamp::from_micros(if negative { -total } else { total })
    }

    fn from_date_text(s: &str) -> Option<Timestamp> {
        let datetime = DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                    .or_else(|| {
                        NaiveDate::parse_from_str(s, "%Y-%m-%d")
                            .ok()
                            .and_then(|d| d.and_hms_opt(0, 0, 0))
                    })
                    .map(|naive| naive.and_utc())
            })?;
        Timestamp::new(datetime.timestamp(), datetime.timestamp_subsec_micros()).ok()
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Timestamp> {
        Timestamp::from_epoch_text(s)
            .or_else(|| Timestamp::from_date_text(s))
            .ok_or_else(|| Error::parse(CvType::Time, s))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_micros();
        let sign = if total < 0 { "-" } else { "" };
        let abs = total.unsigned_abs();
        let micros = MICROS_PER_SEC as u128;
        write!(f, "{sign}{}.{:06}", abs / micros, abs % micros)
    }
}

/// Input accepted by [`CgVar::time_set`](crate::CgVar::time_set).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimeSpec<'a> {
    /// Seconds since the epoch.
    Seconds(f64),
    /// Text parsed with the time grammar.
    Text(&'a str),
}

impl From<f64> for TimeSpec<'_> {
    fn from(secs: f64) -> Self {
        TimeSpec::Seconds(secs)
    }
}

impl From<i64> for TimeSpec<'_> {
    fn from(secs: i64) -> Self {
        TimeSpec::Seconds(secs as f64)
    }
}

impl<'a> From<&'a str> for TimeSpec<'a> {
    fn from(text: &'a str) -> Self {
        TimeSpec::Text(text)
    }
}

/// Split an optional leading sign.
pub(crate) fn split_sign(s: &str) -> (bool, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (false, rest)
    } else {
        (false, s)
    }
}
