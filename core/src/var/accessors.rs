//! Typed getters and setters.
//!
//! Each accessor checks the kind of the variable and fails with
//! [`Error::TypeMismatch`] instead of returning a default.

use std::net::{Ipv4Addr, Ipv6Addr};

use uuid::Uuid;

use super::scalar::{Dec64, Ipv4Prefix, Ipv6Prefix, MacAddr, TimeSpec, Timestamp};
use super::value::{normalize_url, parse_url};
use super::{CgVar, Value};
use crate::error::{Error, Result};
use crate::kind::CvType;

macro_rules! copy_accessors {
    ($($get:ident, $set:ident, $variant:ident, $ty:ty;)*) => {
        impl CgVar {
            $(
                pub fn $get(&self) -> Result<$ty> {
                    match self.value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(self.type_mismatch(CvType::$variant)),
                    }
                }

                pub fn $set(&mut self, v: $ty) -> Result<()> {
                    match &mut self.value {
                        Value::$variant(slot) => {
                            *slot = v;
                            Ok(())
                        }
                        _ => Err(self.type_mismatch(CvType::$variant)),
                    }
                }
            )*
        }
    };
}

copy_accessors! {
    int8_get, int8_set, Int8, i8;
    int16_get, int16_set, Int16, i16;
    int32_get, int32_set, Int32, i32;
    int64_get, int64_set, Int64, i64;
    uint8_get, uint8_set, Uint8, u8;
    uint16_get, uint16_set, Uint16, u16;
    uint32_get, uint32_set, Uint32, u32;
    uint64_get, uint64_set, Uint64, u64;
    dec64_get, dec64_set, Dec64, Dec64;
    bool_get, bool_set, Bool, bool;
    ipv4prefix_get, ipv4prefix_set, Ipv4Pfx, Ipv4Prefix;
    ipv6prefix_get, ipv6prefix_set, Ipv6Pfx, Ipv6Prefix;
    mac_get, mac_set, MacAddr, MacAddr;
    uuid_get, uuid_set, Uuid, Uuid;
    timestamp_get, timestamp_set, Time, Timestamp;
}

macro_rules! text_accessors {
    ($($get:ident, $set:ident, $variant:ident;)*) => {
        impl CgVar {
            $(
                pub fn $get(&self) -> Result<&str> {
                    match &self.value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(self.type_mismatch(CvType::$variant)),
                    }
                }

                pub fn $set(&mut self, v: impl Into<String>) -> Result<()> {
                    match &mut self.value {
                        Value::$variant(slot) => {
                            *slot = v.into();
                            Ok(())
                        }
                        _ => Err(self.type_mismatch(CvType::$variant)),
                    }
                }
            )*
        }
    };
}

text_accessors! {
    string_get, string_set, String;
    rest_get, rest_set, Rest;
    interface_get, interface_set, Interface;
}

// IPv4 and IPv6 address accessors read both the address and the prefix
// kind; an address is a host prefix.
macro_rules! addr_accessors {
    (
        $addr_get:ident, $addr_set:ident, $masklen_get:ident,
        $addr_variant:ident, $pfx_variant:ident, $addr:ty, $pfx:ty
    ) => {
        impl CgVar {
            pub fn $addr_get(&self) -> Result<$addr> {
                match self.value {
                    Value::$addr_variant(addr) => Ok(addr),
                    Value::$pfx_variant(pfx) => Ok(pfx.addr()),
                    _ => Err(self.type_mismatch(CvType::$addr_variant)),
                }
            }

            /// Set the address. A prefix keeps its mask length.
            pub fn $addr_set(&mut self, addr: $addr) -> Result<()> {
                match &mut self.value {
                    Value::$addr_variant(slot) => *slot = addr,
                    Value::$pfx_variant(pfx) => *pfx = <$pfx>::new(addr, pfx.masklen())?,
                    _ => return Err(self.type_mismatch(CvType::$addr_variant)),
                }
                Ok(())
            }

            pub fn $masklen_get(&self) -> Result<u8> {
                match self.value {
                    Value::$addr_variant(_) => Ok(<$pfx>::MAX_LEN),
                    Value::$pfx_variant(pfx) => Ok(pfx.masklen()),
                    _ => Err(self.type_mismatch(CvType::$pfx_variant)),
                }
            }
        }
    };
}

addr_accessors!(
    ipv4addr_get,
    ipv4addr_set,
    ipv4masklen_get,
    Ipv4Addr,
    Ipv4Pfx,
    Ipv4Addr,
    Ipv4Prefix
);

addr_accessors!(
    ipv6addr_get,
    ipv6addr_set,
    ipv6masklen_get,
    Ipv6Addr,
    Ipv6Pfx,
    Ipv6Addr,
    Ipv6Prefix
);

impl CgVar {
    /// Compatibility alias of [`CgVar::int32_get`].
    pub fn int_get(&self) -> Result<i32> {
        self.int32_get()
    }

    pub fn int_set(&mut self, v: i32) -> Result<()> {
        self.int32_set(v)
    }

    /// Compatibility alias of [`CgVar::int64_get`].
    pub fn long_get(&self) -> Result<i64> {
        self.int64_get()
    }

    pub fn long_set(&mut self, v: i64) -> Result<()> {
        self.int64_set(v)
    }

    /// Number of fractional digits of a decimal64.
    pub fn dec64_n_get(&self) -> Result<u8> {
        self.dec64_get().map(Dec64::digits)
    }

    /// Change the number of fractional digits of a decimal64, rounding half
    /// to even when digits are dropped.
    pub fn dec64_n_set(&mut self, digits: u8) -> Result<()> {
        let rescaled = self.dec64_get()?.rescale(digits)?;
        self.dec64_set(rescaled)
    }

    /// Seconds since the epoch.
    pub fn time_get(&self) -> Result<f64> {
        self.timestamp_get().map(Timestamp::as_f64)
    }

    /// Set a time from float seconds or from text in the time grammar.
    pub fn time_set<'a>(&mut self, time: impl Into<TimeSpec<'a>>) -> Result<()> {
        // Check the kind before looking at the input.
        self.timestamp_get()?;
        let timestamp = match time.into() {
            TimeSpec::Seconds(secs) => Timestamp::from_f64(secs)?,
            TimeSpec::Text(text) => text.parse()?,
        };
        self.timestamp_set(timestamp)
    }

    /// The URL, decomposed into its components. `None` when unset.
    pub fn url_get(&self) -> Result<Option<url::Url>> {
        match &self.value {
            Value::Url(text) if text.is_empty() => Ok(None),
            Value::Url(text) => parse_url(text).map(Some),
            _ => Err(self.type_mismatch(CvType::Url)),
        }
    }

    /// Parse and store a URL in normalized form. The empty text unsets it.
    pub fn url_set(&mut self, text: &str) -> Result<()> {
        match &mut self.value {
            Value::Url(slot) => {
                *slot = normalize_url(text)?;
                Ok(())
            }
            _ => Err(self.type_mismatch(CvType::Url)),
        }
    }

    /// The raw text of any string-like kind, URLs included.
    pub fn text_get(&self) -> Result<&str> {
        match &self.value {
            Value::String(s) | Value::Rest(s) | Value::Interface(s) | Value::Url(s) => Ok(s),
            _ => Err(Error::mismatch("string-like type", self.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integer_accessors() {
        let mut var = CgVar::new(CvType::Int16);
        var.int16_set(-300).unwrap();
        assert_eq!(var.int16_get().unwrap(), -300);
        assert_eq!(var.to_string(), "-300");
        assert_eq!(
            var.int8_get().unwrap_err(),
            Error::TypeMismatch {
                expected: "int8",
                found: CvType::Int16
            }
        );
    }

    #[test]
    fn test_compat_aliases() {
        let mut int = CgVar::new(CvType::Int32);
        int.int_set(7).unwrap();
        assert_eq!(int.int32_get().unwrap(), 7);
        let mut long = CgVar::new(CvType::Int64);
        long.long_set(-7).unwrap();
        assert_eq!(long.long_get().unwrap(), -7);
        assert!(long.int_get().is_err());
    }

    #[test]
    fn test_dec64_digits() {
        let mut var = CgVar::with_text(CvType::Dec64, None, "3.14159").unwrap();
        assert_eq!(var.dec64_n_get().unwrap(), 5);
        var.dec64_n_set(2).unwrap();
        assert_eq!(var.to_string(), "3.14");
        var.dec64_n_set(4).unwrap();
        assert_eq!(var.to_string(), "3.1400");
        assert!(var.dec64_n_set(0).is_err());
        assert!(var.dec64_n_set(19).is_err());
    }

    #[test]
    fn test_ipv4_address_and_prefix() {
        let addr = CgVar::with_text(CvType::Ipv4Addr, None, "10.0.0.1").unwrap();
        assert_eq!(addr.ipv4addr_get().unwrap(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(addr.ipv4masklen_get().unwrap(), 32);

        let mut pfx = CgVar::with_text(CvType::Ipv4Pfx, None, "192.0.2.0/24").unwrap();
        assert_eq!(pfx.ipv4addr_get().unwrap(), Ipv4Addr::new(192, 0, 2, 0));
        assert_eq!(pfx.ipv4masklen_get().unwrap(), 24);
        pfx.ipv4addr_set(Ipv4Addr::new(198, 51, 100, 0)).unwrap();
        assert_eq!(pfx.to_string(), "198.51.100.0/24");

        assert!(addr.ipv4prefix_get().is_err());
    }

    #[test]
    fn test_ipv4_accessor_on_string_fails() {
        let var = CgVar::with_text(CvType::String, None, "10.0.0.1").unwrap();
        assert!(matches!(
            var.ipv4addr_get(),
            Err(Error::TypeMismatch {
                found: CvType::String,
                ..
            })
        ));
    }

    #[test]
    fn test_ipv6_accessors() {
        let pfx = CgVar::with_text(CvType::Ipv6Pfx, None, "2001:db8::/32").unwrap();
        assert_eq!(pfx.ipv6masklen_get().unwrap(), 32);
        assert_eq!(
            pfx.ipv6addr_get().unwrap(),
            "2001:db8::".parse::<Ipv6Addr>().unwrap()
        );
        let addr = CgVar::new(CvType::Ipv6Addr);
        assert_eq!(addr.ipv6masklen_get().unwrap(), 128);
    }

    #[test]
    fn test_text_accessors() {
        let mut var = CgVar::new(CvType::Interface);
        var.interface_set("eth0").unwrap();
        assert_eq!(var.interface_get().unwrap(), "eth0");
        assert_eq!(var.text_get().unwrap(), "eth0");
        assert!(var.string_get().is_err());
        assert!(CgVar::new(CvType::Bool).text_get().is_err());
    }

    #[test]
    fn test_time_accessors() {
        let mut var = CgVar::new(CvType::Time);
        var.time_set(1.5).unwrap();
        assert_eq!(var.to_string(), "1.500000");
        assert_eq!(var.time_get().unwrap(), 1.5);
        var.time_set("1970-01-02T00:00:00Z").unwrap();
        assert_eq!(var.timestamp_get().unwrap().secs(), 86_400);
        assert!(var.time_set("yesterday").is_err());
        assert_eq!(var.timestamp_get().unwrap().secs(), 86_400);
        assert!(CgVar::new(CvType::String).time_set(1.0).is_err());
    }

    #[test]
    fn test_url_accessors() {
        let mut var = CgVar::new(CvType::Url);
        assert_eq!(var.url_get().unwrap(), None);
        var.url_set("HTTPS://Example.com/a/b?q=1").unwrap();
        assert_eq!(var.to_string(), "https://example.com/a/b?q=1");
        let url = var.url_get().unwrap().unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a/b");
        assert_eq!(url.query(), Some("q=1"));
        assert!(var.url_set("not a url").is_err());
        assert_eq!(var.to_string(), "https://example.com/a/b?q=1");

        var.url_set("").unwrap();
        assert_eq!(var.url_get().unwrap(), None);
        assert!(CgVar::new(CvType::String).url_get().is_err());
    }

    #[test]
    fn test_mac_and_uuid() {
        let mut mac = CgVar::new(CvType::MacAddr);
        mac.mac_set(MacAddr::new([0, 0x1b, 0x21, 0x3a, 0x4f, 0x9c])).unwrap();
        assert_eq!(mac.to_string(), "00:1b:21:3a:4f:9c");

        let mut id = CgVar::new(CvType::Uuid);
        assert_eq!(id.uuid_get().unwrap(), Uuid::nil());
        let fresh = Uuid::from_u128(0x1234);
        id.uuid_set(fresh).unwrap();
        assert_eq!(id.uuid_get().unwrap(), fresh);
    }
}
