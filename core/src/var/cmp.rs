//! Ordering, equality and hashing of variables.
//!
//! Numeric kinds compare by magnitude, string-like kinds by text, and two
//! variables of the same kind by the natural order of that kind. Everything
//! else compares the textual forms. Ties are always broken on the text, so
//! equal variables have equal text and therefore equal hashes.
//!
//! The text fallback is not transitive across kinds, which is why there is
//! no `Ord` implementation.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use super::{CgVar, Value};

impl CgVar {
    /// Three-way comparison of two variables, ignoring names.
    pub fn compare(&self, other: &CgVar) -> Ordering {
        let text = || self.to_string().cmp(&other.to_string());
        match (self.number(), other.number()) {
            (Some(a), Some(b)) => return a.cmp(&b).then_with(text),
            _ if self.is_string() && other.is_string() => return text(),
            _ => {}
        }
        let natural = match (&self.value, &other.value) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Ipv4Addr(a), Value::Ipv4Addr(b)) => a.cmp(b),
            (Value::Ipv4Pfx(a), Value::Ipv4Pfx(b)) => a.cmp(b),
            (Value::Ipv6Addr(a), Value::Ipv6Addr(b)) => a.cmp(b),
            (Value::Ipv6Pfx(a), Value::Ipv6Pfx(b)) => a.cmp(b),
            (Value::MacAddr(a), Value::MacAddr(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Time(a), Value::Time(b)) => a.cmp(b),
            _ => Ordering::Equal,
        };
        natural.then_with(text)
    }
}

impl PartialEq for CgVar {
    fn eq(&self, other: &CgVar) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for CgVar {}

impl PartialOrd for CgVar {
    fn partial_cmp(&self, other: &CgVar) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Hash for CgVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}
