//! The CLIgen variable: a named, tagged value.
//!
//! A [`CgVar`] holds exactly one [`Value`]; its kind is the kind of that
//! value, so a variable can never carry a stale representation of another
//! kind. Text is the lingua franca: every kind parses from and formats to a
//! canonical textual form, and cross-kind arithmetic goes through it.

pub mod accessors;
pub mod arith;
mod cmp;
pub mod number;
pub mod scalar;
mod value;

use core::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use value::Value;

use crate::error::{Error, Result};
use crate::kind::CvType;
use number::Number;

/// A CLIgen variable.
///
/// Cloning is a deep copy; the clone has an independent lifetime.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "CgVarRepr", into = "CgVarRepr")]
pub struct CgVar {
    name: Option<String>,
    value: Value,
    is_const: bool,
    flags: u8,
}

impl CgVar {
    /// An unnamed variable holding the zero value of `kind`.
    pub fn new(kind: CvType) -> CgVar {
        CgVar::from_value(Value::zero(kind))
    }

    pub fn named(kind: CvType, name: impl Into<String>) -> CgVar {
        let mut var = CgVar::new(kind);
        var.name = Some(name.into());
        var
    }

    /// A variable of `kind` whose value is parsed from `text`.
    pub fn with_text(kind: CvType, name: Option<&str>, text: &str) -> Result<CgVar> {
        let mut var = CgVar::from_value(Value::parse(kind, text)?);
        var.name = name.map(str::to_string);
        Ok(var)
    }

    /// An unnamed zero variable of the kind with numeric type `code`.
    pub fn from_code(code: u8) -> Result<CgVar> {
        Ok(CgVar::new(CvType::from_code(code)?))
    }

    pub fn from_value(value: Value) -> CgVar {
        CgVar {
            name: None,
            value,
            is_const: false,
            flags: 0,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Remove and return the name.
    pub fn take_name(&mut self) -> Option<String> {
        self.name.take()
    }

    pub fn kind(&self) -> CvType {
        self.value.kind()
    }

    /// Change the kind. The value is reset to the zero value of the new kind;
    /// the name and flags are kept.
    pub fn set_kind(&mut self, kind: CvType) {
        if kind != self.kind() {
            debug!(from = %self.kind(), to = %kind, name = ?self.name, "re-kinding variable");
        }
        self.value = Value::zero(kind);
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replace the value with `value`, adopting its kind.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Parse `text` under the current kind. On failure the variable is left
    /// unchanged.
    pub fn parse(&mut self, text: &str) -> Result<()> {
        match Value::parse(self.kind(), text) {
            Ok(value) => {
                self.value = value;
                Ok(())
            }
            Err(err) => {
                debug!(kind = %self.kind(), %text, "parse failed");
                Err(err)
            }
        }
    }

    /// Canonical name of the kind, e.g. `"ipv4addr"`.
    pub fn type2str(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    pub fn is_string(&self) -> bool {
        self.kind().is_string()
    }

    /// Exact numeric value of an integer or decimal64 variable.
    pub fn number(&self) -> Option<Number> {
        self.value.number()
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn set_const(&mut self, is_const: bool) {
        self.is_const = is_const;
    }

    /// The bits of `mask` that are set.
    pub fn flag(&self, mask: u8) -> u8 {
        self.flags & mask
    }

    pub fn flag_set(&mut self, mask: u8) {
        self.flags |= mask;
    }

    pub fn flag_clr(&mut self, mask: u8) {
        self.flags &= !mask;
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Copy the name, const marker and flags of `other`.
    pub(crate) fn with_attributes_of(mut self, other: &CgVar) -> CgVar {
        self.name.clone_from(&other.name);
        self.is_const = other.is_const;
        self.flags = other.flags;
        self
    }

    pub(crate) fn type_mismatch(&self, expected: CvType) -> Error {
        Error::mismatch(expected.as_str(), self.kind())
    }
}

impl Default for CgVar {
    /// An unnamed empty string.
    fn default() -> Self {
        CgVar::new(CvType::String)
    }
}

impl From<Value> for CgVar {
    fn from(value: Value) -> Self {
        CgVar::from_value(value)
    }
}

impl From<CvType> for CgVar {
    fn from(kind: CvType) -> Self {
        CgVar::new(kind)
    }
}

impl fmt::Display for CgVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Wire form of a variable.
#[derive(Serialize, Deserialize)]
struct CgVarRepr {
    name: Option<String>,
    #[serde(rename = "type")]
    kind: CvType,
    value: String,
}

impl From<CgVar> for CgVarRepr {
    fn from(var: CgVar) -> Self {
        CgVarRepr {
            kind: var.kind(),
            value: var.to_string(),
            name: var.name,
        }
    }
}

impl TryFrom<CgVarRepr> for CgVar {
    type Error = Error;

    fn try_from(repr: CgVarRepr) -> Result<Self> {
        CgVar::with_text(repr.kind, repr.name.as_deref(), &repr.value)
    }
}
