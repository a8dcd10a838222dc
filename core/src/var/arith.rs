//! Arithmetic between variables.
//!
//! Numeric operands are projected onto [`Number`], combined exactly, and the
//! result is formatted and re-parsed under the widened kind. Addition with a
//! string-like operand concatenates the two textual forms instead.

use core::fmt;
use core::str::FromStr;

use tracing::trace;

use super::CgVar;
use super::number::Number;
use super::scalar::Dec64;
use crate::error::{Error, Result};
use crate::kind::CvType;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    pub fn symbol(self) -> char {
        match self {
            ArithOp::Add => '+',
            ArithOp::Sub => '-',
            ArithOp::Mul => '*',
            ArithOp::Div => '/',
        }
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Number of fractional digits of a decimal64 quotient.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DivPrecision {
    /// Digits of the left operand.
    #[default]
    Dividend,
    /// Digits of the right operand.
    Divisor,
    /// The larger of the two.
    Max,
    /// A fixed count, clamped to 1..=18.
    Fixed(u8),
}

impl FromStr for DivPrecision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dividend" => Ok(DivPrecision::Dividend),
            "divisor" => Ok(DivPrecision::Divisor),
            "max" => Ok(DivPrecision::Max),
            other => other.parse::<u8>().map(DivPrecision::Fixed).map_err(|_| {
                Error::InvalidArgument(format!(
                    "division precision must be dividend, divisor, max or a digit count, got '{s}'"
                ))
            }),
        }
    }
}

impl fmt::Display for DivPrecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivPrecision::Dividend => f.write_str("dividend"),
            DivPrecision::Divisor => f.write_str("divisor"),
            DivPrecision::Max => f.write_str("max"),
            DivPrecision::Fixed(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ArithOptions {
    pub div_precision: DivPrecision,
}

/// Right-hand operand of an arithmetic operation.
///
/// Host primitives have no kind of their own and take the kind of the left
/// operand when the result kind is chosen.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a> {
    Var(&'a CgVar),
    Int(i64),
    Float(f64),
    Str(&'a str),
}

impl<'a> From<&'a CgVar> for Operand<'a> {
    fn from(var: &'a CgVar) -> Self {
        Operand::Var(var)
    }
}

impl From<i64> for Operand<'_> {
    fn from(v: i64) -> Self {
        Operand::Int(v)
    }
}

impl From<i32> for Operand<'_> {
    fn from(v: i32) -> Self {
        Operand::Int(i64::from(v))
    }
}

impl From<f64> for Operand<'_> {
    fn from(v: f64) -> Self {
        Operand::Float(v)
    }
}

impl<'a> From<&'a str> for Operand<'a> {
    fn from(v: &'a str) -> Self {
        Operand::Str(v)
    }
}

/// One operand resolved for dispatch.
struct Side {
    kind: CvType,
    /// Name used in error messages.
    label: &'static str,
    text: String,
    number: Option<Number>,
    /// Fractional digits contributed to a quotient.
    digits: Option<u8>,
    stringy: bool,
}

impl Side {
    fn of(var: &CgVar) -> Side {
        Side {
            kind: var.kind(),
            label: var.type2str(),
            text: var.to_string(),
            number: var.number(),
            digits: var.dec64_get().ok().map(Dec64::digits),
            stringy: var.is_string(),
        }
    }

    fn host(operand: Operand<'_>, lhs_kind: CvType) -> Result<Side> {
        let side = match operand {
            Operand::Var(var) => Side::of(var),
            Operand::Int(v) => Side {
                kind: lhs_kind,
                label: "int",
                text: v.to_string(),
                number: Some(Number::from(v)),
                digits: None,
                stringy: false,
            },
            Operand::Float(v) => {
                let number = Number::from_f64(v)?;
                Side {
                    kind: lhs_kind,
                    label: "float",
                    text: number.to_string(),
                    number: Some(number),
                    digits: None,
                    stringy: false,
                }
            }
            Operand::Str(s) => Side {
                kind: lhs_kind,
                label: "str",
                text: s.to_string(),
                number: None,
                digits: None,
                stringy: true,
            },
        };
        Ok(side)
    }
}

impl CgVar {
    /// `self + rhs` with default options.
    pub fn add<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<CgVar> {
        self.apply(ArithOp::Add, rhs.into(), &ArithOptions::default())
    }

    pub fn sub<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<CgVar> {
        self.apply(ArithOp::Sub, rhs.into(), &ArithOptions::default())
    }

    pub fn mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<CgVar> {
        self.apply(ArithOp::Mul, rhs.into(), &ArithOptions::default())
    }

    pub fn div<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<CgVar> {
        self.apply(ArithOp::Div, rhs.into(), &ArithOptions::default())
    }

    pub fn div_with<'a>(
        &self,
        rhs: impl Into<Operand<'a>>,
        options: &ArithOptions,
    ) -> Result<CgVar> {
        self.apply(ArithOp::Div, rhs.into(), options)
    }

    pub fn add_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<()> {
        self.apply_assign(ArithOp::Add, rhs.into(), &ArithOptions::default())
    }

    pub fn sub_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<()> {
        self.apply_assign(ArithOp::Sub, rhs.into(), &ArithOptions::default())
    }

    pub fn mul_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<()> {
        self.apply_assign(ArithOp::Mul, rhs.into(), &ArithOptions::default())
    }

    pub fn div_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<()> {
        self.apply_assign(ArithOp::Div, rhs.into(), &ArithOptions::default())
    }

    /// Compute `self op rhs`. The result is a new variable carrying the name
    /// of `self`.
    pub fn apply(&self, op: ArithOp, rhs: Operand<'_>, options: &ArithOptions) -> Result<CgVar> {
        let lhs = Side::of(self);
        let rhs = Side::host(rhs, lhs.kind)?;
        let widened = lhs.kind.widen(rhs.kind);
        trace!(%op, lhs = %lhs.kind, rhs = %rhs.kind, %widened, "arithmetic dispatch");

        let concat = op == ArithOp::Add
            && (lhs.stringy || (rhs.stringy && lhs.kind.is_numeric()));
        if concat {
            let kind = if lhs.kind.is_numeric() {
                CvType::String
            } else if widened.is_string() {
                widened
            } else {
                lhs.kind
            };
            let text = format!("{}{}", lhs.text, rhs.text);
            return match CgVar::with_text(kind, self.name(), &text) {
                Err(err) if kind != CvType::String => {
                    trace!(%kind, %err, "concatenation falls back to string");
                    CgVar::with_text(CvType::String, self.name(), &text)
                }
                result => result,
            };
        }

        let (Some(a), Some(b)) = (lhs.number, rhs.number) else {
            return Err(Error::UnsupportedOperation {
                op: op.symbol(),
                lhs: lhs.label.to_string(),
                rhs: rhs.label.to_string(),
            });
        };
        let overflow = || Error::Overflow { op: op.symbol() };
        let result = match op {
            ArithOp::Add => a.checked_add(b).ok_or_else(overflow)?,
            ArithOp::Sub => a.checked_sub(b).ok_or_else(overflow)?,
            ArithOp::Mul => a.checked_mul(b).ok_or_else(overflow)?,
            ArithOp::Div => a.checked_div(b, quotient_digits(widened, &lhs, &rhs, options))?,
        };
        let result = if widened.is_integer() {
            result.trim_to(0)
        } else if result.scale() == 0 {
            result.round_to(Dec64::MIN_DIGITS).ok_or_else(overflow)?
        } else if result.scale() > Dec64::MAX_DIGITS {
            fit_dec64(result).unwrap_or(result)
        } else {
            result
        };
        CgVar::with_text(widened, self.name(), &result.to_string())
    }

    /// In-place form of [`CgVar::apply`]. The receiver keeps its name and
    /// flags but may change kind; on failure it is unchanged.
    pub fn apply_assign(
        &mut self,
        op: ArithOp,
        rhs: Operand<'_>,
        options: &ArithOptions,
    ) -> Result<()> {
        let result = self.apply(op, rhs, options)?;
        *self = result.with_attributes_of(self);
        Ok(())
    }
}

/// Round an exact result half to even onto the most fractional digits a
/// decimal64 can hold at its magnitude.
fn fit_dec64(result: Number) -> Option<Number> {
    (Dec64::MIN_DIGITS..=Dec64::MAX_DIGITS.min(result.scale()))
        .rev()
        .filter_map(|digits| result.round_to(digits))
        .find(|rounded| i64::try_from(rounded.mantissa()).is_ok())
}

fn quotient_digits(kind: CvType, lhs: &Side, rhs: &Side, options: &ArithOptions) -> u8 {
    if kind.is_integer() {
        return 0;
    }
    let digits = match options.div_precision {
        DivPrecision::Dividend => lhs.digits,
        DivPrecision::Divisor => rhs.digits,
        DivPrecision::Max => lhs.digits.max(rhs.digits),
        DivPrecision::Fixed(n) => Some(n),
    };
    digits
        .unwrap_or(Dec64::MIN_DIGITS)
        .clamp(Dec64::MIN_DIGITS, Dec64::MAX_DIGITS)
}

#[cfg(test)]
#[path = "arith_test.rs"]
mod arith_test;
