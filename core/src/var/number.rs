//! Exact numeric projection of numeric variables.
//!
//! Every integer kind and decimal64 maps losslessly onto [`Number`], a
//! 128-bit mantissa with a decimal scale. Arithmetic between variables of
//! different kinds happens here and is converted back to text afterwards.

use core::cmp::Ordering;
use core::fmt;

use super::scalar::{Dec64, split_sign};
use crate::error::{Error, Result};

/// Largest scale a [`Number`] may carry.
const MAX_SCALE: u8 = 38;

/// `mantissa / 10^scale`.
#[derive(Copy, Clone, Debug)]
pub struct Number {
    mantissa: i128,
    scale: u8,
}

fn pow10(exp: u8) -> Option<i128> {
    10i128.checked_pow(u32::from(exp))
}

/// Divide rounding half to even.
fn div_half_even(num: i128, den: i128) -> i128 {
    let quot = num / den;
    let rem = (num % den).unsigned_abs();
    if rem == 0 {
        return quot;
    }
    let step = if (num < 0) != (den < 0) { -1 } else { 1 };
    let den = den.unsigned_abs();
    match rem.cmp(&(den - rem)) {
        Ordering::Less => quot,
        Ordering::Greater => quot + step,
        Ordering::Equal if quot % 2 == 0 => quot,
        Ordering::Equal => quot + step,
    }
}

impl Number {
    pub fn new(mantissa: i128, scale: u8) -> Number {
        Number { mantissa, scale }
    }

    pub fn int(value: i128) -> Number {
        Number::new(value, 0)
    }

    pub fn mantissa(self) -> i128 {
        self.mantissa
    }

    pub fn scale(self) -> u8 {
        self.scale
    }

    pub fn is_zero(self) -> bool {
        self.mantissa == 0
    }

    pub fn to_f64(self) -> f64 {
        self.mantissa as f64 / 10f64.powi(i32::from(self.scale))
    }

    /// Parse plain decimal text such as `-12`, `3.250` or `+0.5`.
    pub fn parse(text: &str) -> Option<Number> {
        let (negative, body) = split_sign(text);
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        let digits_only = |t: &str| t.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() || !digits_only(int_part) || !digits_only(frac_part) {
            return None;
        }
        if body.contains('.') && frac_part.is_empty() {
            return None;
        }
        let scale = u8::try_from(frac_part.len()).ok().filter(|s| *s <= MAX_SCALE)?;
        let magnitude: i128 = format!("{int_part}{frac_part}").parse().ok()?;
        Some(Number::new(if negative { -magnitude } else { magnitude }, scale))
    }

    /// Exact conversion of a finite float through its shortest text form.
    pub fn from_f64(value: f64) -> Result<Number> {
        if !value.is_finite() {
            return Err(Error::InvalidArgument(format!("not a finite number: {value}")));
        }
        Number::parse(&value.to_string())
            .ok_or_else(|| Error::InvalidArgument(format!("number out of range: {value}")))
    }

    /// Mantissa at a larger scale.
    fn mantissa_at(self, scale: u8) -> Option<i128> {
        debug_assert!(scale >= self.scale);
        self.mantissa.checked_mul(pow10(scale - self.scale)?)
    }

    fn aligned(self, other: Number) -> Option<(i128, i128, u8)> {
        let scale = self.scale.max(other.scale);
        Some((self.mantissa_at(scale)?, other.mantissa_at(scale)?, scale))
    }

    pub fn checked_add(self, other: Number) -> Option<Number> {
        let (a, b, scale) = self.aligned(other)?;
        Some(Number::new(a.checked_add(b)?, scale))
    }

    pub fn checked_sub(self, other: Number) -> Option<Number> {
        let (a, b, scale) = self.aligned(other)?;
        Some(Number::new(a.checked_sub(b)?, scale))
    }

    /// Exact product, trimmed back to the larger operand scale where that
    /// loses nothing.
    pub fn checked_mul(self, other: Number) -> Option<Number> {
        let scale = self.scale.checked_add(other.scale)?;
        if scale > MAX_SCALE {
            return None;
        }
        let product = Number::new(self.mantissa.checked_mul(other.mantissa)?, scale);
        Some(product.trim_to(self.scale.max(other.scale)))
    }

    /// Quotient rounded half to even to `scale` fractional digits.
    pub fn checked_div(self, other: Number, scale: u8) -> Result<Number> {
        if other.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let overflow = Error::Overflow { op: '/' };
        // self / other = (m1 * 10^(s2 + scale)) / (m2 * 10^s1) at `scale`.
        let num = pow10(other.scale + scale)
            .and_then(|p| self.mantissa.checked_mul(p))
            .ok_or_else(|| overflow.clone())?;
        let den = pow10(self.scale)
            .and_then(|p| other.mantissa.checked_mul(p))
            .ok_or(overflow)?;
        Ok(Number::new(div_half_even(num, den), scale))
    }

    /// Round half to even (or pad) to exactly `scale` fractional digits.
    pub fn round_to(self, scale: u8) -> Option<Number> {
        match scale.cmp(&self.scale) {
            Ordering::Equal => Some(self),
            Ordering::Greater => Some(Number::new(self.mantissa_at(scale)?, scale)),
            Ordering::Less => {
                let den = pow10(self.scale - scale)?;
                Some(Number::new(div_half_even(self.mantissa, den), scale))
            }
        }
    }

    /// Drop trailing fractional zeros, keeping at least `min_scale` digits.
    pub fn trim_to(mut self, min_scale: u8) -> Number {
        while self.scale > min_scale && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.scale -= 1;
        }
        self
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Number {
        Number::int(i128::from(value))
    }
}

impl From<u64> for Number {
    fn from(value: u64) -> Number {
        Number::int(i128::from(value))
    }
}

impl From<Dec64> for Number {
    fn from(value: Dec64) -> Number {
        Number::new(i128::from(value.mantissa()), value.digits())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Number) -> Ordering {
        match self.aligned(*other) {
            Some((a, b, _)) => a.cmp(&b),
            None => self.to_f64().total_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa < 0 { "-" } else { "" };
        let abs = self.mantissa.unsigned_abs();
        if self.scale == 0 {
            return write!(f, "{sign}{abs}");
        }
        let den = 10u128.pow(u32::from(self.scale));
        write!(
            f,
            "{sign}{}.{:0width$}",
            abs / den,
            abs % den,
            width = self.scale as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(text: &str) -> Number {
        Number::parse(text).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(num("-12").to_string(), "-12");
        assert_eq!(num("3.250").to_string(), "3.250");
        assert_eq!(num("+0.5").to_string(), "0.5");
        assert_eq!(num("-0.05").to_string(), "-0.05");
        assert!(Number::parse("1.").is_none());
        assert!(Number::parse(".5").is_none());
        assert!(Number::parse("1e3").is_none());
    }

    #[test]
    fn test_add_aligns_scale() {
        assert_eq!(num("1.50").checked_add(num("1")).unwrap().to_string(), "2.50");
        assert_eq!(num("5").checked_sub(num("7")).unwrap().to_string(), "-2");
    }

    #[test]
    fn test_mul_trims_exact_zeros() {
        assert_eq!(num("1.5").checked_mul(num("2")).unwrap().to_string(), "3.0");
        assert_eq!(num("1.25").checked_mul(num("1.5")).unwrap().to_string(), "1.875");
        assert_eq!(num("6").checked_mul(num("7")).unwrap().to_string(), "42");
    }

    #[test]
    fn test_div_rounds_half_even() {
        assert_eq!(num("10.00").checked_div(num("4"), 2).unwrap().to_string(), "2.50");
        assert_eq!(num("5").checked_div(num("2"), 0).unwrap().to_string(), "2");
        assert_eq!(num("7").checked_div(num("2"), 0).unwrap().to_string(), "4");
        assert_eq!(num("-7").checked_div(num("2"), 0).unwrap().to_string(), "-4");
        assert_eq!(num("1").checked_div(num("3"), 3).unwrap().to_string(), "0.333");
        assert_eq!(num("2").checked_div(num("3"), 3).unwrap().to_string(), "0.667");
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            num("1").checked_div(num("0.0"), 2).unwrap_err(),
            Error::DivisionByZero
        );
    }

    #[test]
    fn test_cmp_across_scales() {
        assert_eq!(num("5"), num("5.00"));
        assert!(num("2.5") < num("3"));
        assert!(num("-1") < num("0.1"));
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Number::from_f64(1.5).unwrap().to_string(), "1.5");
        assert_eq!(Number::from_f64(-2.0).unwrap().to_string(), "-2");
        assert!(Number::from_f64(f64::NAN).is_err());
    }
}
