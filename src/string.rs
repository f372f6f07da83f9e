//! This module contains the implementation of string conversion: parsing
//! text in some base into a [`Number`], and printing a number in any base.

use super::base::Base;
use super::error::{NumberError, Result};
use super::number::Number;
use core::fmt::Display;

/// The default number of fractional digits that are printed.
pub const DEFAULT_PRECISION: usize = 15;

/// Printing of fractional digits stops when the remaining fraction is
/// smaller than this value.
pub const FRACTION_TOLERANCE: f64 = 1e-10;

impl Number {
    /// Try to construct a number from the string `text`, which is written in
    /// base `base`. The text is an optional sign, the integral digits, and
    /// optionally a point followed by the fractional digits. A trailing point
    /// is accepted ("12." is read as "12").
    ///
    /// The integral digits, the fractional digits and the power of the base
    /// that scales the fraction must all fit in an i64, otherwise the
    /// conversion fails. The fraction is converted exactly and only then
    /// divided, so precision loss is limited to the final f64 rounding.
    pub fn parse(text: &str, base: Base) -> Result<Self> {
        // Treat "N." as "N".
        let text = text.strip_suffix('.').unwrap_or(text);

        // Handle the case where there is no fraction.
        let Some((whole, fract)) = text.split_once('.') else {
            let whole = parse_integer(text, base).ok_or(NumberError::InvalidNumber)?;
            return Ok(Number::from_parts(whole as f64, base));
        };

        // Parse the fraction as an integer numerator over base^len.
        let fract_num = parse_digits(fract, base).ok_or(NumberError::InvalidNumber)?;
        let fract_len = u32::try_from(fract.len()).map_err(|_| NumberError::InvalidNumber)?;
        let fract_den = i64::from(base.radix())
            .checked_pow(fract_len)
            .ok_or(NumberError::InvalidNumber)?;

        // Parse the integral part. The sign is applied to the whole value,
        // so that "-0.5" is negative even though "-0" is zero.
        let whole = parse_integer(whole, base).ok_or(NumberError::InvalidNumber)?;
        let sign = if text.starts_with('-') { -1. } else { 1. };

        let fract_val = fract_num as f64 / fract_den as f64;
        let value = ((whole as f64).abs() + fract_val) * sign;
        Ok(Number::from_parts(value, base))
    }

    /// Convert the number to a string in its own base, with the default
    /// precision.
    pub fn format(&self) -> String {
        self.format_with(self.base(), DEFAULT_PRECISION)
    }

    /// Convert the number to a string in base `base`, with the default
    /// precision.
    pub fn format_in(&self, base: Base) -> String {
        self.format_with(base, DEFAULT_PRECISION)
    }

    /// Convert the number to a string in base `base`. The integral part is
    /// exact. The fractional digits are extracted greedily: multiply by the
    /// base, take the integer part as the next digit, and repeat until the
    /// rest is below [`FRACTION_TOLERANCE`] or `precision` digits were
    /// printed. Repeating fractions are truncated, not rounded.
    pub fn format_with(&self, base: Base, precision: usize) -> String {
        let value = self.value();
        let whole = value as i64;

        let fraction = if self.has_fract() {
            let fract = value.abs() - (whole as f64).abs();
            format_fraction(fract, base, precision)
        } else {
            String::new()
        };

        let mut result = String::new();
        // The integral part of numbers in (-1, 0) is zero, which has no sign.
        if whole == 0 && value < 0. && !fraction.is_empty() {
            result.push('-');
        }
        result.push_str(&format_integer(whole, base));
        if !fraction.is_empty() {
            result.push('.');
            result.push_str(&fraction);
        }
        result
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl TryFrom<&str> for Number {
    type Error = NumberError;

    fn try_from(value: &str) -> core::result::Result<Self, Self::Error> {
        Self::parse(value, Base::DECIMAL)
    }
}

/// Parse a sequence of digits (no sign) in base `base`. Returns None if the
/// text is empty, has a character that is not a digit of the base, or if the
/// value does not fit in an i64.
fn parse_digits(value: &str, base: Base) -> Option<i64> {
    if value.is_empty() {
        return None;
    }
    let radix = i64::from(base.radix());
    let mut num: i64 = 0;
    for c in value.chars() {
        let digit = i64::from(base.digit_value(c)?);
        num = num.checked_mul(radix)?.checked_add(digit)?;
    }
    Some(num)
}

/// Parse an integer with an optional leading sign.
fn parse_integer(value: &str, base: Base) -> Option<i64> {
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };
    let magnitude = parse_digits(digits, base)?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Print a signed integer in base `base`.
fn format_integer(value: i64, base: Base) -> String {
    if value == 0 {
        return "0".to_string();
    }

    // Extract the digits: Div-Mod-Div-Mod ...
    let radix = u64::from(base.radix());
    let mut magnitude = value.unsigned_abs();
    let mut buff = Vec::new();
    while magnitude != 0 {
        buff.push(base.digit_char((magnitude % radix) as u32));
        magnitude /= radix;
    }
    if value < 0 {
        buff.push('-');
    }
    buff.iter().rev().collect()
}

/// Print the digits of `fract`, a value in [0, 1), in base `base`.
fn format_fraction(fract: f64, base: Base, precision: usize) -> String {
    let radix = base.radix();
    let mut fract = fract;
    let mut buff = String::new();

    while fract > FRACTION_TOLERANCE && buff.len() < precision {
        fract *= f64::from(radix);
        let digit = (fract as u32).min(radix - 1);
        buff.push(base.digit_char(digit));
        fract -= f64::from(digit);
    }
    buff
}

#[cfg(test)]
fn base(radix: u32) -> Base {
    Base::new(radix).unwrap()
}

#[test]
fn test_parse_values() {
    assert_eq!(Number::parse("FA", base(16)).unwrap().value(), 250.);
    assert_eq!(Number::parse("-121", base(3)).unwrap().value(), -16.);
    assert_eq!(Number::parse("10.3", base(8)).unwrap().value(), 8.375);
    assert_eq!(Number::parse("-2.4C", base(15)).unwrap().value(), -2.32);
    assert_eq!(Number::parse("10.0000", base(10)).unwrap().value(), 10.);
    assert_eq!(Number::parse("10.", base(10)).unwrap().value(), 10.);
    assert_eq!(Number::parse("fa", base(16)).unwrap().value(), 250.);
    assert_eq!(Number::parse("+7", base(8)).unwrap().value(), 7.);
    assert_eq!(Number::parse("-0.5", base(10)).unwrap().value(), -0.5);
}

#[test]
fn test_parse_fract_flag() {
    assert!(!Number::parse("F", base(16)).unwrap().has_fract());
    assert!(!Number::parse("-42", base(5)).unwrap().has_fract());
    assert!(Number::parse("3.14", base(8)).unwrap().has_fract());
    assert!(Number::parse("-0.15", base(10)).unwrap().has_fract());
    assert!(!Number::parse("3.00000", base(10)).unwrap().has_fract());
    assert!(!Number::parse("3.", base(13)).unwrap().has_fract());
}

#[test]
fn test_parse_keeps_base() {
    let a = Number::parse("777", base(8)).unwrap();
    assert_eq!(a.base(), Base::OCTAL);
    assert_eq!(a.value(), 511.);
}

#[test]
fn test_parse_errors() {
    let err = Err(NumberError::InvalidNumber);
    assert_eq!(Number::parse("12345678901234567890", base(10)), err);
    assert_eq!(Number::parse("12345678901234567890.", base(10)), err);
    assert_eq!(Number::parse("FFFFFFFFFFFFFFFF", base(16)), err);
    assert_eq!(Number::parse("0.12345678901234567890", base(10)), err);
    assert_eq!(Number::parse("12345678901234567890.FFFF", base(16)), err);

    // Digits outside of the base.
    assert_eq!(Number::parse("2", base(2)), err);
    assert_eq!(Number::parse("1G", base(16)), err);
    assert_eq!(Number::parse("1.9", base(8)), err);

    // Malformed text.
    assert_eq!(Number::parse("", base(10)), err);
    assert_eq!(Number::parse(".", base(10)), err);
    assert_eq!(Number::parse("-", base(10)), err);
    assert_eq!(Number::parse(".5", base(10)), err);
    assert_eq!(Number::parse("1.2.3", base(10)), err);
    assert_eq!(Number::parse("1..", base(10)), err);
    assert_eq!(Number::parse("1.-5", base(10)), err);
    assert_eq!(Number::parse("1 2", base(10)), err);
}

#[test]
fn test_parse_bounds() {
    let max = Number::parse("7FFFFFFFFFFFFFFF", base(16)).unwrap();
    assert_eq!(max.value(), i64::MAX as f64);
    let min = Number::parse("-7FFFFFFFFFFFFFFF", base(16)).unwrap();
    assert_eq!(min.value(), -(i64::MAX as f64));
    // 10^18 fits as a denominator, 10^19 doesn't.
    assert!(Number::parse("0.000000000000000001", base(10)).is_ok());
    assert!(Number::parse("0.0000000000000000001", base(10)).is_err());
}

#[test]
fn test_format() {
    assert_eq!(Number::parse("29", base(11)).unwrap().format(), "29");
    assert_eq!(Number::parse("-74", base(11)).unwrap().format(), "-74");
    assert_eq!(Number::parse("25.11", base(11)).unwrap().format(), "25.11");
    assert_eq!(Number::parse("-33.69", base(11)).unwrap().format(), "-33.69");
    assert_eq!(Number::parse("5.000000", base(14)).unwrap().format(), "5");
    assert_eq!(Number::parse("2.", base(4)).unwrap().format(), "2");
    assert_eq!(Number::parse("0", base(7)).unwrap().format(), "0");
    assert_eq!(Number::parse("-0.1", base(2)).unwrap().format(), "-0.1");
    assert_eq!(Number::parse("ab", base(16)).unwrap().to_string(), "AB");
}

#[test]
fn test_format_precision() {
    let third = Number::parse("0.1", base(3)).unwrap();
    assert_eq!(third.format_with(base(10), 4), "0.3333");
    assert_eq!(third.format_with(base(10), 0), "0");
    assert_eq!(third.format(), "0.1");

    let tenth = Number::parse("0.1", base(10)).unwrap();
    let bits = tenth.format_in(Base::BINARY);
    assert_eq!(bits, "0.000110011001100");
}

#[test]
fn test_conversion() {
    let a = Number::parse("1010.1011", base(2)).unwrap();
    assert_eq!(a.format_in(base(16)), "A.B");
    let b = Number::parse("1A.8", base(12)).unwrap();
    assert_eq!(b.format_in(base(9)), "24.6");
    let c = Number::parse("-255", base(10)).unwrap();
    assert_eq!(c.format_in(base(16)), "-FF");
    assert_eq!(c.format_in(base(2)), "-11111111");
}

#[test]
fn test_try_from_str() {
    let a = Number::try_from("12.25").unwrap();
    assert_eq!(a.value(), 12.25);
    assert_eq!(a.base(), Base::DECIMAL);
    assert!(Number::try_from("A").is_err());
}

#[test]
fn test_format_integer_extremes() {
    assert_eq!(format_integer(i64::MAX, base(16)), "7FFFFFFFFFFFFFFF");
    assert_eq!(format_integer(i64::MIN, base(16)), "-8000000000000000");
    assert_eq!(format_integer(-1, base(2)), "-1");
}

#[test]
fn test_fuzz_round_trip_integers() {
    use super::utils::Lfsr;

    let mut lfsr = Lfsr::new();
    for _ in 0..2000 {
        let val = (lfsr.get64() >> 12) as i64 - (1 << 51);
        for b in Base::all() {
            let text = Number::from_i64(val, b).format();
            let parsed = Number::parse(&text, b).unwrap();
            assert_eq!(parsed.value(), val as f64, "{} in base {}", text, b);
            assert_eq!(parsed.format(), text);
        }
    }
}

#[test]
fn test_fuzz_round_trip_fractions() {
    use super::utils::Lfsr;

    // Dyadic fractions are exact in the power-of-two bases.
    let mut lfsr = Lfsr::new_with_seed(7);
    for _ in 0..1000 {
        let whole = (lfsr.get64() % 100_000) as f64;
        let fract = (lfsr.get64() % 4096) as f64 / 4096.;
        let value = whole + fract;
        for radix in [2, 4, 8, 16] {
            let b = base(radix);
            let text = Number::from_parts(value, b).format();
            let parsed = Number::parse(&text, b).unwrap();
            assert_eq!(parsed.value(), value, "{} in base {}", text, b);
            assert_eq!(parsed.format(), text);
        }
    }
}

#[test]
fn test_canonical_form() {
    // Trailing zero digits and a lone point are normalized away.
    let cases = [
        ("101.1000", 2, "101.1"),
        ("7.", 8, "7"),
        ("-C.80", 16, "-C.8"),
        ("0.000", 10, "0"),
    ];
    for (text, radix, canonical) in cases {
        let b = base(radix);
        assert_eq!(Number::parse(text, b).unwrap().format(), canonical);
    }
}
