//! This module contains the IEEE-754 style decomposition of numbers into
//! sign, biased exponent and mantissa bit strings.

use super::base::Base;
use super::number::Number;
use super::utils::mask;
use core::fmt::Display;

// The encoding of the native f64 that numbers are stored in.
const F64_EXPONENT: usize = 11;
const F64_MANTISSA: usize = 52;
const F64_BIAS: i64 = 1023;

/// Defines the bit widths of a binary floating point format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatFormat {
    /// The number of bits that define the range of the exponent.
    exponent: usize,
    /// The number of stored bits of the significand (without the implicit
    /// leading one).
    mantissa: usize,
}

impl FloatFormat {
    /// Single precision: 8 exponent bits and 23 mantissa bits.
    pub const SINGLE: FloatFormat = FloatFormat {
        exponent: 8,
        mantissa: 23,
    };
    /// Double precision: 11 exponent bits and 52 mantissa bits.
    pub const DOUBLE: FloatFormat = FloatFormat {
        exponent: 11,
        mantissa: 52,
    };

    /// The widest supported exponent, in bits.
    pub const MAX_EXPONENT_LEN: usize = 62;

    /// Create a new format, or return None if the exponent width is outside
    /// of 1..=62.
    pub const fn new(exponent: usize, mantissa: usize) -> Option<Self> {
        if exponent < 1 || exponent > Self::MAX_EXPONENT_LEN {
            return None;
        }
        Some(FloatFormat { exponent, mantissa })
    }

    /// Returns the length of the exponent in bits.
    pub fn get_exponent_len(&self) -> usize {
        self.exponent
    }

    /// Returns the length of the mantissa in bits.
    pub fn get_mantissa_len(&self) -> usize {
        self.mantissa
    }

    /// Returns the exponent bias for the format, as a positive number.
    /// https://en.wikipedia.org/wiki/IEEE_754#Basic_and_interchange_formats
    pub fn get_bias(&self) -> i64 {
        ((1u64 << (self.exponent - 1)) - 1) as i64
    }
}

impl Default for FloatFormat {
    fn default() -> Self {
        FloatFormat::SINGLE
    }
}

impl Display for FloatFormat {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "(exponent:{} mantissa:{})", self.exponent, self.mantissa)
    }
}

/// The bit pattern of a number in some [`FloatFormat`], as strings of
/// binary digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingPoint {
    sign: String,
    exp: String,
    mantissa: String,
}

impl FloatingPoint {
    /// Returns the sign bit, "0" or "1".
    pub fn sign(&self) -> &str {
        &self.sign
    }

    /// Returns the biased exponent bits.
    pub fn exponent(&self) -> &str {
        &self.exp
    }

    /// Returns the mantissa bits (the fraction after the implicit one).
    pub fn mantissa(&self) -> &str {
        &self.mantissa
    }
}

impl Display for FloatingPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {} {}", self.sign, self.exp, self.mantissa)
    }
}

impl Number {
    /// Decompose the number into the sign, biased exponent and mantissa
    /// bits of the binary format `format`. Zero is encoded as all zeros.
    ///
    /// The exponent is floor(log2(|value|)), biased by 2^(exponent-1)-1. The
    /// mantissa is the binary expansion of |value| / 2^exponent (a value in
    /// [1, 2)) without the leading one, printed like any other fraction and
    /// zero padded on the right. There is no rounding, denormal or
    /// infinity encoding.
    pub fn to_floating_point(&self, format: FloatFormat) -> FloatingPoint {
        let exp_len = format.get_exponent_len();
        let mantissa_len = format.get_mantissa_len();

        if self.is_zero() {
            return FloatingPoint {
                sign: "0".to_string(),
                exp: "0".repeat(exp_len),
                mantissa: "0".repeat(mantissa_len),
            };
        }

        let sign = if self.value() >= 0. { "0" } else { "1" };
        let (exp, normalized) = decompose(self.value());

        FloatingPoint {
            sign: sign.to_string(),
            exp: format_exponent(exp + format.get_bias(), exp_len),
            mantissa: format_mantissa(normalized, mantissa_len),
        }
    }
}

/// Split the finite non-zero `val` into floor(log2(|val|)) and the
/// normalized significand |val| / 2^exp, which is in [1, 2).
fn decompose(val: f64) -> (i64, f64) {
    let bits = val.abs().to_bits();
    // Extract the biased exponent (wipe the sign and mantissa).
    let biased_exp = ((bits >> F64_MANTISSA) & mask(F64_EXPONENT)) as i64;
    // Wipe the sign and exponent.
    let mut mantissa = bits & mask(F64_MANTISSA);
    let mut exp = biased_exp - F64_BIAS;

    // Handle denormals. Move the leading one to the implicit bit.
    if biased_exp == 0 {
        let shift = mantissa.leading_zeros() as i64 - F64_EXPONENT as i64;
        mantissa = (mantissa << shift) & mask(F64_MANTISSA);
        exp = 1 - F64_BIAS - shift;
    }

    let one = (F64_BIAS as u64) << F64_MANTISSA;
    (exp, f64::from_bits(one | mantissa))
}

/// Print the biased exponent as `width` binary digits. Exponents that don't
/// fit the width are wrapped to the low `width` bits.
fn format_exponent(biased_exp: i64, width: usize) -> String {
    let wrapped = biased_exp as u64 & mask(width);
    if wrapped as i64 != biased_exp {
        log::debug!(
            "biased exponent {} does not fit in {} bits, wrapped to {}",
            biased_exp,
            width,
            wrapped
        );
    }
    format!("{:0width$b}", wrapped, width = width)
}

/// Print the bits after the binary point of `normalized`, padded (or cut)
/// to exactly `width` digits.
fn format_mantissa(normalized: f64, width: usize) -> String {
    let printed = Number::from_parts(normalized, Base::BINARY)
        .format_with(Base::BINARY, width);

    let mut fract: String = match printed.split_once('.') {
        Some((_, fract)) => fract.chars().take(width).collect(),
        None => String::new(),
    };
    while fract.len() < width {
        fract.push('0');
    }
    fract
}

#[cfg(test)]
fn num(text: &str, radix: u32) -> Number {
    Number::parse(text, Base::new(radix).unwrap()).unwrap()
}

#[test]
fn test_bias() {
    assert_eq!(FloatFormat::SINGLE.get_bias(), 127);
    assert_eq!(FloatFormat::DOUBLE.get_bias(), 1023);
    assert_eq!(FloatFormat::new(5, 10).unwrap().get_bias(), 15);
    assert_eq!(FloatFormat::default(), FloatFormat::SINGLE);
}

#[test]
fn test_format_widths() {
    assert_eq!(FloatFormat::new(8, 23), Some(FloatFormat::SINGLE));
    assert_eq!(FloatFormat::new(11, 52), Some(FloatFormat::DOUBLE));
    assert_eq!(FloatFormat::new(0, 10), None);
    assert_eq!(FloatFormat::new(63, 10), None);
    let widest = FloatFormat::new(62, 1).unwrap();
    assert_eq!(widest.get_bias(), (1i64 << 61) - 1);
}

#[test]
fn test_zero() {
    let fp = num("0", 10).to_floating_point(FloatFormat::SINGLE);
    assert_eq!(fp.sign(), "0");
    assert_eq!(fp.exponent(), "00000000");
    assert_eq!(fp.mantissa(), "00000000000000000000000");
    assert_eq!(fp.to_string(), "0 00000000 00000000000000000000000");
}

#[test]
fn test_power_of_two() {
    let fp = num("8", 10).to_floating_point(FloatFormat::SINGLE);
    assert_eq!(fp.sign(), "0");
    assert_eq!(fp.exponent(), "10000010");
    assert_eq!(fp.mantissa(), "00000000000000000000000");
}

#[test]
fn test_single_precision() {
    let fp = num("39887.5625", 10).to_floating_point(FloatFormat::SINGLE);
    assert_eq!(fp.sign(), "0");
    assert_eq!(fp.exponent(), "10001110");
    assert_eq!(fp.mantissa(), "00110111100111110010000");

    let fp = num("-521.5", 16).to_floating_point(FloatFormat::SINGLE);
    assert_eq!(fp.sign(), "1");
    assert_eq!(fp.exponent(), "10001001");
    assert_eq!(fp.mantissa(), "01001000010101000000000");
}

#[test]
fn test_double_precision() {
    let fp = num("10.1", 10).to_floating_point(FloatFormat::DOUBLE);
    assert_eq!(fp.sign(), "0");
    assert_eq!(fp.exponent(), "10000000010");
    assert_eq!(
        fp.mantissa(),
        "0100001100110011001100110011001100110011001100110011"
    );

    let fp = num("-1.FFFFFFFF", 16).to_floating_point(FloatFormat::DOUBLE);
    assert_eq!(fp.sign(), "1");
    assert_eq!(fp.exponent(), "01111111111");
    assert_eq!(
        fp.mantissa(),
        "1111111111111111111111111111111100000000000000000000"
    );
}

#[test]
fn test_small_values() {
    let fp = num("0.001", 2).to_floating_point(FloatFormat::SINGLE);
    assert_eq!(fp.exponent(), "01111100");
    assert_eq!(fp.mantissa(), "0".repeat(23));
}

#[test]
fn test_exponent_wraps() {
    // 2^20 needs a biased exponent of 35, which doesn't fit in 5 bits.
    let fp = num("100000", 16).to_floating_point(FloatFormat::new(5, 10).unwrap());
    assert_eq!(fp.exponent(), "00011");
    assert_eq!(fp.mantissa(), "0000000000");
}

#[test]
fn test_decompose_denormal() {
    let tiny = f64::from_bits(1);
    assert_eq!(decompose(tiny), (-1074, 1.));
    let tiny = f64::from_bits(3);
    assert_eq!(decompose(tiny), (-1073, 1.5));
}

#[test]
fn test_fuzz_native_bits() {
    use super::utils::Lfsr;

    // At most 23 significant bits, so that the values are exact in f32.
    let mut lfsr = Lfsr::new();
    for _ in 0..1000 {
        let whole = (lfsr.get64() % (1 << 13)) as f64;
        let fract = (lfsr.get64() % 1024) as f64 / 1024.;
        let sign = if lfsr.get64() % 2 == 0 { 1. } else { -1. };
        let value = (whole + fract) * sign;
        if value == 0. {
            continue;
        }
        let n = Number::from_parts(value, Base::DECIMAL);

        let fp = n.to_floating_point(FloatFormat::DOUBLE);
        let bits = format!("{:064b}", value.to_bits());
        assert_eq!(fp.sign(), &bits[0..1]);
        assert_eq!(fp.exponent(), &bits[1..12]);
        assert_eq!(fp.mantissa(), &bits[12..]);

        let fp = n.to_floating_point(FloatFormat::SINGLE);
        let bits = format!("{:032b}", (value as f32).to_bits());
        let expected = format!("{} {} {}", &bits[0..1], &bits[1..9], &bits[9..]);
        assert_eq!(fp.to_string(), expected);
    }
}
