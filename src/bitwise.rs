//! Bitwise operations. The operands are truncated to i64 (any fraction is
//! dropped), the operation uses the native two's complement semantics, and
//! the result is displayed in the base of the right-hand operand.
//!
//! The operations are meant for non-negative integers; the calculator
//! disables them for other inputs, so they are not validated here.

use super::base::Base;
use super::error::Result;
use super::number::Number;

#[allow(clippy::should_implement_trait)]
impl Number {
    fn bitwise_op<F: Fn(i64, i64) -> i64>(&self, rhs: &Number, op: F) -> Number {
        let lhs_val = self.value() as i64;
        let rhs_val = rhs.value() as i64;
        Number::from_i64(op(lhs_val, rhs_val), rhs.base())
    }

    /// Computes the bitwise AND of the integral parts.
    pub fn and(&self, rhs: &Number) -> Number {
        self.bitwise_op(rhs, |a, b| a & b)
    }

    /// Computes the bitwise OR of the integral parts.
    pub fn or(&self, rhs: &Number) -> Number {
        self.bitwise_op(rhs, |a, b| a | b)
    }

    /// Computes the bitwise XOR of the integral parts.
    pub fn xor(&self, rhs: &Number) -> Number {
        self.bitwise_op(rhs, |a, b| a ^ b)
    }

    /// Computes the NOR of the integral parts. The OR is complemented in
    /// binary, using the diminished radix complement with as many digits as
    /// the binary OR has, so "1010 NOR 0011" is "0100".
    pub fn nor(&self, rhs: &Number) -> Result<Number> {
        let or = self.or(rhs);
        let nor = or.with_base(Base::BINARY).radix_complement_diminished(None)?;
        Ok(nor.with_base(or.base()))
    }

    /// Shift the integral part of self left by the integral part of `rhs`.
    pub fn shl(&self, rhs: &Number) -> Number {
        self.bitwise_op(rhs, shift_left)
    }

    /// Shift the integral part of self right (arithmetic shift) by the
    /// integral part of `rhs`.
    pub fn shr(&self, rhs: &Number) -> Number {
        self.bitwise_op(rhs, shift_right)
    }
}

/// Shift `val` left by `amt` bits. Bits shifted out are lost, shifting by
/// 64 or more gives zero, and negative amounts shift to the right.
fn shift_left(val: i64, amt: i64) -> i64 {
    if amt < 0 {
        return shift_right(val, amt.saturating_neg());
    }
    if amt >= i64::from(i64::BITS) {
        return 0;
    }
    val << amt
}

/// Arithmetic shift of `val` right by `amt` bits. Shifting by 64 or more
/// fills the result with the sign bit, and negative amounts shift to the
/// left.
fn shift_right(val: i64, amt: i64) -> i64 {
    if amt < 0 {
        return shift_left(val, amt.saturating_neg());
    }
    if amt >= i64::from(i64::BITS) {
        return if val < 0 { -1 } else { 0 };
    }
    val >> amt
}

#[cfg(test)]
fn num(text: &str, radix: u32) -> Number {
    Number::parse(text, Base::new(radix).unwrap()).unwrap()
}

#[test]
fn test_and() {
    let c = num("10", 10).and(&num("3", 10));
    assert_eq!(c.value(), 2.);
    assert!(!c.has_fract());
    assert_eq!(c.base(), Base::DECIMAL);

    let c = num("11011", 2).and(&num("1110", 2));
    assert_eq!(c.value(), 10.);
    assert_eq!(c.base(), Base::BINARY);
}

#[test]
fn test_or() {
    let c = num("10", 10).or(&num("3", 10));
    assert_eq!(c.value(), 11.);
    assert_eq!(c.base(), Base::DECIMAL);

    let c = num("11011", 2).or(&num("100", 2));
    assert_eq!(c.value(), 31.);
    assert_eq!(c.base(), Base::BINARY);
}

#[test]
fn test_xor() {
    let c = num("10", 10).xor(&num("3", 10));
    assert_eq!(c.value(), 9.);
    assert_eq!(c.base(), Base::DECIMAL);

    let c = num("ABC", 16).xor(&num("DEF", 16));
    assert_eq!(c.value(), 1875.);
    assert!(!c.has_fract());
    assert_eq!(c.base(), Base::HEXADECIMAL);
}

#[test]
fn test_nor() {
    let c = num("10", 10).nor(&num("3", 10)).unwrap();
    assert_eq!(c.value(), 4.);
    assert!(!c.has_fract());
    assert_eq!(c.base(), Base::DECIMAL);

    let c = num("ABC", 16).nor(&num("DE", 16)).unwrap();
    assert_eq!(c.value(), 1281.);
    assert_eq!(c.base(), Base::HEXADECIMAL);
}

#[test]
fn test_shifts() {
    let c = num("10", 10).shl(&num("2", 10));
    assert_eq!(c.value(), 40.);
    assert_eq!(c.base(), Base::DECIMAL);

    let c = num("11011", 2).shl(&num("1", 2));
    assert_eq!(c.value(), 54.);
    assert_eq!(c.base(), Base::BINARY);

    let c = num("10", 10).shr(&num("2", 10));
    assert_eq!(c.value(), 2.);

    let c = num("11011", 2).shr(&num("1", 2));
    assert_eq!(c.value(), 13.);
    assert_eq!(c.base(), Base::BINARY);
}

#[test]
fn test_shift_amounts() {
    assert_eq!(shift_left(1, 63), i64::MIN);
    assert_eq!(shift_left(1, 64), 0);
    assert_eq!(shift_left(8, -2), 2);
    assert_eq!(shift_right(-8, 100), -1);
    assert_eq!(shift_right(8, 100), 0);
    assert_eq!(shift_right(1, -3), 8);
    assert_eq!(shift_left(1, i64::MIN), 0);
}

#[test]
fn test_fraction_is_truncated() {
    let c = num("7.5", 10).and(&num("6.9", 10));
    assert_eq!(c.value(), 6.);
    assert!(!c.has_fract());
}

#[test]
fn test_fuzz_native_semantics() {
    use super::utils::Lfsr;

    let mut lfsr = Lfsr::new();
    for _ in 0..1000 {
        let a = (lfsr.get64() >> 34) as i64;
        let b = (lfsr.get64() >> 34) as i64;
        let x = Number::from_i64(a, Base::HEXADECIMAL);
        let y = Number::from_i64(b, Base::OCTAL);
        assert_eq!(x.and(&y).value(), (a & b) as f64);
        assert_eq!(x.or(&y).value(), (a | b) as f64);
        assert_eq!(x.xor(&y).value(), (a ^ b) as f64);
        let amt = Number::from_i64(b % 16, Base::DECIMAL);
        assert_eq!(x.shl(&amt).value(), (a << (b % 16)) as f64);
        assert_eq!(x.shr(&amt).value(), (a >> (b % 16)) as f64);

        // NOR is the complement of OR over the width of the binary OR.
        let or = a | b;
        if or != 0 {
            let width = 64 - or.leading_zeros();
            let expected = !or & ((1i64 << width) - 1);
            assert_eq!(x.nor(&y).unwrap().value(), expected as f64);
        }
    }
}
