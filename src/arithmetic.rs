//! Arithmetic on numbers. Every operation computes on the f64 values, then
//! re-parses the decimal rendering of the raw result (see
//! `Number::from_computed`), and finally tags the result with a display base:
//! the right-hand operand's base for `+ - *` between two numbers, the
//! left-hand operand's base for `/` and for the scalar operations.

use super::error::Result;
use super::number::Number;

#[allow(clippy::should_implement_trait)]
impl Number {
    /// Computes self + rhs. The result is displayed in the base of `rhs`.
    pub fn add(&self, rhs: &Number) -> Result<Number> {
        Number::from_computed(self.value() + rhs.value(), rhs.base())
    }

    /// Computes self - rhs as self + (rhs * -1). The result is displayed in
    /// the base of `rhs`.
    pub fn sub(&self, rhs: &Number) -> Result<Number> {
        let neg = rhs.mul_f64(-1.)?;
        self.add(&neg)
    }

    /// Computes self * rhs. The result is displayed in the base of `rhs`.
    pub fn mul(&self, rhs: &Number) -> Result<Number> {
        Number::from_computed(self.value() * rhs.value(), rhs.base())
    }

    /// Computes self / rhs. The result is displayed in the base of `self`.
    /// Division by zero fails, because the infinite result can't be parsed.
    pub fn div(&self, rhs: &Number) -> Result<Number> {
        Number::from_computed(self.value() / rhs.value(), self.base())
    }

    /// Multiply by the scalar `rhs`. The result keeps the base of `self`.
    pub fn mul_f64(&self, rhs: f64) -> Result<Number> {
        Number::from_computed(self.value() * rhs, self.base())
    }

    /// Divide by the scalar `rhs`, as a multiplication by its reciprocal.
    pub fn div_f64(&self, rhs: f64) -> Result<Number> {
        self.mul_f64(1. / rhs)
    }

    /// Returns the number with the sign flipped.
    pub fn neg(&self) -> Result<Number> {
        self.mul_f64(-1.)
    }
}

#[cfg(test)]
fn num(text: &str, radix: u32) -> Number {
    use super::base::Base;
    Number::parse(text, Base::new(radix).unwrap()).unwrap()
}

#[test]
fn test_addition() {
    let c = num("F", 16).add(&num("A", 16)).unwrap();
    assert_eq!(c.value(), 25.);
    assert!(!c.has_fract());

    let c = num("50", 9).add(&num("100", 7)).unwrap();
    assert_eq!(c.value(), 94.);
    assert!(!c.has_fract());

    let c = num("101.01", 2).add(&num("1.1", 2)).unwrap();
    assert_eq!(c.value(), 6.75);
    assert!(c.has_fract());

    let c = num("1200.2", 5).add(&num("35.6", 15)).unwrap();
    assert_eq!(c.value(), 225.8);
    assert!(c.has_fract());

    let c = num("0.3", 10).add(&num("0.7", 10)).unwrap();
    assert_eq!(c.value(), 1.);
    assert!(!c.has_fract());

    let c = num("10.5", 10).add(&num("-11", 7)).unwrap();
    assert_eq!(c.value(), 2.5);
    assert!(c.has_fract());
}

#[test]
fn test_addition_chained() {
    let mut a = num("0.5", 10);
    a = a.add(&num("1.5", 10)).unwrap();
    assert_eq!(a.value(), 2.);
    assert!(!a.has_fract());

    let mut b = num("1.3", 10);
    b = b.add(&num("1.7", 10)).unwrap();
    assert_eq!(b.value(), 3.);
    assert!(!b.has_fract());
}

#[test]
fn test_result_base() {
    use super::base::Base;

    let a = num("1", 3);
    let b = num("F", 16);
    assert_eq!(a.add(&b).unwrap().base(), Base::HEXADECIMAL);
    assert_eq!(a.sub(&b).unwrap().base(), Base::HEXADECIMAL);
    assert_eq!(a.mul(&b).unwrap().base(), Base::HEXADECIMAL);
    assert_eq!(a.div(&b).unwrap().base(), Base::new(3).unwrap());
    assert_eq!(b.mul_f64(2.).unwrap().base(), Base::HEXADECIMAL);
    assert_eq!(b.div_f64(2.).unwrap().base(), Base::HEXADECIMAL);
}

#[test]
fn test_multiplication() {
    let c = num("F", 16).mul(&num("A", 16)).unwrap();
    assert_eq!(c.value(), 150.);
    assert!(!c.has_fract());

    let c = num("50", 9).mul(&num("100", 7)).unwrap();
    assert_eq!(c.value(), 2205.);
    assert!(!c.has_fract());

    let c = num("101.01", 2).mul(&num("1.1", 2)).unwrap();
    assert_eq!(c.value(), 7.875);
    assert!(c.has_fract());

    let c = num("1200.2", 5).mul(&num("35.6", 15)).unwrap();
    assert_eq!(c.value(), 8840.16);
    assert!(c.has_fract());

    let c = num("1.5", 10).mul(&num("2", 10)).unwrap();
    assert_eq!(c.value(), 3.);
    assert!(!c.has_fract());
}

#[test]
fn test_subtraction() {
    let c = num("F", 16).sub(&num("A", 16)).unwrap();
    assert_eq!(c.value(), 5.);
    assert!(!c.has_fract());

    let c = num("50", 9).sub(&num("100", 7)).unwrap();
    assert_eq!(c.value(), -4.);
    assert!(!c.has_fract());

    let c = num("101.01", 2).sub(&num("1.1", 2)).unwrap();
    assert_eq!(c.value(), 3.75);
    assert!(c.has_fract());

    let c = num("1200.2", 5).sub(&num("35.6", 15)).unwrap();
    assert_eq!(c.value(), 125.);
    assert!(!c.has_fract());

    let c = num("1.7", 10).sub(&num("0.7", 10)).unwrap();
    assert_eq!(c.value(), 1.);
    assert!(!c.has_fract());

    let c = num("10.5", 10).sub(&num("-11", 7)).unwrap();
    assert_eq!(c.value(), 18.5);
    assert!(c.has_fract());

    let c = num("1.3", 10).sub(&num("0.3", 10)).unwrap();
    assert_eq!(c.value(), 1.);
    assert!(!c.has_fract());
}

#[test]
fn test_division() {
    let c = num("10", 16).div(&num("2", 16)).unwrap();
    assert_eq!(c.value(), 8.);
    assert!(!c.has_fract());

    let c = num("176", 9).div(&num("101", 7)).unwrap();
    assert_eq!(c.value(), 3.);
    assert!(!c.has_fract());

    let c = num("101.01", 2).div(&num("1.1", 2)).unwrap();
    assert_eq!(c.value(), 3.5);
    assert!(c.has_fract());

    let c = num("14.6", 8).div(&num("4.4", 5)).unwrap();
    assert_eq!(c.value(), 2.65625);
    assert!(c.has_fract());

    let c = num("6.5", 10).div(&num("0.5", 10)).unwrap();
    assert_eq!(c.value(), 13.);
    assert!(!c.has_fract());
}

#[test]
fn test_division_by_zero() {
    use super::error::NumberError;
    assert_eq!(num("5", 10).div(&num("0", 2)), Err(NumberError::InvalidNumber));
    assert_eq!(num("5", 10).div_f64(0.), Err(NumberError::InvalidNumber));
}

#[test]
fn test_overflow_is_reported() {
    use super::error::NumberError;
    let big = num("7FFFFFFFFFFFFFFF", 16);
    assert_eq!(big.mul(&big), Err(NumberError::InvalidNumber));
}

#[test]
fn test_scalar() {
    let c = num("0.5", 10).mul_f64(2.).unwrap();
    assert_eq!(c.value(), 1.);
    assert!(!c.has_fract());

    let c = num("1.5", 10).div_f64(3.).unwrap();
    assert_eq!(c.value(), 0.5);
    assert!(c.has_fract());

    let c = num("-A.8", 16).neg().unwrap();
    assert_eq!(c.value(), 10.5);
}

#[test]
fn test_fuzz_addition() {
    use super::base::Base;
    use super::utils::Lfsr;

    let mut lfsr = Lfsr::new();
    for _ in 0..500 {
        let a = (lfsr.get64() % 1_000_000) as i64 - 500_000;
        let b = (lfsr.get64() % 1_000_000) as i64 - 500_000;
        let base_a = Base::from_index((lfsr.get64() % 15) as usize).unwrap();
        let base_b = Base::from_index((lfsr.get64() % 15) as usize).unwrap();
        let x = Number::from_i64(a, base_a);
        let y = Number::from_i64(b, base_b);
        let sum = x.add(&y).unwrap();
        assert_eq!(sum.value(), (a + b) as f64);
        assert_eq!(sum.base(), base_b);
        let diff = x.sub(&y).unwrap();
        assert_eq!(diff.value(), (a - b) as f64);
        let prod = x.mul(&y).unwrap();
        assert_eq!(prod.value(), (a * b) as f64);
    }
}
