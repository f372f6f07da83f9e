use super::base::Base;
use super::error::Result;

/// This is the main data structure of this library. It represents a signed
/// real number together with the base it is displayed in.
///
/// The magnitude is stored as an f64. Operations never mutate a number in
/// place; they return a new number, tagged with the base that the calculator
/// display should fall back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    // The value, including the fractional part.
    value: f64,
    // The base used when parsing and printing.
    base: Base,
    // Cached `value != floor(value)`.
    has_fract: bool,
}

impl Number {
    /// Create a number from its parts. The fract flag is derived from
    /// `value`.
    pub(crate) fn from_parts(value: f64, base: Base) -> Self {
        Number {
            value,
            base,
            has_fract: value != value.floor(),
        }
    }

    /// Returns a new zero number.
    pub fn zero(base: Base) -> Self {
        Self::from_parts(0., base)
    }

    /// Load the integer `val` into a number. Integers above 2^53 are rounded
    /// to the nearest representable value.
    pub fn from_i64(val: i64, base: Base) -> Self {
        Self::from_parts(val as f64, base)
    }

    /// Create a number from the result of a computation. The result goes
    /// through its decimal rendering and is parsed again, so that results
    /// that can't be parsed (non-finite values, or values that overflow the
    /// integer conversion) are reported as errors. The result is then tagged
    /// with `base`.
    pub(crate) fn from_computed(value: f64, base: Base) -> Result<Self> {
        let decimal = value.to_string();
        Ok(Self::parse(&decimal, Base::DECIMAL)?.with_base(base))
    }

    /// Returns the value of the number.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the base that the number is displayed in.
    pub fn base(&self) -> Base {
        self.base
    }

    /// Returns true if the number has a non-zero fractional part.
    pub fn has_fract(&self) -> bool {
        self.has_fract
    }

    /// Returns true if the number is smaller than zero.
    pub fn is_negative(&self) -> bool {
        self.value < 0.
    }

    /// Returns true if the number is zero.
    pub fn is_zero(&self) -> bool {
        self.value == 0.
    }

    /// Returns the same number tagged with a different display base. The
    /// value is not changed.
    pub(crate) fn with_base(mut self, base: Base) -> Self {
        self.base = base;
        self
    }
}

#[test]
fn test_from_parts_fract_flag() {
    let a = Number::from_parts(2.5, Base::DECIMAL);
    assert!(a.has_fract());
    let b = Number::from_parts(-3., Base::OCTAL);
    assert!(!b.has_fract());
    assert!(b.is_negative());
    let c = Number::from_parts(-0.25, Base::BINARY);
    assert!(c.has_fract());
    assert!(Number::zero(Base::DECIMAL).is_zero());
}

#[test]
fn test_from_i64() {
    let a = Number::from_i64(-42, Base::HEXADECIMAL);
    assert_eq!(a.value(), -42.);
    assert_eq!(a.base(), Base::HEXADECIMAL);
    assert!(!a.has_fract());
}

#[test]
fn test_from_computed() {
    let a = Number::from_computed(0.1 + 0.2, Base::BINARY).unwrap();
    assert!(a.has_fract());
    assert_eq!(a.base(), Base::BINARY);
    assert!((a.value() - 0.3).abs() < 1e-12);

    let b = Number::from_computed(3., Base::OCTAL).unwrap();
    assert!(!b.has_fract());
    assert_eq!(b.value(), 3.);

    assert!(Number::from_computed(f64::INFINITY, Base::DECIMAL).is_err());
    assert!(Number::from_computed(f64::NAN, Base::DECIMAL).is_err());
    assert!(Number::from_computed(1e20, Base::DECIMAL).is_err());
}

#[test]
fn test_with_base_keeps_value() {
    let a = Number::from_parts(10.5, Base::DECIMAL);
    let b = a.with_base(Base::BINARY);
    assert_eq!(b.value(), 10.5);
    assert!(b.has_fract());
    assert_eq!(b.base(), Base::BINARY);
}
