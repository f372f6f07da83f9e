//! This module contains the definition of the radix that numbers are parsed
//! and printed in.

use super::error::NumberError;
use core::fmt::Display;

/// The uppercase digit alphabet shared by all of the supported bases.
const DIGITS: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E',
    'F',
];

/// A positional numeral system radix in the range 2..=16. The radix governs
/// both the digits accepted when parsing and the digits used when printing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base(u32);

impl Base {
    /// The smallest supported radix.
    pub const MIN: u32 = 2;
    /// The largest supported radix.
    pub const MAX: u32 = 16;

    pub const BINARY: Base = Base(2);
    pub const OCTAL: Base = Base(8);
    pub const DECIMAL: Base = Base(10);
    pub const HEXADECIMAL: Base = Base(16);

    /// Create a new base, or return None if `radix` is outside of 2..=16.
    pub const fn new(radix: u32) -> Option<Self> {
        if radix < Self::MIN || radix > Self::MAX {
            return None;
        }
        Some(Base(radix))
    }

    /// Returns the radix as an integer.
    pub const fn radix(&self) -> u32 {
        self.0
    }

    /// Returns the position of this base in a list of all of the bases,
    /// where base 2 is at index zero.
    pub const fn index(&self) -> usize {
        (self.0 - Self::MIN) as usize
    }

    /// Returns the base at position `index` (see [`Base::index`]).
    pub const fn from_index(index: usize) -> Option<Self> {
        if index > (Self::MAX - Self::MIN) as usize {
            return None;
        }
        Some(Base(index as u32 + Self::MIN))
    }

    /// Returns an iterator over all of the supported bases, in order.
    pub fn all() -> impl Iterator<Item = Base> {
        (Self::MIN..=Self::MAX).map(Base)
    }

    /// Returns the value of the digit `c` in this base, accepting upper and
    /// lower case letters.
    pub fn digit_value(&self, c: char) -> Option<u32> {
        c.to_digit(self.0)
    }

    /// Returns the uppercase character for the digit `d`, which must be
    /// smaller than the radix.
    pub(crate) fn digit_char(&self, d: u32) -> char {
        debug_assert!(d < self.0, "digit out of range for the base");
        DIGITS[d as usize]
    }
}

impl Default for Base {
    fn default() -> Self {
        Base::DECIMAL
    }
}

impl TryFrom<u32> for Base {
    type Error = NumberError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        Base::new(radix).ok_or(NumberError::InvalidNumber)
    }
}

impl From<Base> for u32 {
    fn from(base: Base) -> u32 {
        base.radix()
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[test]
fn test_base_range() {
    assert!(Base::new(1).is_none());
    assert!(Base::new(17).is_none());
    assert_eq!(Base::new(2), Some(Base::BINARY));
    assert_eq!(Base::new(16), Some(Base::HEXADECIMAL));
    assert_eq!(Base::try_from(0u32), Err(NumberError::InvalidNumber));
    assert_eq!(Base::try_from(8u32), Ok(Base::OCTAL));
    assert_eq!(Base::all().count(), 15);
    assert_eq!(Base::default(), Base::DECIMAL);
}

#[test]
fn test_picker_index() {
    assert_eq!(Base::BINARY.index(), 0);
    assert_eq!(Base::DECIMAL.index(), 8);
    assert_eq!(Base::from_index(14), Some(Base::HEXADECIMAL));
    assert_eq!(Base::from_index(15), None);
    for (i, base) in Base::all().enumerate() {
        assert_eq!(base.index(), i);
        assert_eq!(Base::from_index(i), Some(base));
    }
}

#[test]
fn test_digits() {
    let hex = Base::HEXADECIMAL;
    assert_eq!(hex.digit_value('f'), Some(15));
    assert_eq!(hex.digit_value('F'), Some(15));
    assert_eq!(hex.digit_char(11), 'B');
    assert_eq!(Base::BINARY.digit_value('2'), None);
    assert_eq!(Base::new(3).unwrap().digit_value('2'), Some(2));
    assert_eq!(format!("{}", Base::OCTAL), "8");
}
