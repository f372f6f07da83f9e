//! Radix complements, used for the signed representations of numbers in
//! any base.

use super::error::Result;
use super::number::Number;

impl Number {
    /// Computes the radix complement, `base^digits - self`, in the base of
    /// this number. When `digits` is None the length of the printed number is
    /// used. Notice that the printed length includes the minus sign of
    /// negative numbers (and the point and fraction digits, if any).
    pub fn radix_complement(&self, digits: Option<usize>) -> Result<Number> {
        let digits = digits.unwrap_or_else(|| self.format().chars().count());
        let power = format!("1{}", "0".repeat(digits));
        Number::parse(&power, self.base())?.sub(self)
    }

    /// Computes the diminished radix complement, `base^digits - self - 1`.
    /// In base 2 this is the one's complement.
    pub fn radix_complement_diminished(
        &self,
        digits: Option<usize>,
    ) -> Result<Number> {
        let one = Number::from_i64(1, self.base());
        self.radix_complement(digits)?.sub(&one)
    }
}

#[cfg(test)]
fn num(text: &str, radix: u32) -> Number {
    use super::base::Base;
    Number::parse(text, Base::new(radix).unwrap()).unwrap()
}

#[test]
fn test_radix_complement() {
    let a = num("124", 16);
    assert_eq!(a.radix_complement(None).unwrap().format(), "EDC");

    let a = num("7312", 10);
    assert_eq!(a.radix_complement(Some(6)).unwrap().format(), "992688");
}

#[test]
fn test_radix_complement_diminished() {
    let a = num("1", 8);
    assert_eq!(a.radix_complement_diminished(None).unwrap().format(), "6");

    let a = num("1010", 2);
    let c = a.radix_complement_diminished(Some(8)).unwrap();
    assert_eq!(c.format(), "11110101");
}

#[test]
fn test_complement_keeps_base() {
    use super::base::Base;
    let a = num("37", 8);
    assert_eq!(a.radix_complement(None).unwrap().base(), Base::OCTAL);
    assert_eq!(
        a.radix_complement_diminished(None).unwrap().base(),
        Base::OCTAL
    );
}

#[test]
fn test_default_digits_count_the_sign() {
    // "-5" has two characters, so the complement is 10^2 - (-5).
    let a = num("-5", 10);
    assert_eq!(a.radix_complement(None).unwrap().value(), 105.);
}

#[test]
fn test_complement_overflow() {
    use super::error::NumberError;
    let a = num("1", 2);
    assert_eq!(a.radix_complement(Some(63)), Err(NumberError::InvalidNumber));
    assert!(a.radix_complement(Some(62)).is_ok());
}

#[test]
fn test_complement_involution() {
    use super::base::Base;
    use super::utils::Lfsr;

    let mut lfsr = Lfsr::new_with_seed(3);
    for _ in 0..300 {
        let val = (lfsr.get64() % 100_000) as i64;
        for base in Base::all() {
            let a = Number::from_i64(val, base);
            let digits = a.format().len() + 1;
            let once = a.radix_complement(Some(digits)).unwrap();
            let twice = once.radix_complement(Some(digits)).unwrap();
            assert_eq!(twice.value(), a.value());
            assert_eq!(twice.base(), base);
        }
    }
}
