//! This file contains simple helper functions and test helpers.

/// Returns a mask full of 1s, of `b` bits.
pub fn mask(b: usize) -> u64 {
    debug_assert!(b < 64, "mask is too wide");
    (1 << b) - 1
}

#[test]
fn test_masking() {
    assert_eq!(mask(0), 0x0);
    assert_eq!(mask(1), 0x1);
    assert_eq!(mask(8), 255);
    assert_eq!(mask(52), 0xF_FFFF_FFFF_FFFF);
}

// Linear-feedback shift register over a 25-bit window. The fuzz tests use it
// as a deterministic source of random numbers.
#[cfg(test)]
pub struct Lfsr {
    state: u32,
}

#[cfg(test)]
impl Lfsr {
    const SEED: u32 = 0x13371337;
    const TAPS: [u32; 4] = [24, 23, 22, 17];

    pub fn new() -> Lfsr {
        Self::new_with_seed(0)
    }

    /// Create a generator whose sequence is picked by `seed`.
    pub fn new_with_seed(seed: u32) -> Lfsr {
        Lfsr {
            state: Self::SEED ^ seed,
        }
    }

    /// Advance the register by one step and return the bit shifted in.
    fn step(&mut self) -> u32 {
        let state = self.state;
        let bit = Self::TAPS
            .iter()
            .fold(1, |acc, tap| acc ^ ((state >> tap) & 1));
        self.state = (state << 1) | bit;
        bit
    }

    fn get(&mut self) -> u32 {
        (0..32).fold(0, |acc, _| (acc << 1) | self.step())
    }

    pub fn get64(&mut self) -> u64 {
        let hi = u64::from(self.get());
        let lo = u64::from(self.get());
        (hi << 32) | lo
    }
}

#[test]
fn test_lfsr_balance() {
    let mut lfsr = Lfsr::new();

    // Count the number of items, and the number of 1s.
    let mut items = 0;
    let mut ones = 0;

    for _ in 0..10000 {
        let mut u = lfsr.get();
        for _ in 0..32 {
            items += 1;
            ones += u & 1;
            u >>= 1;
        }
    }
    // Make sure that we have around 50% 1s and 50% zeros.
    assert!((ones as f64) < (0.55 * items as f64));
    assert!((ones as f64) > (0.45 * items as f64));
}
