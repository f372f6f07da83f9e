//! The editing state machine of the calculator. A session turns key presses
//! (digits, operators, equals, sign and base changes) into operations on
//! [`Number`]s, and keeps the text that the display shows.

use super::base::Base;
use super::error::{NumberError, Result};
use super::float::{FloatFormat, FloatingPoint};
use super::number::Number;
use core::fmt::Display;

/// The binary operations that the calculator can defer until equals is
/// pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    Xor,
    Nor,
    ShiftLeft,
    ShiftRight,
}

impl Operation {
    /// Returns the label of the operation on the keypad.
    pub fn as_string(&self) -> &str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "x",
            Operation::Divide => "÷",
            Operation::And => "AND",
            Operation::Or => "OR",
            Operation::Xor => "XOR",
            Operation::Nor => "NOR",
            Operation::ShiftLeft => "<<",
            Operation::ShiftRight => ">>",
        }
    }

    /// Returns the operation with the keypad label `s`.
    pub fn from_string(s: &str) -> Option<Operation> {
        match s {
            "+" => Some(Operation::Add),
            "-" => Some(Operation::Subtract),
            "x" | "*" => Some(Operation::Multiply),
            "÷" | "/" => Some(Operation::Divide),
            "AND" => Some(Operation::And),
            "OR" => Some(Operation::Or),
            "XOR" => Some(Operation::Xor),
            "NOR" => Some(Operation::Nor),
            "<<" => Some(Operation::ShiftLeft),
            ">>" => Some(Operation::ShiftRight),
            _ => None,
        }
    }

    /// Returns true for the operations that only make sense for non-negative
    /// integers.
    pub fn is_bitwise(&self) -> bool {
        !matches!(
            self,
            Operation::Add
                | Operation::Subtract
                | Operation::Multiply
                | Operation::Divide
        )
    }

    /// Computes `lhs op rhs`.
    pub fn apply(&self, lhs: &Number, rhs: &Number) -> Result<Number> {
        match self {
            Operation::Add => lhs.add(rhs),
            Operation::Subtract => lhs.sub(rhs),
            Operation::Multiply => lhs.mul(rhs),
            Operation::Divide => lhs.div(rhs),
            Operation::And => Ok(lhs.and(rhs)),
            Operation::Or => Ok(lhs.or(rhs)),
            Operation::Xor => Ok(lhs.xor(rhs)),
            Operation::Nor => lhs.nor(rhs),
            Operation::ShiftLeft => Ok(lhs.shl(rhs)),
            Operation::ShiftRight => Ok(lhs.shr(rhs)),
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

/// The state of one interactive calculator.
///
/// The display text is edited in place. Pressing an operator only records
/// it; the next digit starts a new operand and moves the displayed number
/// into `prev_number`. Equals applies the pending operator.
///
/// Edits that can fail check their input before changing anything, so a
/// rejected edit leaves the session as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorSession {
    // The base of the display text.
    current_base: Base,
    // The display text.
    current_text: String,
    // Mirrors `current_text` containing a point.
    has_decimal_dot: bool,
    // Mirrors `current_text` starting with a minus.
    is_negative: bool,
    // The left operand of the pending operation.
    prev_number: Option<Number>,
    // The pending operation.
    prev_operation: Option<Operation>,
    // Set after an operator is pressed: the next digit starts a new operand.
    will_perform_operation: bool,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::with_base(Base::DECIMAL)
    }
}

impl CalculatorSession {
    /// Create a new session that shows "0" in base 10.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new session that shows "0" in base `base`.
    pub fn with_base(base: Base) -> Self {
        CalculatorSession {
            current_base: base,
            current_text: "0".to_string(),
            has_decimal_dot: false,
            is_negative: false,
            prev_number: None,
            prev_operation: None,
            will_perform_operation: false,
        }
    }

    pub fn current_base(&self) -> Base {
        self.current_base
    }

    pub fn current_text(&self) -> &str {
        &self.current_text
    }

    pub fn has_decimal_dot(&self) -> bool {
        self.has_decimal_dot
    }

    pub fn is_negative(&self) -> bool {
        self.is_negative
    }

    pub fn prev_number(&self) -> Option<&Number> {
        self.prev_number.as_ref()
    }

    pub fn prev_operation(&self) -> Option<Operation> {
        self.prev_operation
    }

    pub fn will_perform_operation(&self) -> bool {
        self.will_perform_operation
    }

    /// Returns the number on the display.
    pub fn current_number(&self) -> Result<Number> {
        Number::parse(&self.current_text, self.current_base)
    }

    /// Handle a press of the digit `digit`, or of the point ('.'). Digits
    /// that don't belong to the current base are rejected.
    pub fn add_digit(&mut self, digit: char) -> Result<()> {
        let is_dot = digit == '.';
        let digit = match self.current_base.digit_value(digit) {
            Some(d) => self.current_base.digit_char(d),
            None if is_dot => '.',
            None => {
                log::debug!("rejected digit {:?} in base {}", digit, self.current_base);
                return Err(NumberError::InvalidNumber);
            }
        };

        // Start a new operand. The displayed number becomes the left operand.
        if self.will_perform_operation {
            let prev = self.current_number().map_err(|err| {
                log::debug!("can't parse {:?} as an operand", self.current_text);
                err
            })?;
            self.prev_number = Some(prev);
            self.current_text = if is_dot {
                "0.".to_string()
            } else {
                digit.to_string()
            };
            self.has_decimal_dot = is_dot;
            self.is_negative = false;
            self.will_perform_operation = false;
            return Ok(());
        }

        // Only one point is allowed.
        if is_dot && self.has_decimal_dot {
            return Ok(());
        }

        // Replace a solitary zero.
        let text = if self.current_text == "0" && !is_dot {
            digit.to_string()
        } else {
            format!("{}{}", self.current_text, digit)
        };

        // The display must stay a number that the base can hold.
        if Number::parse(&text, self.current_base).is_err() {
            log::debug!("rejected digit {:?}, {:?} is out of range", digit, text);
            return Err(NumberError::InvalidNumber);
        }
        self.current_text = text;
        self.has_decimal_dot |= is_dot;
        Ok(())
    }

    /// Clear everything, including the pending operation.
    pub fn all_clear(&mut self) {
        *self = Self::with_base(self.current_base);
    }

    /// Returns true if the display can't be used as an operand of the
    /// bitwise operations.
    pub fn is_invalid_for_bit_operations(&self) -> bool {
        self.is_negative || self.has_decimal_dot
    }

    /// Record the operation `op`. It is evaluated when equals is pressed.
    /// Pressing another operator before that replaces it.
    pub fn perform_operation(&mut self, op: Operation) {
        log::trace!("pending operation {}", op);
        self.will_perform_operation = true;
        self.prev_operation = Some(op);
    }

    /// Returns true if `op` is pending and the next digit starts a new
    /// operand.
    pub fn is_operation_selected(&self, op: Operation) -> bool {
        self.will_perform_operation && self.prev_operation == Some(op)
    }

    /// Toggle the sign of the display. Zero has no sign.
    pub fn change_sign(&mut self) {
        if self.current_text == "0" {
            return;
        }
        if self.is_negative {
            self.current_text.remove(0);
        } else {
            self.current_text.insert(0, '-');
        }
        self.is_negative = !self.is_negative;
    }

    /// Convert the display to the base `new_base`.
    pub fn change_base(&mut self, new_base: Base) -> Result<()> {
        let number = self.current_number().map_err(|err| {
            log::debug!(
                "can't convert {:?} from base {} to base {}",
                self.current_text,
                self.current_base,
                new_base
            );
            err
        })?;
        self.current_text = number.format_in(new_base);
        self.has_decimal_dot = number.has_fract();
        self.is_negative = self.current_text.starts_with('-');
        self.current_base = new_base;
        Ok(())
    }

    /// Evaluate the pending operation. The left operand is the previous
    /// number, or the display itself if there is none. The result is shown
    /// in the current base and kept as the previous number. Without a
    /// pending operation nothing happens.
    pub fn solve(&mut self) -> Result<()> {
        let Some(op) = self.prev_operation else {
            log::trace!("nothing to solve");
            return Ok(());
        };

        let current = self.current_number()?;
        let lhs = self.prev_number.unwrap_or(current);
        let answer = op.apply(&lhs, &current).map_err(|err| {
            log::debug!("can't compute {} {} {}", lhs, op, current);
            err
        })?;

        let answer = answer.with_base(self.current_base);
        self.current_text = answer.format();
        self.has_decimal_dot = self.current_text.contains('.');
        self.is_negative = self.current_text.starts_with('-');
        self.prev_number = Some(answer);
        self.prev_operation = None;
        Ok(())
    }

    /// Returns the bit pattern of the display in the format `format`.
    pub fn floating_point(&self, format: FloatFormat) -> Result<FloatingPoint> {
        Ok(self.current_number()?.to_floating_point(format))
    }

    /// Returns the radix complement of the display.
    pub fn radix_complement(&self, digits: Option<usize>) -> Result<Number> {
        self.current_number()?.radix_complement(digits)
    }

    /// Returns the diminished radix complement of the display.
    pub fn radix_complement_diminished(
        &self,
        digits: Option<usize>,
    ) -> Result<Number> {
        self.current_number()?.radix_complement_diminished(digits)
    }
}

#[cfg(test)]
fn type_keys(session: &mut CalculatorSession, keys: &str) {
    for c in keys.chars() {
        session.add_digit(c).unwrap();
    }
}

#[test]
fn test_identity_state() {
    let s = CalculatorSession::new();
    assert_eq!(s.current_text(), "0");
    assert_eq!(s.current_base(), Base::DECIMAL);
    assert!(!s.has_decimal_dot());
    assert!(!s.is_negative());
    assert!(!s.will_perform_operation());
    assert!(s.prev_number().is_none());
    assert!(s.prev_operation().is_none());
}

#[test]
fn test_digit_entry() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "0");
    assert_eq!(s.current_text(), "0");
    type_keys(&mut s, "12");
    assert_eq!(s.current_text(), "12");
    type_keys(&mut s, ".");
    assert!(s.has_decimal_dot());
    type_keys(&mut s, "5.7");
    assert_eq!(s.current_text(), "12.57");

    let mut s = CalculatorSession::new();
    type_keys(&mut s, ".5");
    assert_eq!(s.current_text(), "0.5");
}

#[test]
fn test_digit_rejected() {
    let mut s = CalculatorSession::with_base(Base::BINARY);
    type_keys(&mut s, "101");
    assert_eq!(s.add_digit('2'), Err(NumberError::InvalidNumber));
    assert_eq!(s.add_digit('x'), Err(NumberError::InvalidNumber));
    assert_eq!(s.current_text(), "101");

    let mut s = CalculatorSession::with_base(Base::HEXADECIMAL);
    type_keys(&mut s, "fa");
    assert_eq!(s.current_text(), "FA");
}

#[test]
fn test_operation_flow() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "12");
    s.perform_operation(Operation::Add);
    assert!(s.is_operation_selected(Operation::Add));
    assert!(!s.is_operation_selected(Operation::Subtract));
    type_keys(&mut s, "30");
    assert!(!s.is_operation_selected(Operation::Add));
    assert_eq!(s.prev_number().unwrap().value(), 12.);
    assert_eq!(s.current_text(), "30");

    s.solve().unwrap();
    assert_eq!(s.current_text(), "42");
    assert!(s.prev_operation().is_none());
    assert_eq!(s.prev_number().unwrap().value(), 42.);

    // Without a pending operation equals does nothing.
    s.solve().unwrap();
    assert_eq!(s.current_text(), "42");
}

#[test]
fn test_operator_replaces_pending() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "9");
    s.perform_operation(Operation::Add);
    s.perform_operation(Operation::Multiply);
    type_keys(&mut s, "3");
    s.solve().unwrap();
    assert_eq!(s.current_text(), "27");
}

#[test]
fn test_solve_without_prev_number() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "5");
    s.perform_operation(Operation::Add);
    s.solve().unwrap();
    assert_eq!(s.current_text(), "10");
}

#[test]
fn test_all_operations() {
    let cases = [
        (Operation::Add, "14"),
        (Operation::Subtract, "6"),
        (Operation::Multiply, "40"),
        (Operation::Divide, "2.5"),
        (Operation::And, "0"),
        (Operation::Or, "14"),
        (Operation::Xor, "14"),
        (Operation::Nor, "1"),
        (Operation::ShiftLeft, "160"),
        (Operation::ShiftRight, "0"),
    ];
    for (op, expected) in cases {
        let mut s = CalculatorSession::new();
        type_keys(&mut s, "10");
        s.perform_operation(op);
        type_keys(&mut s, "4");
        s.solve().unwrap();
        assert_eq!(s.current_text(), expected, "10 {} 4", op);
    }
}

#[test]
fn test_negative_result() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "3");
    s.perform_operation(Operation::Subtract);
    type_keys(&mut s, "5");
    s.solve().unwrap();
    assert_eq!(s.current_text(), "-2");
    assert!(s.is_negative());
    assert!(s.is_invalid_for_bit_operations());
    s.change_sign();
    assert_eq!(s.current_text(), "2");
    assert!(!s.is_negative());
}

#[test]
fn test_fractional_result_syncs_dot() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "0.5");
    s.perform_operation(Operation::Add);
    type_keys(&mut s, "0.5");
    s.solve().unwrap();
    assert_eq!(s.current_text(), "1");
    assert!(!s.has_decimal_dot());

    s.perform_operation(Operation::Divide);
    type_keys(&mut s, "4");
    s.solve().unwrap();
    assert_eq!(s.current_text(), "0.25");
    assert!(s.has_decimal_dot());
}

#[test]
fn test_failed_solve_keeps_state() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "7");
    s.perform_operation(Operation::Divide);
    type_keys(&mut s, "0");
    let before = s.clone();
    assert_eq!(s.solve(), Err(NumberError::InvalidNumber));
    assert_eq!(s, before);
}

#[test]
fn test_change_sign() {
    let mut s = CalculatorSession::new();
    s.change_sign();
    assert_eq!(s.current_text(), "0");
    assert!(!s.is_negative());

    type_keys(&mut s, "8");
    s.change_sign();
    assert_eq!(s.current_text(), "-8");
    assert!(s.is_negative());
    s.change_sign();
    assert_eq!(s.current_text(), "8");
}

#[test]
fn test_change_base() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "255");
    s.change_base(Base::HEXADECIMAL).unwrap();
    assert_eq!(s.current_text(), "FF");
    assert_eq!(s.current_base(), Base::HEXADECIMAL);
    s.change_base(Base::BINARY).unwrap();
    assert_eq!(s.current_text(), "11111111");

    let mut s = CalculatorSession::with_base(Base::BINARY);
    type_keys(&mut s, "1010.1011");
    s.change_base(Base::HEXADECIMAL).unwrap();
    assert_eq!(s.current_text(), "A.B");
    assert!(s.has_decimal_dot());

    let mut s = CalculatorSession::new();
    type_keys(&mut s, "5.");
    s.change_base(Base::OCTAL).unwrap();
    assert_eq!(s.current_text(), "5");
    assert!(!s.has_decimal_dot());

    let mut s = CalculatorSession::new();
    type_keys(&mut s, "0.5");
    s.change_sign();
    s.change_base(Base::BINARY).unwrap();
    assert_eq!(s.current_text(), "-0.1");
    assert!(s.is_negative());
}

#[test]
fn test_overflowing_digit_rejected() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "1234567890123456789");
    let before = s.clone();
    assert_eq!(s.add_digit('0'), Err(NumberError::InvalidNumber));
    assert_eq!(s, before);

    // The session is still usable after the rejected key.
    s.perform_operation(Operation::Subtract);
    type_keys(&mut s, "9");
    assert_eq!(s.current_text(), "9");
    s.solve().unwrap();
    assert!(s.current_number().unwrap().value() > 1e18);
    s.change_base(Base::HEXADECIMAL).unwrap();
    assert_eq!(s.current_base(), Base::HEXADECIMAL);

    // A fraction whose scale doesn't fit is refused too.
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "0.000000000000000001");
    assert_eq!(s.add_digit('1'), Err(NumberError::InvalidNumber));
    assert_eq!(s.current_text(), "0.000000000000000001");
    s.change_base(Base::BINARY).unwrap();
}

#[test]
fn test_solve_after_base_change() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "100");
    s.perform_operation(Operation::Divide);
    type_keys(&mut s, "4");
    s.change_base(Base::HEXADECIMAL).unwrap();
    s.solve().unwrap();
    assert_eq!(s.current_base(), Base::HEXADECIMAL);
    assert_eq!(s.current_text(), "19");
    assert_eq!(s.current_number().unwrap().value(), 25.);
    assert_eq!(s.prev_number().unwrap().base(), Base::HEXADECIMAL);

    let mut s = CalculatorSession::with_base(Base::BINARY);
    type_keys(&mut s, "110");
    s.perform_operation(Operation::Add);
    type_keys(&mut s, "1");
    s.change_base(Base::OCTAL).unwrap();
    s.solve().unwrap();
    assert_eq!(s.current_text(), "7");
}

#[test]
fn test_tiny_negative_result_has_no_sign() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "0");
    s.perform_operation(Operation::Subtract);
    type_keys(&mut s, "0.00000000001");
    s.solve().unwrap();
    assert_eq!(s.current_text(), "0");
    assert!(!s.is_negative());
    assert!(!s.has_decimal_dot());
    assert!(!s.is_invalid_for_bit_operations());
}

#[test]
fn test_all_clear() {
    let mut s = CalculatorSession::with_base(Base::OCTAL);
    type_keys(&mut s, "17.4");
    s.change_sign();
    s.perform_operation(Operation::Xor);
    s.all_clear();
    assert_eq!(s, CalculatorSession::with_base(Base::OCTAL));
}

#[test]
fn test_panels() {
    let mut s = CalculatorSession::new();
    type_keys(&mut s, "39887.5625");
    let fp = s.floating_point(FloatFormat::SINGLE).unwrap();
    assert_eq!(fp.to_string(), "0 10001110 00110111100111110010000");

    let mut s = CalculatorSession::new();
    type_keys(&mut s, "7312");
    let c = s.radix_complement(Some(6)).unwrap();
    assert_eq!(c.format(), "992688");
    let c = s.radix_complement_diminished(None).unwrap();
    assert_eq!(c.format(), "2687");
}

#[test]
fn test_operation_labels() {
    for op in [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::And,
        Operation::Or,
        Operation::Xor,
        Operation::Nor,
        Operation::ShiftLeft,
        Operation::ShiftRight,
    ] {
        assert_eq!(Operation::from_string(op.as_string()), Some(op));
    }
    assert_eq!(Operation::from_string("%"), None);
    assert!(Operation::Nor.is_bitwise());
    assert!(!Operation::Divide.is_bitwise());
}
