use crate::{
    Base, CalculatorSession, FloatFormat, FloatingPoint, Number, NumberError,
    Operation, DEFAULT_PRECISION,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<NumberError> for PyErr {
    fn from(err: NumberError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn to_base(radix: u32) -> PyResult<Base> {
    Ok(Base::try_from(radix)?)
}

/// The bit widths of a binary floating point format.
#[pyclass(name = "FloatFormat")]
struct PyFloatFormat {
    inner: FloatFormat,
}

#[pymethods]
impl PyFloatFormat {
    /// Create a new format.
    ///
    /// Args:
    ///     exponent: The number of exponent bits (1 to 62)
    ///     mantissa: The number of mantissa bits, without the implicit bit
    #[new]
    fn new(exponent: usize, mantissa: usize) -> PyResult<Self> {
        let inner = FloatFormat::new(exponent, mantissa)
            .ok_or_else(|| PyValueError::new_err("invalid exponent width"))?;
        Ok(PyFloatFormat { inner })
    }
    /// Returns the length of the exponent in bits.
    fn get_exponent_len(&self) -> usize {
        self.inner.get_exponent_len()
    }
    /// Returns the length of the mantissa in bits.
    fn get_mantissa_len(&self) -> usize {
        self.inner.get_mantissa_len()
    }
    /// Returns the exponent bias.
    fn get_bias(&self) -> i64 {
        self.inner.get_bias()
    }
    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        self.__str__()
    }
}

/// The sign, exponent and mantissa bits of a number.
#[pyclass(name = "FloatingPoint")]
struct PyFloatingPoint {
    inner: FloatingPoint,
}

#[pymethods]
impl PyFloatingPoint {
    /// Returns the sign bit.
    fn sign(&self) -> String {
        self.inner.sign().to_string()
    }
    /// Returns the biased exponent bits.
    fn exponent(&self) -> String {
        self.inner.exponent().to_string()
    }
    /// Returns the mantissa bits.
    fn mantissa(&self) -> String {
        self.inner.mantissa().to_string()
    }
    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        self.__str__()
    }
}

/// A number that is displayed in a base between 2 and 16.
#[pyclass(name = "Number")]
struct PyNumber {
    inner: Number,
}

impl From<Number> for PyNumber {
    fn from(inner: Number) -> Self {
        PyNumber { inner }
    }
}

#[pymethods]
impl PyNumber {
    /// Parse a number.
    ///
    /// Args:
    ///     text: The digits, with an optional sign and point
    ///     base: The base of the digits (2 to 16)
    #[new]
    #[pyo3(signature = (text, base=10))]
    fn new(text: &str, base: u32) -> PyResult<Self> {
        Ok(Number::parse(text, to_base(base)?)?.into())
    }
    /// Returns the value as a float.
    fn value(&self) -> f64 {
        self.inner.value()
    }
    /// Returns the display base.
    fn base(&self) -> u32 {
        self.inner.base().radix()
    }
    /// Returns true if the number has a fractional part.
    fn has_fract(&self) -> bool {
        self.inner.has_fract()
    }
    /// Print the number in `base` (default: its own base) with up to
    /// `precision` fractional digits.
    #[pyo3(signature = (base=None, precision=DEFAULT_PRECISION))]
    fn format(&self, base: Option<u32>, precision: usize) -> PyResult<String> {
        let base = match base {
            Some(radix) => to_base(radix)?,
            None => self.inner.base(),
        };
        Ok(self.inner.format_with(base, precision))
    }
    fn __str__(&self) -> String {
        self.inner.to_string()
    }
    fn __repr__(&self) -> String {
        format!("Number({:?}, base={})", self.inner.format(), self.inner.base())
    }

    fn __add__(&self, other: &PyNumber) -> PyResult<PyNumber> {
        Ok(self.inner.add(&other.inner)?.into())
    }
    fn __sub__(&self, other: &PyNumber) -> PyResult<PyNumber> {
        Ok(self.inner.sub(&other.inner)?.into())
    }
    fn __mul__(&self, other: &PyNumber) -> PyResult<PyNumber> {
        Ok(self.inner.mul(&other.inner)?.into())
    }
    fn __truediv__(&self, other: &PyNumber) -> PyResult<PyNumber> {
        Ok(self.inner.div(&other.inner)?.into())
    }
    fn __and__(&self, other: &PyNumber) -> PyNumber {
        self.inner.and(&other.inner).into()
    }
    fn __or__(&self, other: &PyNumber) -> PyNumber {
        self.inner.or(&other.inner).into()
    }
    fn __xor__(&self, other: &PyNumber) -> PyNumber {
        self.inner.xor(&other.inner).into()
    }
    fn __lshift__(&self, other: &PyNumber) -> PyNumber {
        self.inner.shl(&other.inner).into()
    }
    fn __rshift__(&self, other: &PyNumber) -> PyNumber {
        self.inner.shr(&other.inner).into()
    }
    /// Returns NOT (self OR other), complemented over the binary width.
    fn nor(&self, other: &PyNumber) -> PyResult<PyNumber> {
        Ok(self.inner.nor(&other.inner)?.into())
    }
    /// Multiply by a float, keeping the base.
    fn mul_float(&self, other: f64) -> PyResult<PyNumber> {
        Ok(self.inner.mul_f64(other)?.into())
    }
    /// Divide by a float, keeping the base.
    fn div_float(&self, other: f64) -> PyResult<PyNumber> {
        Ok(self.inner.div_f64(other)?.into())
    }
    /// Returns base^digits - self.
    #[pyo3(signature = (digits=None))]
    fn radix_complement(&self, digits: Option<usize>) -> PyResult<PyNumber> {
        Ok(self.inner.radix_complement(digits)?.into())
    }
    /// Returns base^digits - self - 1.
    #[pyo3(signature = (digits=None))]
    fn radix_complement_diminished(
        &self,
        digits: Option<usize>,
    ) -> PyResult<PyNumber> {
        Ok(self.inner.radix_complement_diminished(digits)?.into())
    }
    /// Returns the floating point bits of the number in `format`.
    fn to_floating_point(&self, format: &PyFloatFormat) -> PyFloatingPoint {
        PyFloatingPoint {
            inner: self.inner.to_floating_point(format.inner),
        }
    }
}

/// The editing state of a calculator.
#[pyclass(name = "CalculatorSession")]
struct PyCalculatorSession {
    inner: CalculatorSession,
}

#[pymethods]
impl PyCalculatorSession {
    #[new]
    #[pyo3(signature = (base=10))]
    fn new(base: u32) -> PyResult<Self> {
        Ok(PyCalculatorSession {
            inner: CalculatorSession::with_base(to_base(base)?),
        })
    }
    fn current_text(&self) -> String {
        self.inner.current_text().to_string()
    }
    fn current_base(&self) -> u32 {
        self.inner.current_base().radix()
    }
    fn has_decimal_dot(&self) -> bool {
        self.inner.has_decimal_dot()
    }
    fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }
    fn is_invalid_for_bit_operations(&self) -> bool {
        self.inner.is_invalid_for_bit_operations()
    }
    /// Press a digit or the point.
    fn add_digit(&mut self, digit: char) -> PyResult<()> {
        Ok(self.inner.add_digit(digit)?)
    }
    /// Press an operator, by its keypad label ("+", "x", "NOR", ...).
    fn perform_operation(&mut self, op: &str) -> PyResult<()> {
        let op = Operation::from_string(op)
            .ok_or_else(|| PyValueError::new_err("unknown operation"))?;
        self.inner.perform_operation(op);
        Ok(())
    }
    /// Returns true if the operator `op` is pending.
    fn is_operation_selected(&self, op: &str) -> bool {
        Operation::from_string(op)
            .map(|op| self.inner.is_operation_selected(op))
            .unwrap_or(false)
    }
    /// Press equals.
    fn solve(&mut self) -> PyResult<()> {
        Ok(self.inner.solve()?)
    }
    fn change_sign(&mut self) {
        self.inner.change_sign()
    }
    fn change_base(&mut self, base: u32) -> PyResult<()> {
        Ok(self.inner.change_base(to_base(base)?)?)
    }
    fn all_clear(&mut self) {
        self.inner.all_clear()
    }
    /// Returns the floating point bits of the display in `format`.
    fn floating_point(
        &self,
        format: &PyFloatFormat,
    ) -> PyResult<PyFloatingPoint> {
        Ok(PyFloatingPoint {
            inner: self.inner.floating_point(format.inner)?,
        })
    }
    fn __str__(&self) -> String {
        self.current_text()
    }
}

#[pymodule]
fn _basecalc(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyNumber>()?;
    m.add_class::<PyFloatFormat>()?;
    m.add_class::<PyFloatingPoint>()?;
    m.add_class::<PyCalculatorSession>()?;
    Ok(())
}
