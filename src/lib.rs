mod arithmetic;
mod base;
mod bitwise;
mod complement;
mod error;
mod float;
mod number;
mod session;
mod string;
mod utils;

#[cfg(feature = "python")]
mod py;

pub use self::base::Base;
pub use self::error::{NumberError, Result};
pub use self::float::{FloatFormat, FloatingPoint};
pub use self::number::Number;
pub use self::session::{CalculatorSession, Operation};
pub use self::string::{DEFAULT_PRECISION, FRACTION_TOLERANCE};
