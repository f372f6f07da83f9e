use thiserror::Error;

/// The error that is reported when text can't be turned into a number.
///
/// This covers digits that are not valid in the requested base, malformed
/// input (empty, lone sign, more than one point), and magnitudes that don't
/// fit the 64-bit integers used for the exact digit conversion. Operations
/// that re-parse their result report the same error when the result can't
/// be represented (for example, division by zero or huge products).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    #[error("invalid number for the selected base")]
    InvalidNumber,
}

pub type Result<T> = core::result::Result<T, NumberError>;

#[test]
fn test_error_message() {
    let err = NumberError::InvalidNumber;
    assert_eq!(err.to_string(), "invalid number for the selected base");
}
