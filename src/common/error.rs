use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // QR builder
    #[error("data too long")]
    DataTooLong,
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid error correction level")]
    InvalidECLevel,
    #[error("invalid character")]
    InvalidChar,
    #[error("invalid masking pattern")]
    InvalidMaskingPattern,
    #[error("module ({0}, {1}) is out of range")]
    IndexOutOfRange(usize, usize),

    // Error correction
    #[error("logarithm of zero is undefined")]
    InvalidFieldOperand,
    #[error("malformed polynomial")]
    MalformedPolynomial,
}

pub type QRResult<T> = Result<T, QRError>;
