//! Crate-wide error types.

use crate::{rlp, signing};
use derive_more::{Display, From};

/// Signing pipeline `Result` type.
pub type Result<T = ()> = std::result::Result<T, Error>;

/// A malformed caller-supplied field, rejected before any decoding or
/// cryptography takes place.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum InputFormatError {
    /// The field is missing the `0x` prefix.
    #[display(fmt = "field `{}` is missing the 0x prefix", _0)]
    MissingPrefix(&'static str),
    /// The field contains non-hex characters or an odd number of digits.
    #[display(fmt = "field `{}` is not valid hex: {}", _0, _1)]
    InvalidHex(&'static str, hex::FromHexError),
    /// The field decoded to the wrong number of bytes.
    #[display(fmt = "field `{}` must be {} bytes, got {}", _0, _1, _2)]
    InvalidLength(&'static str, usize, usize),
}

impl std::error::Error for InputFormatError {}

/// Errors surfaced by the transaction signing pipeline.
#[derive(Debug, Display, From, Clone, PartialEq)]
pub enum Error {
    /// a supplied field failed validation
    #[display(fmt = "Input error: {}", _0)]
    InputFormat(InputFormatError),
    /// malformed length-prefixed encoding encountered while decoding
    #[display(fmt = "Codec error: {}", _0)]
    Codec(rlp::FormatError),
    /// the curve operation rejected the key/digest pair
    #[display(fmt = "Signing error: {}", _0)]
    Signing(signing::SigningError),
    /// sender recovery failed
    #[display(fmt = "Recovery error: {}", _0)]
    Recovery(signing::RecoveryError),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::Error::*;
        match *self {
            InputFormat(ref e) => Some(e),
            Codec(ref e) => Some(e),
            Signing(ref e) => Some(e),
            Recovery(ref e) => Some(e),
        }
    }
}
