//! Hex-string helpers.

use crate::error::InputFormatError;

/// Prefix marking hexadecimal fields on the wire.
pub const HEX_PREFIX: &str = "0x";

/// Decode a `0x`-prefixed, case-insensitive hex field into raw bytes.
pub fn decode_prefixed(name: &'static str, field: &str) -> Result<Vec<u8>, InputFormatError> {
    let digits = field
        .strip_prefix(HEX_PREFIX)
        .ok_or(InputFormatError::MissingPrefix(name))?;
    hex::decode(digits).map_err(|e| InputFormatError::InvalidHex(name, e))
}

/// Hex-encode bytes with the `0x` prefix.
pub fn encode_prefixed(bytes: &[u8]) -> String {
    format!("{}{}", HEX_PREFIX, hex::encode(bytes))
}

/// Reduce an integer field to its minimal big-endian form by stripping
/// leading zero bytes. The value zero becomes the empty byte string.
pub fn minimal_be(bytes: Vec<u8>) -> Vec<u8> {
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    if skip == 0 {
        bytes
    } else {
        bytes[skip..].to_vec()
    }
}
