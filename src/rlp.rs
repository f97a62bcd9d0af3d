//! Recursive-length-prefix (RLP) codec.
//!
//! Transaction fields are encoded as a list of byte strings using the
//! canonical two-tier length-prefix scheme: strings use base offsets
//! `0x80` (short) and `0xB7` (long), lists `0xC0` and `0xF7`, with the
//! short/long boundary at a 55-byte payload. A single byte below `0x80`
//! encodes as itself. The encode path cannot fail; the decode path
//! rejects truncated and non-canonical input with [`FormatError`].

use derive_more::Display;

/// One encodable item: a raw byte string or a nested sequence of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// An opaque byte string, possibly empty.
    Bytes(Vec<u8>),
    /// A nested list of items.
    List(Vec<Item>),
}

impl From<Vec<u8>> for Item {
    fn from(bytes: Vec<u8>) -> Self {
        Item::Bytes(bytes)
    }
}

impl From<&[u8]> for Item {
    fn from(bytes: &[u8]) -> Self {
        Item::Bytes(bytes.to_vec())
    }
}

impl From<Vec<Item>> for Item {
    fn from(items: Vec<Item>) -> Self {
        Item::List(items)
    }
}

/// Malformed encoding encountered while decoding.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// a length prefix declares more bytes than remain in the input
    #[display(fmt = "length prefix declares more bytes than remain")]
    Truncated,
    /// a value below 0x80 was wrapped in a length prefix instead of the
    /// single-byte fast path
    #[display(fmt = "non-canonical single-byte encoding")]
    NonCanonical,
    /// input continues past a complete top-level item
    #[display(fmt = "trailing bytes after top-level item")]
    TrailingBytes,
}

impl std::error::Error for FormatError {}

/// Encode a single item.
pub fn encode(item: &Item) -> Vec<u8> {
    let mut out = Vec::new();
    append_item(&mut out, item);
    out
}

/// Encode a sequence of items as a list. This is the transaction wire form.
pub fn encode_list(items: &[Item]) -> Vec<u8> {
    let mut payload = Vec::new();
    for item in items {
        append_item(&mut payload, item);
    }
    let mut out = Vec::new();
    append_length(&mut out, payload.len(), 0xc0);
    out.extend_from_slice(&payload);
    out
}

fn append_item(out: &mut Vec<u8>, item: &Item) {
    match item {
        Item::Bytes(bytes) => append_bytes(out, bytes),
        Item::List(items) => {
            let encoded = encode_list(items);
            out.extend_from_slice(&encoded);
        }
    }
}

fn append_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    if bytes.len() == 1 && bytes[0] < 0x80 {
        out.push(bytes[0]);
    } else {
        append_length(out, bytes.len(), 0x80);
        out.extend_from_slice(bytes);
    }
}

// Short lengths (<= 55) fold into the prefix byte; longer ones follow it
// as a minimal big-endian integer.
fn append_length(out: &mut Vec<u8>, len: usize, offset: u8) {
    if len <= 55 {
        out.push(offset + len as u8);
    } else {
        let len_be = uint_to_bytes(len as u64);
        out.push(offset + 55 + len_be.len() as u8);
        out.extend_from_slice(&len_be);
    }
}

/// Minimal big-endian byte representation of an integer; zero becomes the
/// empty byte string.
pub fn uint_to_bytes(value: u64) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    bytes[skip..].to_vec()
}

/// Decode a complete top-level item, rejecting trailing input.
pub fn decode(input: &[u8]) -> Result<Item, FormatError> {
    let (item, rest) = decode_item(input)?;
    if !rest.is_empty() {
        return Err(FormatError::TrailingBytes);
    }
    Ok(item)
}

fn decode_item(input: &[u8]) -> Result<(Item, &[u8]), FormatError> {
    let (&prefix, rest) = input.split_first().ok_or(FormatError::Truncated)?;
    match prefix {
        0x00..=0x7f => Ok((Item::Bytes(vec![prefix]), rest)),
        0x80..=0xb7 => {
            let len = (prefix - 0x80) as usize;
            let (payload, rest) = take(rest, len)?;
            if len == 1 && payload[0] < 0x80 {
                return Err(FormatError::NonCanonical);
            }
            Ok((Item::Bytes(payload.to_vec()), rest))
        }
        0xb8..=0xbf => {
            let (len, rest) = decode_length(rest, (prefix - 0xb7) as usize)?;
            let (payload, rest) = take(rest, len)?;
            Ok((Item::Bytes(payload.to_vec()), rest))
        }
        0xc0..=0xf7 => {
            let len = (prefix - 0xc0) as usize;
            let (payload, rest) = take(rest, len)?;
            Ok((Item::List(decode_list_payload(payload)?), rest))
        }
        0xf8..=0xff => {
            let (len, rest) = decode_length(rest, (prefix - 0xf7) as usize)?;
            let (payload, rest) = take(rest, len)?;
            Ok((Item::List(decode_list_payload(payload)?), rest))
        }
    }
}

fn decode_length(input: &[u8], len_of_len: usize) -> Result<(usize, &[u8]), FormatError> {
    let (len_be, rest) = take(input, len_of_len)?;
    let mut len = 0usize;
    for &b in len_be {
        len = len.checked_mul(256).ok_or(FormatError::Truncated)? + b as usize;
    }
    Ok((len, rest))
}

fn decode_list_payload(mut payload: &[u8]) -> Result<Vec<Item>, FormatError> {
    let mut items = Vec::new();
    while !payload.is_empty() {
        let (item, rest) = decode_item(payload)?;
        items.push(item);
        payload = rest;
    }
    Ok(items)
}

fn take(input: &[u8], len: usize) -> Result<(&[u8], &[u8]), FormatError> {
    if input.len() < len {
        return Err(FormatError::Truncated);
    }
    Ok(input.split_at(len))
}
