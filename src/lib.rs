//! Legacy Ethereum transaction encoding and signing.
//!
//! Deterministic pipeline turning a private key and a set of transaction
//! fields into the canonical signed, serialized transaction: validate and
//! decode the `0x`-prefixed hex inputs, RLP-encode the six unsigned fields,
//! keccak-256 the encoding, produce a recoverable secp256k1 signature over
//! the digest and re-encode the nine-field signed form.
//!
//! ```
//! let raw = rawtx::sign_transaction(
//!     "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
//!     "0x09",                                         // nonce
//!     "0x04a817c800",                                 // gas price
//!     "0x5208",                                       // gas limit
//!     "0x3535353535353535353535353535353535353535",   // to
//!     "0x0de0b6b3a7640000",                           // value
//!     "",                                             // data
//! )?;
//! assert!(raw.starts_with("0xf86c09"));
//! # Ok::<(), rawtx::Error>(())
//! ```
//!
//! Every call is an independent, synchronous, CPU-only computation; the
//! only process-wide state is the lazily initialized curve context, which
//! is immutable after initialization and safe to share across threads.

#![warn(missing_docs)]

pub mod error;
pub mod helpers;
pub mod rlp;
pub mod signing;
pub mod transaction;
pub mod types;

pub use crate::{
    error::{Error, InputFormatError, Result},
    signing::{SecretKey, LEGACY_REPLAY_OFFSET},
    transaction::{sign_transaction, SignedTransaction, Transaction},
};
