//! Fixed-width value types shared across the crate.

pub use ethereum_types::{Address, H256};

/// Length in bytes of a recipient address.
pub const ADDRESS_LENGTH: usize = 20;

/// Length in bytes of a raw private key.
pub const SECRET_KEY_LENGTH: usize = 32;
