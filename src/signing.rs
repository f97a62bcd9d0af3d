//! Signing capabilities and utilities.

use crate::types::{Address, H256};
use once_cell::sync::Lazy;
use secp256k1::{
    recovery::{RecoverableSignature, RecoveryId},
    All, Message, PublicKey, Secp256k1,
};

pub use secp256k1::SecretKey;

/// Recovery-indicator offset of the legacy replay-protected wire encoding.
///
/// The raw recovery id in {0, 1} is remapped to `id + offset` before it is
/// written into the transaction, so the default produces `v` bytes of 37 or
/// 38. Callers targeting a network with a different replay scheme pass
/// their own offset to [`sign`].
pub const LEGACY_REPLAY_OFFSET: u8 = 37;

/// Error during signing.
#[derive(Debug, derive_more::Display, PartialEq, Clone)]
pub enum SigningError {
    /// A message to sign is invalid. Has to be a non-zero 32-bytes slice.
    #[display(fmt = "Message has to be a non-zero 32-bytes slice.")]
    InvalidMessage,
    /// The private key is invalid. Has to be a 32-byte scalar within the
    /// curve order, and non-zero.
    #[display(fmt = "Private key is not a valid curve scalar.")]
    InvalidKey,
}
impl std::error::Error for SigningError {}

/// Error during sender recovery.
#[derive(Debug, derive_more::Display, PartialEq, Clone)]
pub enum RecoveryError {
    /// A message to recover is invalid. Has to be a non-zero 32-bytes slice.
    #[display(fmt = "Message has to be a non-zero 32-bytes slice.")]
    InvalidMessage,
    /// A signature is invalid and the sender could not be recovered.
    #[display(fmt = "Signature is invalid (check recovery id).")]
    InvalidSignature,
}
impl std::error::Error for RecoveryError {}

// Curve context is expensive to build; initialized once, immutable, and
// shared read-only across callers.
static CONTEXT: Lazy<Secp256k1<All>> = Lazy::new(Secp256k1::new);

/// The components of a recoverable signature in wire form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Recovery indicator with the replay offset applied.
    pub v: u8,
    /// R component of the signature.
    pub r: H256,
    /// S component of the signature.
    pub s: H256,
}

/// Parse a raw 32-byte private key.
pub fn secret_key_from_slice(raw: &[u8]) -> Result<SecretKey, SigningError> {
    SecretKey::from_slice(raw).map_err(|_| SigningError::InvalidKey)
}

/// Sign a 32-byte digest with the given key.
///
/// Nonce generation is deterministic (RFC6979), so the same digest and key
/// always yield the same signature. The raw recovery id is remapped to
/// `id + replay_offset` before being returned as `v`.
pub fn sign(digest: &[u8], key: &SecretKey, replay_offset: u8) -> Result<Signature, SigningError> {
    let message = Message::from_slice(digest).map_err(|_| SigningError::InvalidMessage)?;
    let (recovery_id, signature) = CONTEXT.sign_recoverable(&message, key).serialize_compact();

    let v = recovery_id.to_i32() as u8 + replay_offset;
    let r = H256::from_slice(&signature[..32]);
    let s = H256::from_slice(&signature[32..]);

    Ok(Signature { v, r, s })
}

/// Recover a sender, given the digest that was signed, the 64-byte compact
/// signature and the raw recovery id (offset already removed).
pub fn recover(digest: &[u8], signature: &[u8], recovery_id: i32) -> Result<Address, RecoveryError> {
    let message = Message::from_slice(digest).map_err(|_| RecoveryError::InvalidMessage)?;
    let recovery_id = RecoveryId::from_i32(recovery_id).map_err(|_| RecoveryError::InvalidSignature)?;
    let signature =
        RecoverableSignature::from_compact(signature, recovery_id).map_err(|_| RecoveryError::InvalidSignature)?;
    let public_key = CONTEXT
        .recover(&message, &signature)
        .map_err(|_| RecoveryError::InvalidSignature)?;

    Ok(public_key_address(&public_key))
}

/// Gets the address of a public key.
///
/// The public address is defined as the low 20 bytes of the keccak hash of
/// the public key. Note that the public key returned from the `secp256k1`
/// crate is 65 bytes long, that is because it is prefixed by `0x04` to
/// indicate an uncompressed public key; this first byte is ignored when
/// computing the hash.
pub fn public_key_address(public_key: &PublicKey) -> Address {
    let public_key = public_key.serialize_uncompressed();

    debug_assert_eq!(public_key[0], 0x04);
    let hash = keccak256(&public_key[1..]);

    Address::from_slice(&hash[12..])
}

/// Gets the public address of a private key.
pub fn secret_key_address(key: &SecretKey) -> Address {
    let secp = &*CONTEXT;
    let public_key = PublicKey::from_secret_key(secp, key);
    public_key_address(&public_key)
}

/// Compute the Keccak-256 hash of input bytes.
pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    use tiny_keccak::{Hasher, Keccak};
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(bytes);
    hasher.finalize(&mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const KEY: [u8; 32] = hex!("4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318");

    #[test]
    fn keccak_empty_input() {
        assert_eq!(
            keccak256(b""),
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn known_key_address() {
        // key/address pair from the web3.js account docs
        let key = SecretKey::from_slice(&KEY).unwrap();
        assert_eq!(
            secret_key_address(&key),
            Address::from_slice(&hex!("2c7536E3605D9C16a7a3D7b1898e529396a65c23"))
        );
    }

    #[test]
    fn signing_is_deterministic() {
        let key = SecretKey::from_slice(&KEY).unwrap();
        let digest = keccak256(b"determinism");

        let first = sign(&digest, &key, LEGACY_REPLAY_OFFSET).unwrap();
        let second = sign(&digest, &key, LEGACY_REPLAY_OFFSET).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn v_carries_replay_offset() {
        let key = SecretKey::from_slice(&KEY).unwrap();
        let digest = keccak256(b"offset");

        let legacy = sign(&digest, &key, LEGACY_REPLAY_OFFSET).unwrap();
        assert!(legacy.v == 37 || legacy.v == 38);

        let electrum = sign(&digest, &key, 27).unwrap();
        assert_eq!(electrum.v - 27, legacy.v - LEGACY_REPLAY_OFFSET);
    }

    #[test]
    fn recovered_sender_matches_signer() {
        let key = SecretKey::from_slice(&KEY).unwrap();
        let digest = keccak256(b"recover me");

        let signature = sign(&digest, &key, LEGACY_REPLAY_OFFSET).unwrap();
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(signature.r.as_bytes());
        compact[32..].copy_from_slice(signature.s.as_bytes());

        let recovery_id = (signature.v - LEGACY_REPLAY_OFFSET) as i32;
        let sender = recover(&digest, &compact, recovery_id).unwrap();
        assert_eq!(sender, secret_key_address(&key));
    }

    #[test]
    fn zero_key_is_rejected() {
        assert_eq!(secret_key_from_slice(&[0u8; 32]), Err(SigningError::InvalidKey));
        assert_eq!(secret_key_from_slice(&[1u8; 16]), Err(SigningError::InvalidKey));
    }

    #[test]
    fn short_digest_is_rejected() {
        let key = SecretKey::from_slice(&KEY).unwrap();
        assert_eq!(
            sign(&[0u8; 16], &key, LEGACY_REPLAY_OFFSET),
            Err(SigningError::InvalidMessage)
        );
    }
}
