//! Transaction assembly: field validation, hashing and the signing
//! entry point.

use crate::{
    error::{InputFormatError, Result},
    helpers,
    rlp::{self, Item},
    signing::{self, SecretKey, Signature, LEGACY_REPLAY_OFFSET},
    types::{Address, H256, ADDRESS_LENGTH, SECRET_KEY_LENGTH},
};

/// A transaction used for RLP encoding, hashing and signing.
///
/// Numeric fields are held in minimal big-endian form (no leading zero
/// bytes; zero itself is the empty byte string), `data` is opaque and the
/// recipient is always exactly 20 bytes. Field order is fixed and
/// determines both the signed digest and the wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Sender account nonce.
    pub nonce: Vec<u8>,
    /// Gas price in wei.
    pub gas_price: Vec<u8>,
    /// Gas limit.
    pub gas: Vec<u8>,
    /// Recipient address.
    pub to: Address,
    /// Transferred value in wei.
    pub value: Vec<u8>,
    /// Call payload, possibly empty.
    pub data: Vec<u8>,
}

/// Result of transaction signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// The digest of the unsigned encoding that was signed.
    pub message_hash: H256,
    /// Recovery indicator with the replay offset applied.
    pub v: u8,
    /// R component of the signature.
    pub r: H256,
    /// S component of the signature.
    pub s: H256,
    /// The nine-field signed wire encoding, ready for broadcast.
    pub raw_transaction: Vec<u8>,
}

impl Transaction {
    /// Validate `0x`-prefixed hex fields and decode them into a
    /// transaction.
    ///
    /// Every field must carry the prefix and contain an even number of hex
    /// digits; `to` must decode to exactly 20 bytes. Only `data` may be the
    /// empty string. Numeric fields are reduced to minimal big-endian form.
    pub fn from_hex_fields(
        nonce: &str,
        gas_price: &str,
        gas: &str,
        to: &str,
        value: &str,
        data: &str,
    ) -> Result<Self> {
        let nonce = numeric_field("nonce", nonce)?;
        let gas_price = numeric_field("gas_price", gas_price)?;
        let gas = numeric_field("gas", gas)?;
        let value = numeric_field("value", value)?;

        let to_raw = helpers::decode_prefixed("to", to)?;
        if to_raw.len() != ADDRESS_LENGTH {
            return Err(InputFormatError::InvalidLength("to", ADDRESS_LENGTH, to_raw.len()).into());
        }
        let to = Address::from_slice(&to_raw);

        let data = if data.is_empty() {
            Vec::new()
        } else {
            helpers::decode_prefixed("data", data)?
        };

        Ok(Transaction {
            nonce,
            gas_price,
            gas,
            to,
            value,
            data,
        })
    }

    /// The six-field pre-signature sequence, in wire order.
    fn unsigned_fields(&self) -> Vec<Item> {
        vec![
            Item::Bytes(self.nonce.clone()),
            Item::Bytes(self.gas_price.clone()),
            Item::Bytes(self.gas.clone()),
            Item::Bytes(self.to.as_bytes().to_vec()),
            Item::Bytes(self.value.clone()),
            Item::Bytes(self.data.clone()),
        ]
    }

    /// The nine-field signed sequence: the unsigned fields followed by
    /// `[v, r, s]`.
    fn signed_fields(&self, signature: &Signature) -> Vec<Item> {
        let mut fields = self.unsigned_fields();
        fields.push(Item::Bytes(vec![signature.v]));
        fields.push(Item::Bytes(signature.r.as_bytes().to_vec()));
        fields.push(Item::Bytes(signature.s.as_bytes().to_vec()));
        fields
    }

    /// Sign and return the raw signed transaction.
    ///
    /// Encodes the unsigned fields, hashes the encoding, signs the digest
    /// and re-encodes with the signature appended. `replay_offset` is added
    /// to the raw recovery id to form the `v` byte;
    /// [`LEGACY_REPLAY_OFFSET`] is the default wire convention.
    pub fn sign(&self, key: &SecretKey, replay_offset: u8) -> Result<SignedTransaction> {
        let unsigned = rlp::encode_list(&self.unsigned_fields());
        let digest = signing::keccak256(&unsigned);
        let signature = signing::sign(&digest, key, replay_offset)?;

        let raw_transaction = rlp::encode_list(&self.signed_fields(&signature));
        log::trace!(
            "signed transaction to {:?}: {} unsigned bytes, {} signed bytes",
            self.to,
            unsigned.len(),
            raw_transaction.len(),
        );

        Ok(SignedTransaction {
            message_hash: H256::from(digest),
            v: signature.v,
            r: signature.r,
            s: signature.s,
            raw_transaction,
        })
    }
}

fn numeric_field(name: &'static str, field: &str) -> Result<Vec<u8>> {
    let raw = helpers::decode_prefixed(name, field)?;
    Ok(helpers::minimal_be(raw))
}

fn private_key_field(private_key: &str) -> Result<SecretKey> {
    // the key is accepted with or without the 0x prefix
    let digits = private_key.strip_prefix(helpers::HEX_PREFIX).unwrap_or(private_key);
    let raw = hex::decode(digits).map_err(|e| InputFormatError::InvalidHex("private_key", e))?;
    if raw.len() != SECRET_KEY_LENGTH {
        return Err(InputFormatError::InvalidLength("private_key", SECRET_KEY_LENGTH, raw.len()).into());
    }
    Ok(signing::secret_key_from_slice(&raw)?)
}

/// Sign a transaction given as `0x`-prefixed hex fields and return the
/// `0x`-prefixed hex encoding of the signed wire form.
///
/// All validation happens before any cryptographic work; a failed call
/// produces no partial output. The same inputs always produce the same
/// output.
pub fn sign_transaction(
    private_key: &str,
    nonce: &str,
    gas_price: &str,
    gas: &str,
    to: &str,
    value: &str,
    data: &str,
) -> Result<String> {
    let tx = Transaction::from_hex_fields(nonce, gas_price, gas, to, value, data)?;
    let key = private_key_field(private_key)?;
    let signed = tx.sign(&key, LEGACY_REPLAY_OFFSET)?;
    Ok(helpers::encode_prefixed(&signed.raw_transaction))
}
