//! Account addresses and the local session account

use crate::error::AccountError;
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Sha3_256};
use std::str::FromStr;

/// Authentication key scheme byte for single ed25519 keys
const ED25519_SCHEME: u8 = 0x00;

/// Prefix used by AIP-80 formatted ed25519 private keys
const AIP80_PREFIX: &str = "ed25519-priv-";

/// A 32-byte Aptos account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    pub const LENGTH: usize = 32;

    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Long form: `0x` followed by 64 hex digits
    #[must_use]
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl std::fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_literal())
    }
}

impl FromStr for AccountAddress {
    type Err = AccountError;

    /// Accepts long and short forms, with or without `0x`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        if digits.is_empty() || digits.len() > Self::LENGTH * 2 {
            return Err(AccountError::InvalidAddress(s.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AccountError::InvalidAddress(s.to_string()));
        }

        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_literal())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An ed25519 key pair held for the duration of one session
///
/// Keys are never written anywhere by this crate.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    /// Generate a fresh random account
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rngs::OsRng;
        Self::from_signing_key(SigningKey::generate(&mut rng))
    }

    /// Load an account from a hex private key
    ///
    /// Accepts `0x`-prefixed hex, bare hex, and the `ed25519-priv-0x...` form.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not 32 bytes of valid hex.
    pub fn from_private_key(key: &str) -> Result<Self, AccountError> {
        let key = key.trim();
        let key = key.strip_prefix(AIP80_PREFIX).unwrap_or(key);
        let key = key.strip_prefix("0x").unwrap_or(key);

        let bytes = hex::decode(key)?;
        let secret: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| AccountError::InvalidKeyLength(bytes.len()))?;

        Ok(Self::from_signing_key(SigningKey::from_bytes(&secret)))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let address = AccountAddress(authentication_key(&signing_key.verifying_key().to_bytes()));
        Self {
            signing_key,
            address,
        }
    }

    #[must_use]
    pub const fn address(&self) -> AccountAddress {
        self.address
    }

    /// The authentication key; equal to the address for freshly created accounts
    #[must_use]
    pub fn authentication_key(&self) -> [u8; 32] {
        authentication_key(&self.public_key_bytes())
    }

    #[must_use]
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    #[must_use]
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.public_key_bytes()))
    }

    #[must_use]
    pub fn private_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.to_bytes()))
    }

    /// Sign an arbitrary message (a transaction signing message)
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl std::fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// `sha3_256(public_key || scheme)`
fn authentication_key(public_key: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([ED25519_SCHEME]);
    hasher.finalize().into()
}
