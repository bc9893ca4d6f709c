//! # Addresses & Reserve Identifiers
//!
//! Two newtypes underpin every operation in CORAL:
//!
//! - [`Address`] — a 20-byte EVM-style address. Vaults, calculators, price
//!   feeds, routers, holders, and the ledger owner are all addresses. The
//!   all-zero address is the "unset" sentinel, same as on-chain.
//! - [`ReserveId`] — a 32-byte content-derived identifier minted by the
//!   reserve registry. Derived with BLAKE3's `derive_key` mode over the
//!   registry sequence number, a fresh UUID, and the reserve name, so ids
//!   never collide and are never reused — not even after deletion.
//!
//! Both render as `0x`-prefixed lowercase hex and serialize as that string,
//! which keeps JSON configs and log lines readable.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Key-derivation context for reserve id hashing. Changing this string is a
/// breaking change for anyone persisting ids.
const RESERVE_ID_CONTEXT: &str = "ALAS CORAL v1 reserve id";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from parsing an address or reserve id out of a hex string.
#[derive(Debug, Error, PartialEq)]
pub enum AddressParseError {
    /// The hex payload decodes to the wrong number of bytes.
    #[error("wrong length: expected {expected} bytes, got {got}")]
    WrongLength {
        /// Byte length the type requires.
        expected: usize,
        /// Byte length actually supplied.
        got: usize,
    },

    /// The payload is not valid hexadecimal.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte address identifying an external contract or account: a vault,
/// a deployed calculator, a price feed, a valuation router, a shares holder,
/// or the ledger owner.
///
/// `Address::ZERO` means "unset". The ledger rejects zero calculator
/// addresses at bind time rather than discovering the problem during a
/// valuation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address — the conventional "not a real deployment"
    /// sentinel.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Wraps raw bytes as an address.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns `true` for the all-zero sentinel.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(payload)?;
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| AddressParseError::WrongLength {
                expected: 20,
                got: v.len(),
            })?;
        Ok(Address(arr))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// ReserveId
// ---------------------------------------------------------------------------

/// A 32-byte reserve identifier, minted by the reserve registry at creation.
///
/// Ids are content-derived rather than sequential so that a freshly created
/// reserve can never be confused with a deleted one: the derivation input
/// includes a UUID, so even identical `(sequence, name)` pairs — which the
/// registry never produces anyway — would yield distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReserveId([u8; 32]);

impl ReserveId {
    /// Derives a fresh id from the registry sequence number and the reserve
    /// name. Each call draws new UUID entropy, so two calls with the same
    /// arguments still produce different ids.
    pub fn generate(sequence: u64, name: &str) -> Self {
        let mut hasher = blake3::Hasher::new_derive_key(RESERVE_ID_CONTEXT);
        hasher.update(&sequence.to_le_bytes());
        hasher.update(Uuid::new_v4().as_bytes());
        hasher.update(name.as_bytes());
        ReserveId(*hasher.finalize().as_bytes())
    }

    /// Wraps raw bytes as a reserve id.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        ReserveId(bytes)
    }

    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ReserveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for ReserveId {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let payload = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(payload)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|v: Vec<u8>| AddressParseError::WrongLength {
                expected: 32,
                got: v.len(),
            })?;
        Ok(ReserveId(arr))
    }
}

impl Serialize for ReserveId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReserveId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> Address {
        Address::from_bytes([byte; 20])
    }

    #[test]
    fn zero_address_is_zero() {
        assert!(Address::ZERO.is_zero());
        assert!(!addr(1).is_zero());
    }

    #[test]
    fn address_roundtrips_through_display() {
        let a = addr(0xab);
        let parsed: Address = a.to_string().parse().unwrap();
        assert_eq!(a, parsed);
    }

    #[test]
    fn address_parses_without_prefix() {
        let a: Address = "abababababababababababababababababababab".parse().unwrap();
        assert_eq!(a, addr(0xab));
    }

    #[test]
    fn address_rejects_wrong_length() {
        let result: Result<Address, _> = "0xdeadbeef".parse();
        assert!(matches!(
            result,
            Err(AddressParseError::WrongLength { expected: 20, .. })
        ));
    }

    #[test]
    fn address_rejects_bad_hex() {
        let result: Result<Address, _> = "0xzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz".parse();
        assert!(matches!(result, Err(AddressParseError::InvalidHex(_))));
    }

    #[test]
    fn address_json_is_hex_string() {
        let json = serde_json::to_string(&addr(0x11)).unwrap();
        assert_eq!(json, "\"0x1111111111111111111111111111111111111111\"");
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr(0x11));
    }

    #[test]
    fn reserve_ids_are_unique_even_for_same_inputs() {
        // Same sequence, same name — the UUID entropy still separates them.
        let a = ReserveId::generate(7, "UNI-R01");
        let b = ReserveId::generate(7, "UNI-R01");
        assert_ne!(a, b);
    }

    #[test]
    fn reserve_id_roundtrips_through_display() {
        let id = ReserveId::generate(0, "cxUSD-R01");
        let parsed: ReserveId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn reserve_id_rejects_wrong_length() {
        let result: Result<ReserveId, _> = "0x1234".parse();
        assert!(matches!(
            result,
            Err(AddressParseError::WrongLength { expected: 32, .. })
        ));
    }
}
