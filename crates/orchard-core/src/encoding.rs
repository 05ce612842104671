//! String encodings shared by the distribution artifacts and the CLI.
//!
//! Hashes render as 0x-prefixed lowercase hex, amounts as decimal strings and
//! addresses as EIP-55 checksummed hex.

use std::fmt;
use std::str::FromStr;

use ethers_core::utils::to_checksum;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;
use crate::types::{Address, Hash, U256};

/// Render a hash as `0x`-prefixed lowercase hex.
pub fn hash_to_hex(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

/// Parse a 32-byte hash from hex, with or without the `0x` prefix.
pub fn parse_hash(s: &str) -> Result<Hash, CoreError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|e| CoreError::InvalidHash(format!("{s}: {e}")))?;
    Hash::try_from(bytes).map_err(|b: Vec<u8>| {
        CoreError::InvalidHash(format!("{s}: expected 32 bytes, got {}", b.len()))
    })
}

/// Parse a 20-byte address from hex. Checksum casing is not enforced.
pub fn parse_address(s: &str) -> Result<Address, CoreError> {
    Address::from_str(s.trim()).map_err(|e| CoreError::InvalidAddress(format!("{s}: {e}")))
}

/// Parse a decimal uint256 amount.
pub fn parse_amount(s: &str) -> Result<U256, CoreError> {
    U256::from_dec_str(s.trim()).map_err(|e| CoreError::InvalidAmount(format!("{s}: {e:?}")))
}

/// Address that serializes in EIP-55 checksummed form.
///
/// Used as the map key of the distribution documents so that recipients can
/// look themselves up by the address their wallet displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChecksumAddress(pub Address);

impl ChecksumAddress {
    pub fn address(&self) -> Address {
        self.0
    }
}

impl fmt::Display for ChecksumAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_checksum(&self.0, None))
    }
}

impl FromStr for ChecksumAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s).map(Self)
    }
}

impl From<Address> for ChecksumAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl From<ChecksumAddress> for Address {
    fn from(address: ChecksumAddress) -> Self {
        address.0
    }
}

impl Serialize for ChecksumAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChecksumAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// uint256 amount that serializes as a decimal string.
///
/// Deserialization also accepts plain JSON integers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecimalAmount(pub U256);

impl DecimalAmount {
    pub fn value(&self) -> U256 {
        self.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DecimalAmount {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_amount(s).map(Self)
    }
}

impl From<U256> for DecimalAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl From<u64> for DecimalAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl Serialize for DecimalAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for DecimalAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl de::Visitor<'_> for AmountVisitor {
            type Value = DecimalAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a decimal amount string or a non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(DecimalAmount::from(v))
            }
        }

        deserializer.deserialize_any(AmountVisitor)
    }
}
