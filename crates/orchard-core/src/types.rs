use std::fmt;

pub use ethers_core::types::{Address, H256, U256};

/// Keccak-256 digest (32 bytes).
pub type Hash = [u8; 32];

/// The all-zero hash. A channel whose root equals this has no root set.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Sentinel token address for the native currency (ETH).
pub const NATIVE_TOKEN: Address = Address::zero();

/// Channel identifier. Equal to the id of the NFT minted for the channel.
pub type ChannelId = u64;

/// A single payout entitlement committed to by a channel root.
///
/// `cumulative_amount` is the total the recipient may ever claim for `token`
/// under the root, not the increment for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
    pub recipient: Address,
    pub token: Address,
    pub cumulative_amount: U256,
}

impl Entry {
    pub fn new(recipient: Address, token: Address, cumulative_amount: impl Into<U256>) -> Self {
        Self {
            recipient,
            token,
            cumulative_amount: cumulative_amount.into(),
        }
    }

    /// Whether this entry pays out in the native currency.
    pub fn is_native(&self) -> bool {
        self.token == NATIVE_TOKEN
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} <- {} of {:?}",
            self.recipient, self.cumulative_amount, self.token
        )
    }
}
