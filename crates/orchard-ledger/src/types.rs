use std::collections::HashMap;

use orchard_core::{Address, ChannelId, Hash, U256, ZERO_HASH};
use serde::Serialize;

/// Per-channel accounting state.
///
/// The owner is not stored here: it is whoever holds the channel's NFT in the
/// ownership registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel identifier (= NFT token id).
    pub id: ChannelId,
    /// Root over the currently authorized entries. All zero until set.
    pub merkle_root: Hash,
    /// Funded, unclaimed balance per token.
    pub(crate) reserves: HashMap<Address, U256>,
    /// Cumulative amount paid out per (recipient, token).
    pub(crate) claimed: HashMap<(Address, Address), U256>,
}

impl Channel {
    pub fn new(id: ChannelId) -> Self {
        Self {
            id,
            merkle_root: ZERO_HASH,
            reserves: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    /// Whether the owner has published a root yet.
    pub fn has_root(&self) -> bool {
        self.merkle_root != ZERO_HASH
    }

    /// Reserves held for `token`; zero if never funded.
    pub fn reserves(&self, token: &Address) -> U256 {
        self.reserves.get(token).copied().unwrap_or_default()
    }

    /// Amount of `token` already paid out to `recipient`; zero before the
    /// first claim.
    pub fn claimed(&self, recipient: &Address, token: &Address) -> U256 {
        self.claimed
            .get(&(*recipient, *token))
            .copied()
            .unwrap_or_default()
    }

    /// Tokens that have ever been funded into this channel.
    pub fn funded_tokens(&self) -> impl Iterator<Item = &Address> {
        self.reserves.keys()
    }
}

/// Outcome of a successful claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimReceipt {
    pub channel_id: ChannelId,
    /// Beneficiary of the payout (not necessarily the caller).
    pub recipient: Address,
    pub token: Address,
    /// Amount transferred by this claim. Zero when nothing was left to claim.
    pub payout: U256,
    /// Total paid out to `recipient` for `token` after this claim.
    pub total_claimed: U256,
    /// Channel reserves of `token` after this claim.
    pub remaining_reserves: U256,
}

impl ClaimReceipt {
    /// Whether the claim was a no-op because the entitlement was already
    /// fully paid.
    pub fn is_noop(&self) -> bool {
        self.payout.is_zero()
    }
}
