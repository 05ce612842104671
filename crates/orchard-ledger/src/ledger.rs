use std::collections::BTreeMap;
use std::sync::Arc;

use orchard_core::{hash_to_hex, Address, ChannelId, Hash, NATIVE_TOKEN, U256, ZERO_HASH};
use orchard_crypto::{hash_entry, verify_proof};

use crate::error::{LedgerError, RegistryError};
use crate::traits::{OwnershipRegistry, TokenTransfer};
use crate::types::{Channel, ClaimReceipt};

/// The channel claim engine.
///
/// Channels are keyed by the token id the registry minted for them. When the
/// ledger is the registry's only minter those ids are dense from zero. All
/// mutating operations take `&mut self`, so operations are applied one at a
/// time and each either commits in full or returns an error with no state
/// change.
pub struct ChannelLedger {
    channels: BTreeMap<ChannelId, Channel>,
    registry: Arc<dyn OwnershipRegistry>,
    bank: Arc<dyn TokenTransfer>,
}

impl ChannelLedger {
    pub fn new(registry: Arc<dyn OwnershipRegistry>, bank: Arc<dyn TokenTransfer>) -> Self {
        Self {
            channels: BTreeMap::new(),
            registry,
            bank,
        }
    }

    /// Open a new channel owned by `caller`.
    ///
    /// The channel id is the id of the NFT minted to `caller`. Tokens minted
    /// on the registry by anyone else are not channels.
    pub fn open_channel(&mut self, caller: Address) -> Result<ChannelId, LedgerError> {
        let channel_id = self.registry.mint(caller)?;
        if self.channels.contains_key(&channel_id) {
            return Err(RegistryError::DuplicateMint(channel_id).into());
        }

        self.channels.insert(channel_id, Channel::new(channel_id));
        tracing::info!(channel_id, owner = ?caller, "channel opened");
        Ok(channel_id)
    }

    /// Replace the channel's Merkle root. Only the current owner may do this.
    ///
    /// The new root is not checked against the old one: proofs for the
    /// previous root stop verifying immediately.
    pub fn set_merkle_root(
        &mut self,
        caller: Address,
        channel_id: ChannelId,
        merkle_root: Hash,
    ) -> Result<(), LedgerError> {
        let channel = existing_mut(&mut self.channels, channel_id)?;
        let owner = self.registry.owner_of(channel_id)?;
        if owner != caller {
            tracing::warn!(channel_id, caller = ?caller, "rejected root update from non-owner");
            return Err(LedgerError::NotOwner { channel_id, caller });
        }

        channel.merkle_root = merkle_root;
        tracing::info!(
            channel_id,
            merkle_root = %hash_to_hex(&merkle_root),
            "merkle root set"
        );
        Ok(())
    }

    /// Pull `amount` of `token` from `caller` into the channel's reserves.
    ///
    /// Anyone may fund any existing channel with any token. Returns the new
    /// reserve balance.
    pub fn fund_channel(
        &mut self,
        caller: Address,
        channel_id: ChannelId,
        token: Address,
        amount: U256,
    ) -> Result<U256, LedgerError> {
        let channel = existing_mut(&mut self.channels, channel_id)?;
        let reserves = increased_reserves(channel, token, amount)?;
        self.bank.transfer_from(token, caller, amount)?;
        channel.reserves.insert(token, reserves);

        tracing::info!(
            channel_id,
            funder = ?caller,
            token = ?token,
            %amount,
            %reserves,
            "channel funded"
        );
        Ok(reserves)
    }

    /// Fund the channel with native currency sent by `caller`.
    ///
    /// Native reserves are tracked under the zero-address token.
    pub fn fund_channel_with_eth(
        &mut self,
        caller: Address,
        channel_id: ChannelId,
        value: U256,
    ) -> Result<U256, LedgerError> {
        let channel = existing_mut(&mut self.channels, channel_id)?;
        let reserves = increased_reserves(channel, NATIVE_TOKEN, value)?;
        self.bank.receive_value(caller, value)?;
        channel.reserves.insert(NATIVE_TOKEN, reserves);

        tracing::info!(
            channel_id,
            funder = ?caller,
            %value,
            %reserves,
            "channel funded with native currency"
        );
        Ok(reserves)
    }

    /// Pay `recipient` whatever part of `cumulative_amount` has not been paid
    /// yet, limited by the channel's reserves of `token`.
    ///
    /// Anyone may submit a claim; the payout always goes to `recipient`.
    /// A claim whose entitlement is already fully paid succeeds without a
    /// transfer. A partially filled claim can be repeated once the channel is
    /// topped up.
    pub fn claim(
        &mut self,
        channel_id: ChannelId,
        recipient: Address,
        token: Address,
        cumulative_amount: U256,
        proof: &[Hash],
    ) -> Result<ClaimReceipt, LedgerError> {
        let channel = existing_mut(&mut self.channels, channel_id)?;

        let leaf = hash_entry(&recipient, &token, &cumulative_amount);
        if !verify_proof(proof, &channel.merkle_root, &leaf) {
            tracing::warn!(channel_id, recipient = ?recipient, "merkle proof rejected");
            return Err(LedgerError::MerkleProof(channel_id));
        }

        let claimed = channel.claimed(&recipient, &token);
        let reserves = channel.reserves(&token);

        let delta = cumulative_amount.checked_sub(claimed).ok_or(
            LedgerError::EntitlementBelowClaimed {
                cumulative_amount,
                claimed,
            },
        )?;

        if delta.is_zero() {
            tracing::debug!(channel_id, recipient = ?recipient, "nothing left to claim");
            return Ok(ClaimReceipt {
                channel_id,
                recipient,
                token,
                payout: U256::zero(),
                total_claimed: claimed,
                remaining_reserves: reserves,
            });
        }

        let payout = delta.min(reserves);
        if payout.is_zero() {
            return Err(LedgerError::InsufficientReserves { channel_id, token });
        }

        // Bounded by cumulative_amount and by reserves respectively.
        let total_claimed = claimed + payout;
        let remaining_reserves = reserves - payout;

        // Effects before the transfer; undone if the transfer fails.
        let previous_claimed = channel.claimed.insert((recipient, token), total_claimed);
        let previous_reserves = channel.reserves.insert(token, remaining_reserves);

        let transfer = if token == NATIVE_TOKEN {
            self.bank.send_value(recipient, payout)
        } else {
            self.bank.transfer(token, recipient, payout)
        };

        if let Err(e) = transfer {
            match previous_claimed {
                Some(amount) => channel.claimed.insert((recipient, token), amount),
                None => channel.claimed.remove(&(recipient, token)),
            };
            match previous_reserves {
                Some(amount) => channel.reserves.insert(token, amount),
                None => channel.reserves.remove(&token),
            };
            tracing::warn!(channel_id, recipient = ?recipient, error = %e, "claim transfer failed");
            return Err(e.into());
        }

        tracing::info!(
            channel_id,
            recipient = ?recipient,
            token = ?token,
            %payout,
            %total_claimed,
            "claim paid"
        );

        Ok(ClaimReceipt {
            channel_id,
            recipient,
            token,
            payout,
            total_claimed,
            remaining_reserves,
        })
    }

    /// Reserves of `token` in the channel; zero for unknown channels.
    pub fn get_channel_reserves_by_token(&self, channel_id: ChannelId, token: Address) -> U256 {
        self.channel(channel_id)
            .map(|c| c.reserves(&token))
            .unwrap_or_default()
    }

    /// The channel's Merkle root; the zero hash if unset or unknown.
    pub fn get_merkle_root(&self, channel_id: ChannelId) -> Hash {
        self.channel(channel_id)
            .map(|c| c.merkle_root)
            .unwrap_or(ZERO_HASH)
    }

    /// Amount of `token` already paid to `recipient` from the channel.
    pub fn get_claimed(&self, channel_id: ChannelId, recipient: Address, token: Address) -> U256 {
        self.channel(channel_id)
            .map(|c| c.claimed(&recipient, &token))
            .unwrap_or_default()
    }

    /// Current owner of the channel according to the registry.
    pub fn owner_of(&self, channel_id: ChannelId) -> Result<Address, LedgerError> {
        if !self.channels.contains_key(&channel_id) {
            return Err(LedgerError::NonExistentToken(channel_id));
        }
        Ok(self.registry.owner_of(channel_id)?)
    }

    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.channels.get(&channel_id)
    }

    /// Number of channels opened through this ledger.
    pub fn channel_count(&self) -> u64 {
        self.channels.len() as u64
    }
}

fn existing_mut(
    channels: &mut BTreeMap<ChannelId, Channel>,
    channel_id: ChannelId,
) -> Result<&mut Channel, LedgerError> {
    channels
        .get_mut(&channel_id)
        .ok_or(LedgerError::NonExistentToken(channel_id))
}

fn increased_reserves(channel: &Channel, token: Address, amount: U256) -> Result<U256, LedgerError> {
    channel
        .reserves(&token)
        .checked_add(amount)
        .ok_or(LedgerError::ReserveOverflow {
            channel_id: channel.id,
            token,
        })
}
