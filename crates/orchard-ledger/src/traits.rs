use orchard_core::{Address, ChannelId, U256};

use crate::error::{RegistryError, TransferError};

/// Ownership substrate for channels (an NFT collection).
///
/// The ledger only uses it for minting new channel ids and for owner lookup
/// during authorization; transfers happen outside the ledger.
pub trait OwnershipRegistry: Send + Sync {
    /// Mint the next token to `to`. Ids are sequential and start at zero.
    fn mint(&self, to: Address) -> Result<ChannelId, RegistryError>;

    /// Current holder of `token_id`.
    fn owner_of(&self, token_id: ChannelId) -> Result<Address, RegistryError>;

    /// Move `token_id` from `from` (who must hold it) to `to`.
    fn transfer(&self, from: Address, to: Address, token_id: ChannelId) -> Result<(), RegistryError>;

    /// Number of tokens minted so far.
    fn total_supply(&self) -> u64;

    /// Number of tokens held by `owner`.
    fn balance_of(&self, owner: Address) -> u64;
}

/// Fungible-transfer primitive between users and the ledger's custody.
///
/// Every method either moves the full amount or fails without effect.
pub trait TokenTransfer: Send + Sync {
    /// Pull `amount` of `token` from `from` into custody.
    fn transfer_from(&self, token: Address, from: Address, amount: U256) -> Result<(), TransferError>;

    /// Push `amount` of `token` out of custody to `to`.
    fn transfer(&self, token: Address, to: Address, amount: U256) -> Result<(), TransferError>;

    /// Accept `amount` of native currency sent by `from` into custody.
    fn receive_value(&self, from: Address, amount: U256) -> Result<(), TransferError>;

    /// Send `amount` of native currency out of custody to `to`.
    fn send_value(&self, to: Address, amount: U256) -> Result<(), TransferError>;
}
