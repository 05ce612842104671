use orchard_core::{Address, ChannelId, U256};

/// Errors raised by an [`OwnershipRegistry`](crate::traits::OwnershipRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("token {0} does not exist")]
    NonExistentToken(ChannelId),

    #[error("{caller:?} does not own token {token_id}")]
    NotTokenOwner { token_id: ChannelId, caller: Address },

    #[error("registry minted token {0} twice")]
    DuplicateMint(ChannelId),
}

/// Errors raised by a [`TokenTransfer`](crate::traits::TokenTransfer) primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("insufficient balance of {token:?} for {holder:?}: available {available}, required {required}")]
    InsufficientBalance {
        holder: Address,
        token: Address,
        available: U256,
        required: U256,
    },

    #[error("balance of {token:?} for {holder:?} would overflow")]
    BalanceOverflow { holder: Address, token: Address },

    #[error("{0:?} is not a token contract")]
    NotAContract(Address),

    #[error("transfer to {0:?} was rejected by the receiver")]
    Rejected(Address),
}

/// Error classes of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller is not allowed to perform the operation.
    Authorization,
    /// Referenced channel does not exist.
    Existence,
    /// Leaf and proof do not reach the stored root.
    Proof,
    /// Reserves cannot cover any part of the claim.
    Reserves,
    /// Arithmetic guard on claimed/reserve accounting.
    Accounting,
    /// An external collaborator (registry, token transfer) failed.
    Collaborator,
}

/// Channel ledger errors.
///
/// Every error aborts the triggering operation with no state change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("{caller:?} is not the owner of channel {channel_id}")]
    NotOwner { channel_id: ChannelId, caller: Address },

    #[error("channel {0} does not exist")]
    NonExistentToken(ChannelId),

    #[error("merkle proof does not match the root of channel {0}")]
    MerkleProof(ChannelId),

    #[error("channel {channel_id} has no reserves of {token:?} left")]
    InsufficientReserves { channel_id: ChannelId, token: Address },

    #[error("cumulative amount {cumulative_amount} is below the {claimed} already claimed")]
    EntitlementBelowClaimed { cumulative_amount: U256, claimed: U256 },

    #[error("reserves of {token:?} in channel {channel_id} would overflow")]
    ReserveOverflow { channel_id: ChannelId, token: Address },

    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    #[error("ownership registry error: {0}")]
    Registry(#[from] RegistryError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotOwner { .. } => ErrorKind::Authorization,
            Self::NonExistentToken(_) => ErrorKind::Existence,
            Self::MerkleProof(_) => ErrorKind::Proof,
            Self::InsufficientReserves { .. } => ErrorKind::Reserves,
            Self::EntitlementBelowClaimed { .. } | Self::ReserveOverflow { .. } => {
                ErrorKind::Accounting
            }
            Self::Transfer(_) | Self::Registry(_) => ErrorKind::Collaborator,
        }
    }
}
