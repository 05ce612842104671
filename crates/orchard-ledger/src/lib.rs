//! Merkle Orchard Channel Ledger
//!
//! Tracks NFT-identified payout channels: each channel owner publishes a
//! Merkle root over cumulative entitlements, funders top up reserves, and
//! recipients claim the increment since their last claim by presenting a
//! proof. Ownership and token custody are external capabilities consumed
//! through the traits in [`traits`].

pub mod error;
pub mod types;
pub mod traits;
pub mod ledger;
pub mod adapters;

pub use error::{ErrorKind, LedgerError, RegistryError, TransferError};
pub use types::{Channel, ClaimReceipt};
pub use traits::{OwnershipRegistry, TokenTransfer};
pub use ledger::ChannelLedger;
pub use adapters::{CollectionMetadata, InMemoryBank, InMemoryRegistry};
