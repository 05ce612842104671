//! Merkle Orchard Distribution Pipeline
//!
//! Off-ledger tooling for channel owners: merge per-period payouts into
//! cumulative entitlements, build the channel Merkle tree over them and emit
//! the claim documents recipients use to claim from the ledger.

pub mod error;
pub mod amounts;
pub mod document;

pub use error::DistributionError;
pub use amounts::{accumulate, entries, Amounts};
pub use document::{verify_claims, ClaimEntry, ClaimsDocument, Distribution, RecipientClaims};
