//! Channel entry leaves.
//!
//! A leaf commits to `(recipient, token, cumulativeAmount)` exactly the way
//! Solidity's `keccak256(abi.encodePacked(address, address, uint256))` does,
//! so roots built here verify against on-chain state and vice versa.

use orchard_core::{Address, Entry, U256};

use crate::error::CryptoError;
use crate::hashing::{hash, Hash};
use crate::merkle::{verify_proof, MerkleTree};

/// Byte length of a tightly packed entry: 20 + 20 + 32.
pub const PACKED_ENTRY_LEN: usize = 72;

/// Tight-pack an entry: recipient (20 bytes) ‖ token (20 bytes) ‖
/// cumulative amount (32 bytes, big-endian).
pub fn pack_entry(recipient: &Address, token: &Address, cumulative_amount: &U256) -> [u8; PACKED_ENTRY_LEN] {
    let mut packed = [0u8; PACKED_ENTRY_LEN];
    packed[..20].copy_from_slice(recipient.as_bytes());
    packed[20..40].copy_from_slice(token.as_bytes());
    cumulative_amount.to_big_endian(&mut packed[40..]);
    packed
}

/// Leaf hash for a channel entry.
pub fn hash_entry(recipient: &Address, token: &Address, cumulative_amount: &U256) -> Hash {
    hash(&pack_entry(recipient, token, cumulative_amount))
}

/// Merkle tree over channel entries.
#[derive(Debug, Clone)]
pub struct ChannelMerkleTree {
    tree: MerkleTree,
}

impl ChannelMerkleTree {
    pub fn new<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let leaves = entries
            .into_iter()
            .map(|e| hash_entry(&e.recipient, &e.token, &e.cumulative_amount));
        Self {
            tree: MerkleTree::new(leaves),
        }
    }

    pub fn root(&self) -> Hash {
        self.tree.root()
    }

    /// Proof for the entry `(recipient, token, cumulative_amount)`.
    pub fn proof(
        &self,
        recipient: &Address,
        token: &Address,
        cumulative_amount: &U256,
    ) -> Result<Vec<Hash>, CryptoError> {
        let leaf = hash_entry(recipient, token, cumulative_amount);
        self.tree.proof(&leaf)
    }

    pub fn proof_for_entry(&self, entry: &Entry) -> Result<Vec<Hash>, CryptoError> {
        self.proof(&entry.recipient, &entry.token, &entry.cumulative_amount)
    }

    /// Check `proof` for `entry` against this tree's root.
    pub fn verify(&self, entry: &Entry, proof: &[Hash]) -> bool {
        let leaf = hash_entry(&entry.recipient, &entry.token, &entry.cumulative_amount);
        verify_proof(proof, &self.root(), &leaf)
    }

    pub fn merkle_tree(&self) -> &MerkleTree {
        &self.tree
    }
}
