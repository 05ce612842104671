pub mod error;
pub mod hashing;
pub mod merkle;
pub mod channel_tree;

pub use error::CryptoError;
pub use hashing::{combine, hash, Hash};
pub use merkle::{verify_proof, MerkleTree};
pub use channel_tree::{hash_entry, pack_entry, ChannelMerkleTree};
