/// Errors raised while building or querying Merkle trees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("leaf not found in merkle tree: {0}")]
    LeafNotFound(String),
}
