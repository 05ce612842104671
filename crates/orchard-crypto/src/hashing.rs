/// Keccak-256 hash (32 bytes).
pub use orchard_core::Hash;

/// Hash arbitrary data using Keccak-256.
pub fn hash(data: &[u8]) -> Hash {
    ethers_core::utils::keccak256(data)
}

/// Combine two sibling nodes into their parent.
///
/// The pair is ordered byte-wise before hashing, so `combine(a, b) ==
/// combine(b, a)` and proofs carry no left/right flags.
pub fn combine(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut combined = [0u8; 64];
    combined[..32].copy_from_slice(lo);
    combined[32..].copy_from_slice(hi);
    hash(&combined)
}
