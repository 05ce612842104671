use orchard_core::{hash_to_hex, ZERO_HASH};

use crate::error::CryptoError;
use crate::hashing::{combine, Hash};

/// Binary Merkle tree over a set of leaf hashes.
///
/// Construction is order-independent: leaves are sorted and de-duplicated
/// before the layers are built. Siblings are joined with [`combine`], and a
/// node without a sibling is promoted unchanged to the next layer.
///
/// The same rules are replayed by [`verify_proof`], which is all a verifier
/// needs to hold: the root, the leaf and the proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `layers[0]` are the sorted leaves, the last layer holds the root.
    layers: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a tree from leaf hashes.
    pub fn new(leaves: impl IntoIterator<Item = Hash>) -> Self {
        let mut leaves: Vec<Hash> = leaves.into_iter().collect();
        leaves.sort_unstable();
        leaves.dedup();

        let mut layers = vec![leaves];
        loop {
            let current = &layers[layers.len() - 1];
            if current.len() <= 1 {
                break;
            }
            let next = Self::next_layer(current);
            layers.push(next);
        }

        tracing::debug!(
            leaves = layers[0].len(),
            depth = layers.len(),
            "built merkle tree"
        );

        Self { layers }
    }

    fn next_layer(layer: &[Hash]) -> Vec<Hash> {
        layer
            .chunks(2)
            .map(|pair| match pair {
                [left, right] => combine(left, right),
                // Odd node: promote unchanged
                _ => pair[0],
            })
            .collect()
    }

    /// The root hash.
    ///
    /// A single-leaf tree's root is that leaf. An empty tree has the zero
    /// hash as its root, which no proof can reach.
    pub fn root(&self) -> Hash {
        self.layers
            .last()
            .and_then(|layer| layer.first())
            .copied()
            .unwrap_or(ZERO_HASH)
    }

    /// Sibling hashes from `leaf` up to the root.
    ///
    /// Layers in which the path node was promoted contribute nothing, so the
    /// proof can be shorter than the tree depth.
    pub fn proof(&self, leaf: &Hash) -> Result<Vec<Hash>, CryptoError> {
        let mut index = self.layers[0]
            .binary_search(leaf)
            .map_err(|_| CryptoError::LeafNotFound(hash_to_hex(leaf)))?;

        let mut proof = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            if let Some(sibling) = layer.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }
        Ok(proof)
    }

    /// The sorted, de-duplicated leaves.
    pub fn leaves(&self) -> &[Hash] {
        &self.layers[0]
    }

    /// All layers, leaves first, root last.
    pub fn layers(&self) -> &[Vec<Hash>] {
        &self.layers
    }

    /// Whether `leaf` is part of the tree.
    pub fn contains(&self, leaf: &Hash) -> bool {
        self.layers[0].binary_search(leaf).is_ok()
    }

    /// Number of distinct leaves.
    pub fn len(&self) -> usize {
        self.layers[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers[0].is_empty()
    }
}

/// Fold `leaf` through `proof` and compare against `root`.
///
/// An empty proof verifies exactly when `leaf == root`, which is the case for
/// the only leaf of a single-leaf tree.
pub fn verify_proof(proof: &[Hash], root: &Hash, leaf: &Hash) -> bool {
    let computed = proof
        .iter()
        .fold(*leaf, |node, sibling| combine(&node, sibling));
    computed == *root
}
