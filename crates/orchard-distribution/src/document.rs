use std::collections::BTreeMap;

use orchard_core::{hash_to_hex, ChecksumAddress, DecimalAmount, Hash, H256};
use orchard_crypto::{hash_entry, verify_proof, ChannelMerkleTree};
use serde::{Deserialize, Serialize};

use crate::amounts::{entries, Amounts};
use crate::error::DistributionError;

/// What a recipient needs to claim one token from the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimEntry {
    #[serde(rename = "cumulativeAmount")]
    pub cumulative_amount: DecimalAmount,
    pub proof: Vec<H256>,
}

impl ClaimEntry {
    /// Proof elements as raw hashes, ready for the ledger.
    pub fn proof_hashes(&self) -> Vec<Hash> {
        self.proof.iter().map(|h| h.to_fixed_bytes()).collect()
    }
}

/// Claims of one recipient, keyed by token.
pub type RecipientClaims = BTreeMap<ChecksumAddress, ClaimEntry>;

/// Claims of every recipient (the `tree.json` document).
pub type ClaimsDocument = BTreeMap<ChecksumAddress, RecipientClaims>;

/// A built distribution: the root to publish on the channel and every
/// recipient's proofs against it.
#[derive(Debug, Clone)]
pub struct Distribution {
    root: Hash,
    claims: ClaimsDocument,
    entry_count: usize,
}

impl Distribution {
    /// Build the channel tree over cumulative `amounts` and collect a proof
    /// for every entry.
    ///
    /// Zero amounts are kept; they are valid (if useless) entitlements.
    pub fn build(amounts: &Amounts) -> Result<Self, DistributionError> {
        let flat = entries(amounts);
        let tree = ChannelMerkleTree::new(&flat);

        let mut claims = ClaimsDocument::new();
        for entry in &flat {
            let recipient = ChecksumAddress(entry.recipient);
            let token = ChecksumAddress(entry.token);
            let proof = tree
                .proof_for_entry(entry)
                .map_err(|e| DistributionError::MissingProof {
                    recipient,
                    token,
                    reason: e.to_string(),
                })?;

            claims.entry(recipient).or_default().insert(
                token,
                ClaimEntry {
                    cumulative_amount: entry.cumulative_amount.into(),
                    proof: proof.into_iter().map(H256::from).collect(),
                },
            );
        }

        let root = tree.root();
        tracing::info!(
            root = %hash_to_hex(&root),
            recipients = claims.len(),
            entries = flat.len(),
            "distribution built"
        );

        Ok(Self {
            root,
            claims,
            entry_count: flat.len(),
        })
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    /// The root as written to `root.json`: a bare 0x-prefixed hex string.
    pub fn root_document(&self) -> H256 {
        H256::from(self.root)
    }

    pub fn claims(&self) -> &ClaimsDocument {
        &self.claims
    }

    /// Claims of a single recipient, for the one-file-per-recipient layout.
    pub fn claims_for(&self, recipient: &ChecksumAddress) -> Option<&RecipientClaims> {
        self.claims.get(recipient)
    }

    pub fn recipients(&self) -> impl Iterator<Item = &ChecksumAddress> {
        self.claims.keys()
    }

    /// Number of (recipient, token) entries committed to by the root.
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }
}

/// Check every proof in `claims` against `root`.
///
/// Returns the number of verified entries, or the first entry whose proof
/// does not reach the root.
pub fn verify_claims(claims: &ClaimsDocument, root: &Hash) -> Result<usize, DistributionError> {
    let mut verified = 0;
    for (recipient, tokens) in claims {
        for (token, claim) in tokens {
            let leaf = hash_entry(&recipient.0, &token.0, &claim.cumulative_amount.value());
            if !verify_proof(&claim.proof_hashes(), root, &leaf) {
                tracing::warn!(%recipient, %token, "claim proof does not match root");
                return Err(DistributionError::InvalidProof {
                    recipient: *recipient,
                    token: *token,
                });
            }
            verified += 1;
        }
    }
    Ok(verified)
}
